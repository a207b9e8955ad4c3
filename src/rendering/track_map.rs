use crate::orbit::GroundTrackSample;
use crate::prediction::PredictedPoint;
use serde::Serialize;
use std::path::Path;
use strum_macros::Display;

const DEFAULT_ZOOM: u8 = 2;
const OBSERVED_RADIUS: u8 = 5;
const OBSERVED_COLOR: &str = "#1f6feb";
const LEAFLET_VERSION: &str = "1.9.4";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

#[derive(Debug, Display)]
pub enum RenderError {
    /// The map could not be serialized.
    Serialize(serde_json::Error),
    /// Writing the HTML file failed.
    Write(std::io::Error),
    /// The host browser could not be launched.
    BrowserLaunch(std::io::Error),
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(value: serde_json::Error) -> Self { RenderError::Serialize(value) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum MarkerKind {
    Observed,
    Predicted,
}

#[derive(Debug, Clone, Serialize)]
struct Marker {
    kind: MarkerKind,
    latitude: f64,
    longitude: f64,
    popup: String,
}

/// Leaflet slippy map holding the observed ground track and the forecast point.
///
/// Every observed sample becomes a small uniform circle marker, the forecast a
/// default pin marker. The HTML is self-contained apart from the Leaflet CDN
/// assets and OpenStreetMap tiles.
#[derive(Debug, Clone)]
pub struct TrackMap {
    title: String,
    center: (f64, f64),
    zoom: u8,
    markers: Vec<Marker>,
}

impl TrackMap {
    /// Creates an empty map centered on `(latitude, longitude)`.
    pub fn new(title: &str, center: (f64, f64)) -> Self {
        Self { title: title.to_string(), center, zoom: DEFAULT_ZOOM, markers: Vec::new() }
    }

    pub fn add_observed(&mut self, sample: &GroundTrackSample) {
        self.markers.push(Marker {
            kind: MarkerKind::Observed,
            latitude: sample.latitude,
            longitude: sample.longitude,
            popup: format!(
                "{} UTC<br>lat {:.3}, lon {:.3}<br>alt {:.1} km",
                sample.timestamp.format("%Y-%m-%d %H:%M"),
                sample.latitude,
                sample.longitude,
                sample.altitude
            ),
        });
    }

    pub fn add_predicted(&mut self, point: &PredictedPoint) {
        self.markers.push(Marker {
            kind: MarkerKind::Predicted,
            latitude: point.latitude,
            longitude: point.longitude,
            popup: format!(
                "Predicted next position<br>lat {:.3}, lon {:.3}",
                point.latitude, point.longitude
            ),
        });
    }

    pub fn marker_count(&self) -> usize { self.markers.len() }

    /// Renders the map as a complete HTML document.
    ///
    /// # Errors
    /// Returns [`RenderError::Serialize`] if a popup or the data block cannot be encoded.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let mut script = format!(
            "const map = L.map('map').setView([{}, {}], {});\n",
            self.center.0, self.center.1, self.zoom
        );
        script.push_str(&format!(
            "L.tileLayer({}, {{maxZoom: 19, attribution: {}}}).addTo(map);\n",
            serde_json::to_string(TILE_URL)?,
            serde_json::to_string(TILE_ATTRIBUTION)?
        ));
        for marker in &self.markers {
            let popup = serde_json::to_string(&marker.popup)?;
            let line = match marker.kind {
                MarkerKind::Observed => format!(
                    "L.circleMarker([{}, {}], {{radius: {OBSERVED_RADIUS}, color: '{OBSERVED_COLOR}', \
                     fill: true, fillOpacity: 0.8}}).bindPopup({popup}).addTo(map);\n",
                    marker.latitude, marker.longitude
                ),
                MarkerKind::Predicted => format!(
                    "L.marker([{}, {}], {{title: 'prediction'}}).bindPopup({popup}).addTo(map);\n",
                    marker.latitude, marker.longitude
                ),
            };
            script.push_str(&line);
        }
        // raw data for tooling, not read by the page itself
        let data = serde_json::to_string(&self.markers)?.replace("</", "<\\/");

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; width: 100%; margin: 0; padding: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script type="application/json" id="track-data">{data}</script>
<script>
{script}</script>
</body>
</html>
"#,
            title = html_escape(&self.title),
        ))
    }

    /// Writes the rendered HTML to `path`, replacing any previous file.
    ///
    /// # Errors
    /// Returns a [`RenderError`] if rendering or the file write fails.
    pub async fn save(&self, path: &Path) -> Result<(), RenderError> {
        let html = self.to_html()?;
        tokio::fs::write(path, html).await.map_err(RenderError::Write)
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}
