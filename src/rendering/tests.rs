use super::TrackMap;
use crate::orbit::{GroundTrackSample, hourly_instants};
use crate::prediction::PredictedPoint;
use chrono::NaiveDate;

fn observed() -> Vec<GroundTrackSample> {
    let date = NaiveDate::from_ymd_opt(2025, 2, 16).unwrap();
    hourly_instants(date, 24)
        .into_iter()
        .enumerate()
        .map(|(i, timestamp)| GroundTrackSample {
            timestamp,
            latitude: -45.0 + 3.5 * i as f64,
            longitude: -170.0 + 14.0 * i as f64,
            altitude: 418.0,
        })
        .collect()
}

fn predicted() -> PredictedPoint { PredictedPoint { latitude: 40.5, longitude: 171.25 } }

fn build_map(samples: &[GroundTrackSample], point: &PredictedPoint) -> TrackMap {
    let mut map = TrackMap::new("ISS (ZARYA)", samples[0].lat_lon());
    for sample in samples {
        map.add_observed(sample);
    }
    map.add_predicted(point);
    map
}

fn count_markers(html: &str) -> (usize, usize) {
    (html.matches("L.circleMarker(").count(), html.matches("L.marker(").count())
}

#[test]
fn test_html_contents() {
    let samples = observed();
    let map = build_map(&samples, &predicted());
    assert_eq!(map.marker_count(), 25);

    let html = map.to_html().unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("setView([-45, -170], 2)"));
    assert!(html.contains("L.marker([40.5, 171.25]"));
    assert!(html.contains("2025-02-16 23:00 UTC"));
    assert!(html.contains("<title>ISS (ZARYA)</title>"));
    assert_eq!(count_markers(&html), (24, 1));
    let script_lines = html.lines().filter(|l| l.ends_with(".addTo(map);")).count();
    assert_eq!(script_lines, 26);
}

#[test]
fn test_title_is_escaped() {
    let map = TrackMap::new("<b>&</b>", (0.0, 0.0));
    let html = map.to_html().unwrap();
    assert!(html.contains("<title>&lt;b&gt;&amp;&lt;/b&gt;</title>"));
    assert_eq!(count_markers(&html), (0, 0));
}

#[tokio::test]
async fn test_repeated_save_overwrites_with_same_marker_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("satellite_track.html");
    std::fs::write(&path, "stale map from an earlier run").unwrap();

    let samples = observed();
    for _ in 0..2 {
        build_map(&samples, &predicted()).save(&path).await.unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(!html.contains("stale map"));
        let (observed, predicted) = count_markers(&html);
        assert_eq!(observed + predicted, 25);
        assert_eq!(predicted, 1);
    }
}

#[tokio::test]
async fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("map.html");
    let res = build_map(&observed(), &predicted()).save(&path).await;
    assert!(matches!(res, Err(super::RenderError::Write(_))));
}
