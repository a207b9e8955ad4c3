use crate::config::PipelineConfig;
use crate::http_handler::{common::HTTPError, http_client::HTTPClient, http_request::tle_get::TleRequest};
use crate::orbit::{
    GroundTrackSample, PropagationError, Propagator, TleParseError, TleRecord, hourly_instants,
};
use crate::prediction::{Forecast, PredictionError, Predictor};
use crate::rendering::{RenderError, TrackMap, open_in_browser};
use crate::{info, log};
use std::path::PathBuf;
use strum_macros::Display;

/// Anything that can deliver the raw three-line TLE text for a catalog number.
pub(crate) trait TleSource {
    async fn fetch_tle(&self, catalog_number: u32) -> Result<String, HTTPError>;
}

impl TleSource for HTTPClient {
    async fn fetch_tle(&self, catalog_number: u32) -> Result<String, HTTPError> {
        self.send_request(TleRequest::new(catalog_number)).await
    }
}

/// Failure of one pipeline stage; the stages after it never run.
#[derive(Debug, Display)]
pub enum PipelineError {
    Fetch(HTTPError),
    Tle(TleParseError),
    Propagation(PropagationError),
    Prediction(PredictionError),
    Render(RenderError),
}

impl std::error::Error for PipelineError {}

impl PipelineError {
    /// Process exit status reported for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Fetch(_) => 2,
            PipelineError::Tle(_) => 3,
            PipelineError::Propagation(_) => 4,
            PipelineError::Prediction(_) => 5,
            PipelineError::Render(_) => 6,
        }
    }
}

impl From<HTTPError> for PipelineError {
    fn from(value: HTTPError) -> Self { PipelineError::Fetch(value) }
}

impl From<TleParseError> for PipelineError {
    fn from(value: TleParseError) -> Self { PipelineError::Tle(value) }
}

impl From<PropagationError> for PipelineError {
    fn from(value: PropagationError) -> Self { PipelineError::Propagation(value) }
}

impl From<PredictionError> for PipelineError {
    fn from(value: PredictionError) -> Self { PipelineError::Prediction(value) }
}

impl From<RenderError> for PipelineError {
    fn from(value: RenderError) -> Self { PipelineError::Render(value) }
}

/// Everything a successful run produced.
#[derive(Debug)]
pub struct PipelineReport {
    pub tle: TleRecord,
    pub track: Vec<GroundTrackSample>,
    pub forecast: Forecast,
    pub output_path: PathBuf,
}

/// Fetch, propagate, predict and render, strictly in that order.
pub struct Pipeline<S> {
    source: S,
    config: PipelineConfig,
}

impl<S: TleSource> Pipeline<S> {
    pub fn new(source: S, config: PipelineConfig) -> Self { Self { source, config } }

    /// Runs all four stages once.
    ///
    /// # Errors
    /// Returns the [`PipelineError`] of the first failing stage.
    pub async fn run(&self) -> Result<PipelineReport, PipelineError> {
        let cfg = &self.config;

        info!("Fetching TLE for catalog number {}", cfg.catalog_number);
        let body = self.source.fetch_tle(cfg.catalog_number).await?;
        let tle = TleRecord::parse(&body)?;
        log!("Elements for {}:\n\t{}\n\t{}", tle.name(), tle.line1(), tle.line2());

        info!("Propagating {} samples on {}", cfg.sample_count, cfg.track_date);
        let propagator = Propagator::new(&tle)?;
        let track = propagator.ground_track(&hourly_instants(cfg.track_date, cfg.sample_count))?;

        info!("Fitting track model");
        let forecast = Predictor::new(cfg.predictor.clone()).run(&track)?;

        info!("Rendering map to {}", cfg.output_path.display());
        let center = track.first().map_or((0.0, 0.0), GroundTrackSample::lat_lon);
        let mut map = TrackMap::new(tle.name(), center);
        for sample in &track {
            map.add_observed(sample);
        }
        map.add_predicted(&forecast.point);
        map.save(&cfg.output_path).await?;
        log!("Wrote {} markers", map.marker_count());
        if cfg.open_browser {
            open_in_browser(&cfg.output_path)?;
        }

        Ok(PipelineReport { tle, track, forecast, output_path: cfg.output_path.clone() })
    }
}
