use super::dataset::{MinMaxScaler, TrainingPair, training_pairs};
use super::model::{TrackModel, TrainingReport};
use crate::orbit::GroundTrackSample;
use crate::{info, log};
use burn::backend::ndarray::NdArrayDevice;
use burn::backend::{Autodiff, NdArray};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use strum_macros::Display;

/// CPU backend with reverse-mode autodiff for training.
type TrainingBackend = Autodiff<NdArray>;

/// Training hyperparameters of a prediction run.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub hidden_units: usize,
    /// Seed for weight initialization and shuffling, `None` draws from the OS.
    pub seed: Option<u64>,
    /// Min-max scale latitude and longitude before training.
    pub scale_features: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            batch_size: 4,
            learning_rate: 0.001,
            hidden_units: 50,
            seed: None,
            scale_features: false,
        }
    }
}

/// The single forecast position following the last observed sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictedPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Outcome of [`Predictor::run`].
#[derive(Debug, Clone)]
pub struct Forecast {
    pub point: PredictedPoint,
    pub report: TrainingReport,
}

#[derive(Debug, Display, PartialEq)]
pub enum PredictionError {
    /// At least two samples are needed to form a training pair.
    NotEnoughSamples(usize),
    InvalidBatchSize,
    /// Training diverged; carries the last observed loss.
    NumericalInstability(f64),
}

impl std::error::Error for PredictionError {}

/// Fits a fresh [`TrackModel`] to a ground track and forecasts one step ahead.
///
/// The model only lives for the duration of [`Predictor::run`]. With a couple
/// dozen samples the fit will overfit; nothing guards against that.
pub struct Predictor {
    config: PredictorConfig,
}

impl Predictor {
    pub fn new(config: PredictorConfig) -> Self { Self { config } }

    /// Trains on the one-step-ahead pairs of `samples` and predicts the point after the last one.
    ///
    /// # Errors
    /// Returns a [`PredictionError`] if fewer than two samples are given, the batch
    /// size is zero, or the loss or prediction are not finite.
    pub fn run(&self, samples: &[GroundTrackSample]) -> Result<Forecast, PredictionError> {
        let Some(last) = samples.last().filter(|_| samples.len() >= 2) else {
            return Err(PredictionError::NotEnoughSamples(samples.len()));
        };
        if self.config.batch_size == 0 {
            return Err(PredictionError::InvalidBatchSize);
        }
        let mut rng = self.config.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let mut pairs = training_pairs(samples);
        let scaler = self.config.scale_features.then(|| MinMaxScaler::fit(&pairs));
        if let Some(s) = &scaler {
            pairs = pairs
                .iter()
                .map(|p| TrainingPair { input: s.transform(p.input), target: s.transform(p.target) })
                .collect();
        }
        log!(
            "Training on {} pairs for {} epochs (batch size {})",
            pairs.len(),
            self.config.epochs,
            self.config.batch_size
        );

        let device = NdArrayDevice::default();
        let model = TrackModel::<TrainingBackend>::new(self.config.hidden_units, &device, &mut rng);
        let (model, report) = model.fit(
            &pairs,
            self.config.epochs,
            self.config.batch_size,
            self.config.learning_rate,
            &device,
            &mut rng,
        );
        if let Some(loss) = report.final_loss().filter(|l| !l.is_finite()) {
            return Err(PredictionError::NumericalInstability(loss));
        }

        let input = scaler.map_or(last.lat_lon(), |s| s.transform(last.lat_lon()));
        let raw = model.predict(input, &device);
        let (latitude, longitude) = scaler.map_or(raw, |s| s.inverse(raw));
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(PredictionError::NumericalInstability(report.final_loss().unwrap_or(f64::NAN)));
        }
        info!(
            "Predicted next point lat {latitude:.3} lon {longitude:.3} (final loss {:.4})",
            report.final_loss().unwrap_or_default()
        );
        Ok(Forecast { point: PredictedPoint { latitude, longitude }, report })
    }
}
