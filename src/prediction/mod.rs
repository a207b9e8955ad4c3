mod dataset;
mod model;
mod predictor;
#[cfg(test)]
mod tests;

pub use predictor::{Forecast, PredictedPoint, PredictionError, Predictor, PredictorConfig};
