use super::model::FEATURES;
use crate::orbit::GroundTrackSample;
use burn::data::dataloader::batcher::Batcher;
use burn::tensor::{Tensor, TensorData, backend::Backend};
use itertools::Itertools;

/// One-step-ahead supervised example: position at `t` and position at `t + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingPair {
    pub input: (f64, f64),
    pub target: (f64, f64),
}

/// Pairs every sample with its successor, `samples.len() - 1` pairs in track order.
pub fn training_pairs(samples: &[GroundTrackSample]) -> Vec<TrainingPair> {
    samples
        .iter()
        .tuple_windows()
        .map(|(now, next)| TrainingPair { input: now.lat_lon(), target: next.lat_lon() })
        .collect()
}

/// Per-feature min-max scaling of `(lat, lon)` into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: (f64, f64),
    span: (f64, f64),
}

impl MinMaxScaler {
    /// Fits the scaler on all inputs and targets of `pairs`.
    ///
    /// A constant feature gets a span of one so it maps to zero instead of dividing by zero.
    pub fn fit(pairs: &[TrainingPair]) -> Self {
        let points = pairs.iter().flat_map(|p| [p.input, p.target]);
        let (lat_min, lat_max) = min_max(points.clone().map(|p| p.0));
        let (lon_min, lon_max) = min_max(points.map(|p| p.1));
        let span = |lo: f64, hi: f64| if hi > lo { hi - lo } else { 1.0 };
        Self { min: (lat_min, lon_min), span: (span(lat_min, lat_max), span(lon_min, lon_max)) }
    }

    pub fn transform(&self, point: (f64, f64)) -> (f64, f64) {
        ((point.0 - self.min.0) / self.span.0, (point.1 - self.min.1) / self.span.1)
    }

    pub fn inverse(&self, point: (f64, f64)) -> (f64, f64) {
        (point.0 * self.span.0 + self.min.0, point.1 * self.span.1 + self.min.1)
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.minmax_by(f64::total_cmp).into_option().unwrap_or((0.0, 0.0))
}

/// Mini-batch of training pairs, each input a sequence of length one.
#[derive(Clone, Debug)]
pub struct TrackBatch<B: Backend> {
    /// `[batch, 1, FEATURES]`
    pub inputs: Tensor<B, 3>,
    /// `[batch, FEATURES]`
    pub targets: Tensor<B, 2>,
}

#[derive(Clone, Debug)]
pub struct TrackBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> TrackBatcher<B> {
    pub fn new(device: B::Device) -> Self { Self { device } }
}

impl<B: Backend> Batcher<TrainingPair, TrackBatch<B>> for TrackBatcher<B> {
    fn batch(&self, items: Vec<TrainingPair>) -> TrackBatch<B> {
        let len = items.len();
        let inputs: Vec<f32> = items.iter().flat_map(|p| point_values(p.input)).collect();
        let targets: Vec<f32> = items.iter().flat_map(|p| point_values(p.target)).collect();
        TrackBatch {
            inputs: Tensor::from_data(TensorData::new(inputs, [len, 1, FEATURES]), &self.device),
            targets: Tensor::from_data(TensorData::new(targets, [len, FEATURES]), &self.device),
        }
    }
}

/// Narrows a `(lat, lon)` point to the backend's `f32` elements.
#[allow(clippy::cast_possible_truncation)]
pub fn point_values(point: (f64, f64)) -> [f32; FEATURES] { [point.0 as f32, point.1 as f32] }
