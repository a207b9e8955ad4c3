use super::dataset::{TrackBatcher, TrainingPair, point_values};
use crate::event;
use burn::data::dataloader::batcher::Batcher;
use burn::module::Module;
use burn::nn::loss::{MseLoss, Reduction};
use burn::nn::{Linear, LinearConfig, Lstm, LstmConfig};
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{ElementConversion, Tensor, TensorData};
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::{Mutex, PoisonError};

/// Number of features per time step: latitude and longitude.
pub const FEATURES: usize = 2;
const ADAM_EPSILON: f32 = 1e-7;

/// The backend seed is process global, so seeding and weight initialization
/// must not interleave between concurrently built models.
static BACKEND_SEED: Mutex<()> = Mutex::new(());

/// Two stacked LSTM layers followed by a linear `(lat, lon)` head.
///
/// The lower layer returns its whole sequence, the upper layer only its last
/// hidden state. Every pair is fed as a sequence of length one.
#[derive(Module, Debug)]
pub struct TrackModel<B: Backend> {
    lower: Lstm<B>,
    upper: Lstm<B>,
    head: Linear<B>,
}

/// Loss history of a [`TrackModel::fit`] run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingReport {
    /// Mean squared error over all pairs, one entry per epoch.
    pub epoch_losses: Vec<f64>,
}

impl TrainingReport {
    pub fn final_loss(&self) -> Option<f64> { self.epoch_losses.last().copied() }
}

impl<B: Backend> TrackModel<B> {
    /// Builds a model whose initial weights are drawn from a backend seed taken from `rng`.
    pub fn new<R: Rng + ?Sized>(hidden_units: usize, device: &B::Device, rng: &mut R) -> Self {
        let _guard = BACKEND_SEED.lock().unwrap_or_else(PoisonError::into_inner);
        B::seed(rng.random());
        Self {
            lower: LstmConfig::new(FEATURES, hidden_units, true).init(device),
            upper: LstmConfig::new(hidden_units, hidden_units, true).init(device),
            head: LinearConfig::new(hidden_units, FEATURES).init(device),
        }
    }

    /// Maps `[batch, 1, FEATURES]` inputs to `[batch, FEATURES]` predictions.
    pub fn forward(&self, inputs: Tensor<B, 3>) -> Tensor<B, 2> {
        let (sequence, _) = self.lower.forward(inputs, None);
        let (_, state) = self.upper.forward(sequence, None);
        self.head.forward(state.hidden)
    }

    /// Predicts the position following `point`.
    pub fn predict(&self, point: (f64, f64), device: &B::Device) -> (f64, f64) {
        let input = Tensor::from_data(TensorData::new(point_values(point).to_vec(), [1, 1, FEATURES]), device);
        let output = self.forward(input).into_data();
        let mut values = output.iter::<f64>();
        (values.next().unwrap_or(f64::NAN), values.next().unwrap_or(f64::NAN))
    }
}

impl<B: AutodiffBackend> TrackModel<B> {
    /// Trains on `pairs` with MSE loss and Adam, consuming and returning the model.
    ///
    /// Pairs are reshuffled every epoch and split into mini-batches of `batch_size`
    /// (the last batch may be smaller). There is no validation split and no early stop.
    pub fn fit<R: Rng + ?Sized>(
        mut self,
        pairs: &[TrainingPair],
        epochs: usize,
        batch_size: usize,
        learning_rate: f64,
        device: &B::Device,
        rng: &mut R,
    ) -> (Self, TrainingReport) {
        let batcher = TrackBatcher::<B>::new(device.clone());
        let loss_fn = MseLoss::new();
        let mut optimizer = AdamConfig::new().with_epsilon(ADAM_EPSILON).init();
        let mut order = pairs.to_vec();
        let mut report = TrainingReport { epoch_losses: Vec::with_capacity(epochs) };
        let denom = (pairs.len() * FEATURES) as f64;

        for epoch in 1..=epochs {
            order.shuffle(rng);
            let mut squared_error = 0.0;
            for chunk in order.chunks(batch_size) {
                let batch = batcher.batch(chunk.to_vec());
                let output = self.forward(batch.inputs);
                let loss = loss_fn.forward(output, batch.targets, Reduction::Mean);
                // back from the batch mean to a sum so epochs weigh every pair equally
                squared_error += loss.clone().into_scalar().elem::<f64>() * (chunk.len() * FEATURES) as f64;
                let grads = GradientsParams::from_grads(loss.backward(), &self);
                self = optimizer.step(learning_rate, self, grads);
            }
            let loss = squared_error / denom;
            event!("epoch {epoch}/{epochs}: loss {loss:.6}");
            report.epoch_losses.push(loss);
        }
        (self, report)
    }
}
