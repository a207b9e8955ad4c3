use super::dataset::{MinMaxScaler, TrackBatcher, training_pairs};
use super::model::{FEATURES, TrackModel};
use super::{PredictionError, Predictor, PredictorConfig};
use crate::orbit::{GroundTrackSample, hourly_instants};
use burn::backend::ndarray::NdArrayDevice;
use burn::backend::{Autodiff, NdArray};
use burn::data::dataloader::batcher::Batcher;
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Smooth synthetic track resembling an inclined orbit sampled once per hour.
fn synthetic_track(count: u32) -> Vec<GroundTrackSample> {
    let date = NaiveDate::from_ymd_opt(2025, 2, 16).unwrap();
    hourly_instants(date, count)
        .into_iter()
        .enumerate()
        .map(|(i, timestamp)| {
            let t = i as f64;
            GroundTrackSample {
                timestamp,
                latitude: 51.6 * (0.7 * t).sin(),
                longitude: (-170.0 + 14.5 * t + 180.0).rem_euclid(360.0) - 180.0,
                altitude: 420.0,
            }
        })
        .collect()
}

fn seeded(seed: u64) -> PredictorConfig { PredictorConfig { seed: Some(seed), ..Default::default() } }

#[test]
fn test_training_pair_count() {
    let track = synthetic_track(24);
    let pairs = training_pairs(&track);
    assert_eq!(pairs.len(), 23);
    for (pair, window) in pairs.iter().zip(track.windows(2)) {
        assert_eq!(pair.input, window[0].lat_lon());
        assert_eq!(pair.target, window[1].lat_lon());
    }
    assert!(training_pairs(&track[..1]).is_empty());
    assert!(training_pairs(&[]).is_empty());
}

#[test]
fn test_scaler_roundtrip_and_range() {
    let pairs = training_pairs(&synthetic_track(24));
    let scaler = MinMaxScaler::fit(&pairs);
    for pair in &pairs {
        let (a, b) = scaler.transform(pair.input);
        assert!((0.0..=1.0).contains(&a) && (0.0..=1.0).contains(&b));
        let back = scaler.inverse((a, b));
        assert!((back.0 - pair.input.0).abs() < 1e-9);
        assert!((back.1 - pair.input.1).abs() < 1e-9);
    }
}

#[test]
fn test_not_enough_samples() {
    let predictor = Predictor::new(seeded(1));
    let track = synthetic_track(1);
    assert_eq!(predictor.run(&track).unwrap_err(), PredictionError::NotEnoughSamples(1));
    assert_eq!(predictor.run(&[]).unwrap_err(), PredictionError::NotEnoughSamples(0));
}

#[test]
fn test_zero_batch_size() {
    let predictor = Predictor::new(PredictorConfig { batch_size: 0, ..seeded(1) });
    assert_eq!(predictor.run(&synthetic_track(24)).unwrap_err(), PredictionError::InvalidBatchSize);
}

#[test]
fn test_default_run_reports_every_epoch() {
    let forecast = Predictor::new(seeded(3)).run(&synthetic_track(24)).unwrap();
    assert_eq!(forecast.report.epoch_losses.len(), 100);
    assert!(forecast.report.epoch_losses.iter().all(|l| l.is_finite()));
    assert!(forecast.point.latitude.is_finite());
    assert!(forecast.point.longitude.is_finite());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let track = synthetic_track(24);
    let config = PredictorConfig { epochs: 10, ..seeded(11) };
    let first = Predictor::new(config.clone()).run(&track).unwrap();
    let second = Predictor::new(config).run(&track).unwrap();
    assert_eq!(first.point, second.point);
    assert_eq!(first.report, second.report);
}

#[test]
fn test_scaled_training_reduces_loss() {
    let config = PredictorConfig { scale_features: true, ..seeded(5) };
    let forecast = Predictor::new(config).run(&synthetic_track(24)).unwrap();
    let losses = &forecast.report.epoch_losses;
    assert!(losses.last().unwrap() < losses.first().unwrap(), "{losses:?}");
}

#[test]
fn test_overflowing_coordinates_are_unstable() {
    let track: Vec<GroundTrackSample> = synthetic_track(24)
        .into_iter()
        .map(|sample| GroundTrackSample { latitude: 1e200, ..sample })
        .collect();
    let config = PredictorConfig { epochs: 2, ..seeded(4) };
    let res = Predictor::new(config).run(&track);
    assert!(matches!(res, Err(PredictionError::NumericalInstability(loss)) if !loss.is_finite()), "{res:?}");
}

#[test]
fn test_batcher_shapes() {
    let pairs = training_pairs(&synthetic_track(4));
    let batch = TrackBatcher::<NdArray>::new(NdArrayDevice::default()).batch(pairs.clone());
    assert_eq!(batch.inputs.dims(), [3, 1, FEATURES]);
    assert_eq!(batch.targets.dims(), [3, FEATURES]);
    let inputs: Vec<f64> = batch.inputs.into_data().iter::<f64>().collect();
    assert!((inputs[2] - pairs[1].input.0).abs() < 1e-4);
    assert!((inputs[3] - pairs[1].input.1).abs() < 1e-4);
}

#[test]
fn test_model_fit_single_pair() {
    let device = NdArrayDevice::default();
    let mut rng = StdRng::seed_from_u64(9);
    let model = TrackModel::<Autodiff<NdArray>>::new(8, &device, &mut rng);
    let pairs = training_pairs(&synthetic_track(2));
    let before = model.predict(pairs[0].input, &device);
    let (model, report) = model.fit(&pairs, 5, 4, 0.01, &device, &mut rng);
    assert_eq!(report.epoch_losses.len(), 5);
    assert_ne!(model.predict(pairs[0].input, &device), before);
}
