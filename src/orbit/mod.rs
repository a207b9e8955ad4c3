mod geodetic;
mod ground_track;
mod propagator;
mod tle;
#[cfg(test)]
mod tests;

pub use geodetic::Geodetic;
pub use ground_track::{GroundTrackSample, hourly_instants};
pub use propagator::{PropagationError, Propagator};
pub use tle::{TleParseError, TleRecord};
