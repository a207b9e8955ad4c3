use super::{Geodetic, GroundTrackSample, TleRecord};
use crate::{log, warn};
use chrono::{DateTime, TimeDelta, Utc};
use strum_macros::Display;

/// Element age beyond which a stale TLE is reported.
const STALE_EPOCH: TimeDelta = TimeDelta::seconds(14 * 86_400);

#[derive(Debug, Display)]
pub enum PropagationError {
    /// The element lines were rejected by the SGP4 parser.
    InvalidElements(String),
    /// The elements could not be turned into propagation constants.
    InvalidConstants(String),
    /// Propagation to the given instant failed (e.g. decayed orbit).
    PropagationFailed { instant: DateTime<Utc>, reason: String },
}

impl std::error::Error for PropagationError {}

/// SGP4 propagator for a single element set.
///
/// Validation of epoch freshness or physical plausibility is left entirely to
/// the SGP4 routines; a stale epoch is only logged.
pub struct Propagator {
    elements: sgp4::Elements,
    constants: sgp4::Constants,
}

impl Propagator {
    /// Initializes the SGP4 model from a parsed TLE record.
    ///
    /// # Errors
    /// Returns a [`PropagationError`] if the element lines fail checksum or field
    /// parsing, or if the derived constants are invalid.
    pub fn new(tle: &TleRecord) -> Result<Self, PropagationError> {
        let elements = sgp4::Elements::from_tle(
            Some(tle.name().to_string()),
            tle.line1().as_bytes(),
            tle.line2().as_bytes(),
        )
        .map_err(|e| PropagationError::InvalidElements(e.to_string()))?;
        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| PropagationError::InvalidConstants(e.to_string()))?;
        Ok(Self { elements, constants })
    }

    /// Epoch of the underlying element set.
    pub fn epoch(&self) -> DateTime<Utc> { self.elements.datetime.and_utc() }

    /// Propagates the element set to every instant and returns the sub-satellite points.
    ///
    /// The result has exactly one sample per instant, in the order given.
    ///
    /// # Errors
    /// Returns [`PropagationError::PropagationFailed`] for the first instant the
    /// SGP4 model cannot be evaluated at.
    pub fn ground_track(
        &self,
        instants: &[DateTime<Utc>],
    ) -> Result<Vec<GroundTrackSample>, PropagationError> {
        if let Some(first) = instants.first() {
            let age = *first - self.epoch();
            if age > STALE_EPOCH || age < -STALE_EPOCH {
                warn!(
                    "TLE epoch {} is {} days away from the requested track",
                    self.epoch().format("%Y-%m-%d %H:%M"),
                    age.num_days()
                );
            }
        }
        let track = instants
            .iter()
            .map(|instant| self.sample_at(instant))
            .collect::<Result<Vec<_>, _>>()?;
        log!("Propagated {} ground track samples", track.len());
        Ok(track)
    }

    fn sample_at(&self, instant: &DateTime<Utc>) -> Result<GroundTrackSample, PropagationError> {
        let failed = |reason: String| PropagationError::PropagationFailed { instant: *instant, reason };
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&instant.naive_utc())
            .map_err(|e| failed(e.to_string()))?;
        let prediction = self.constants.propagate(minutes).map_err(|e| failed(e.to_string()))?;
        let geo = Geodetic::from_teme(&prediction.position, instant);
        Ok(GroundTrackSample {
            timestamp: *instant,
            latitude: geo.latitude,
            longitude: geo.longitude,
            altitude: geo.altitude,
        })
    }
}
