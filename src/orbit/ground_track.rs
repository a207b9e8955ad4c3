use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;
use std::fmt::Display;

/// One sub-satellite point of the ground track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroundTrackSample {
    /// Instant the position was propagated to.
    pub timestamp: DateTime<Utc>,
    /// Geodetic latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees, `[-180, 180)`.
    pub longitude: f64,
    /// Height above the ellipsoid in kilometers.
    pub altitude: f64,
}

impl GroundTrackSample {
    /// `(latitude, longitude)` as fed to the predictor.
    pub fn lat_lon(&self) -> (f64, f64) { (self.latitude, self.longitude) }
}

impl Display for GroundTrackSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} lat {:.3} lon {:.3} alt {:.1} km",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.latitude,
            self.longitude,
            self.altitude
        )
    }
}

/// Returns `count` instants spaced one hour apart, starting at 00:00 UTC of `date`.
pub fn hourly_instants(date: NaiveDate, count: u32) -> Vec<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    (0..count).map(|h| midnight + TimeDelta::hours(i64::from(h))).collect()
}
