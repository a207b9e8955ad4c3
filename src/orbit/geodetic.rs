use chrono::{DateTime, Utc};
use std::f64::consts::PI;

/// WGS-84 flattening factor.
const FLAT_FACTOR: f64 = 1.0 / 298.257_223_563;
/// Convergence bound of the iterative latitude solution, in radians.
const LAT_TOLERANCE: f64 = 1e-10;
const MAX_LAT_ITERATIONS: usize = 10;

/// Geodetic position on the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geodetic {
    /// Geodetic latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees within `[-180, 180)`, positive east.
    pub longitude: f64,
    /// Height above the ellipsoid in kilometers.
    pub altitude: f64,
}

impl Geodetic {
    /// Converts a TEME position (km) at `instant` into the sub-satellite point.
    ///
    /// The TEME frame is rotated into the earth-fixed frame by the Greenwich
    /// sidereal angle; polar motion is ignored. Latitude is then solved
    /// iteratively on the WGS-84 ellipsoid.
    pub fn from_teme(position: &[f64; 3], instant: &DateTime<Utc>) -> Self {
        let sidereal = greenwich_sidereal(instant);
        let e2 = FLAT_FACTOR * (2.0 - FLAT_FACTOR);
        let [x, y, z] = *position;

        let theta = y.atan2(x);
        let r = x.hypot(y);
        let lon = wrap_neg_pos_pi(theta - sidereal);

        let mut lat = z.atan2(r);
        for _ in 0..MAX_LAT_ITERATIONS {
            let phi = lat;
            let c = 1.0 / (1.0 - e2 * phi.sin() * phi.sin()).sqrt();
            lat = (z + sgp4::WGS84.ae * c * e2 * phi.sin()).atan2(r);
            if (lat - phi).abs() < LAT_TOLERANCE {
                break;
            }
        }
        // stays finite over the poles, unlike r / cos(lat)
        let alt =
            r * lat.cos() + z * lat.sin() - sgp4::WGS84.ae * (1.0 - e2 * lat.sin().powi(2)).sqrt();

        Self { latitude: lat.to_degrees(), longitude: lon.to_degrees(), altitude: alt }
    }
}

/// Greenwich mean sidereal angle in radians for `instant`.
pub(super) fn greenwich_sidereal(instant: &DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&instant.naive_utc()))
}

/// Wraps an angle into `[-PI, PI)`.
fn wrap_neg_pos_pi(a: f64) -> f64 { (a + PI).rem_euclid(2.0 * PI) - PI }
