use crate::prediction::PredictorConfig;
use chrono::NaiveDate;
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use strum_macros::Display;

const DEFAULT_TLE_BASE_URL: &str = "https://celestrak.org";
/// NORAD catalog number of the ISS.
const DEFAULT_CATALOG_NUMBER: u32 = 25544;
const DEFAULT_TRACK_DATE: (i32, u32, u32) = (2025, 2, 16);
/// One sample per hour of the track date.
const DEFAULT_SAMPLE_COUNT: u32 = 24;
const DEFAULT_OUTPUT_PATH: &str = "satellite_track.html";

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment override could not be parsed.
    InvalidValue { key: &'static str, value: String },
}

impl std::error::Error for ConfigError {}

/// All parameters of a pipeline run.
///
/// Defaults reproduce the fixed values of a plain run; every field with an
/// environment key can be overridden without touching the source.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// `TRACK_TLE_BASE_URL`
    pub tle_base_url: String,
    /// `TRACK_CATNR`
    pub catalog_number: u32,
    /// `TRACK_DATE`, formatted `YYYY-MM-DD`
    pub track_date: NaiveDate,
    pub sample_count: u32,
    /// `TRACK_HTTP_TIMEOUT_SECS`, unset waits indefinitely
    pub request_timeout: Option<Duration>,
    /// `TRACK_EPOCHS`, `TRACK_BATCH_SIZE`, `TRACK_SEED`, `TRACK_SCALE_FEATURES`
    pub predictor: PredictorConfig,
    /// `TRACK_OUTPUT`
    pub output_path: PathBuf,
    /// `TRACK_OPEN_BROWSER`
    pub open_browser: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let (y, m, d) = DEFAULT_TRACK_DATE;
        Self {
            tle_base_url: String::from(DEFAULT_TLE_BASE_URL),
            catalog_number: DEFAULT_CATALOG_NUMBER,
            track_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            sample_count: DEFAULT_SAMPLE_COUNT,
            request_timeout: None,
            predictor: PredictorConfig::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            open_browser: true,
        }
    }
}

impl PipelineConfig {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for the first override that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| env::var(key).ok()) }

    /// Builds the configuration from an arbitrary key lookup, falling back to the defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for the first override that does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let predictor = PredictorConfig {
            epochs: parse_var(&lookup, "TRACK_EPOCHS", defaults.predictor.epochs)?,
            batch_size: parse_var(&lookup, "TRACK_BATCH_SIZE", defaults.predictor.batch_size)?,
            seed: parse_optional(&lookup, "TRACK_SEED")?,
            scale_features: parse_flag(
                &lookup,
                "TRACK_SCALE_FEATURES",
                defaults.predictor.scale_features,
            )?,
            ..defaults.predictor
        };
        if predictor.batch_size == 0 {
            return Err(ConfigError::InvalidValue { key: "TRACK_BATCH_SIZE", value: "0".into() });
        }
        let timeout_secs: Option<u64> = parse_optional(&lookup, "TRACK_HTTP_TIMEOUT_SECS")?;

        Ok(Self {
            tle_base_url: lookup("TRACK_TLE_BASE_URL").unwrap_or(defaults.tle_base_url),
            catalog_number: parse_var(&lookup, "TRACK_CATNR", defaults.catalog_number)?,
            track_date: parse_var(&lookup, "TRACK_DATE", defaults.track_date)?,
            sample_count: defaults.sample_count,
            request_timeout: timeout_secs.map(Duration::from_secs),
            predictor,
            output_path: lookup("TRACK_OUTPUT").map_or(defaults.output_path, PathBuf::from),
            open_browser: parse_flag(&lookup, "TRACK_OPEN_BROWSER", defaults.open_browser)?,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}

fn parse_optional<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|raw| {
            raw.trim().parse().map_err(|_| ConfigError::InvalidValue { key, value: raw.clone() })
        })
        .transpose()
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value: raw }),
    }
}
