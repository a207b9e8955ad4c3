use super::http_response::{response_common, tle};

pub mod request_common;
pub mod tle_get;
