use super::response_common::HTTPResponseType;
use strum_macros::Display;

/// Describes a single request against the TLE provider.
///
/// Implementors only declare where and how a request goes; sending is done
/// by [`HTTPClient::send_request`](crate::http_handler::http_client::HTTPClient::send_request).
pub(crate) trait HTTPRequestType {
    /// Type of the expected response.
    type Response: HTTPResponseType;
    /// `str` object representing the specific endpoint.
    fn endpoint(&self) -> &'static str;
    /// The corresponding HTTP Request Method.
    fn request_method(&self) -> reqwest::Method;
    /// Query parameters appended to the endpoint URL.
    fn query_params(&self) -> Vec<(&'static str, String)> { Vec::new() }
    /// Additional header parameters.
    fn header_params(&self) -> reqwest::header::HeaderMap { reqwest::header::HeaderMap::new() }
}

#[derive(Debug, Display)]
pub enum RequestError {
    /// Base URL and endpoint did not form a valid URL, carries the parser message.
    InvalidUrl(String),
    FailedToSend,
    Timeout,
    NoConnection,
}

impl std::error::Error for RequestError {}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            RequestError::Timeout
        } else if value.is_connect() {
            RequestError::NoConnection
        } else {
            RequestError::FailedToSend
        }
    }
}

