use super::common::HTTPError;
use super::http_request::request_common::{HTTPRequestType, RequestError};
use super::http_response::response_common::HTTPResponseType;
use std::time::Duration;

/// A simple wrapper around `reqwest::Client` used to manage HTTP requests
/// with a preconfigured base URL.
///
/// This client is used for the single TLE download of a pipeline run.
/// No retry is performed and, unless a timeout is given, a stalled server
/// blocks the request indefinitely.
#[derive(Debug)]
pub(crate) struct HTTPClient {
    /// The underlying `reqwest::Client` used to perform HTTP requests.
    client: reqwest::Client,
    /// Base URL of the provider, prepended to all endpoint paths.
    base_url: String,
}

impl HTTPClient {
    /// Constructs a new `HTTPClient` with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` – The root URL for all HTTP requests (e.g., `"https://celestrak.org"`).
    /// * `timeout` – Optional request timeout, `None` waits indefinitely.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub(crate) fn new(base_url: &str, timeout: Option<Duration>) -> Result<HTTPClient, HTTPError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().map_err(RequestError::from)?;
        Ok(HTTPClient { client, base_url: String::from(base_url.trim_end_matches('/')) })
    }

    /// Returns the base URL that the client was initialized with.
    pub(crate) fn url(&self) -> &str { self.base_url.as_str() }

    /// Builds the full URL (endpoint and query) for `request`.
    pub(crate) fn request_url<T: HTTPRequestType>(
        &self,
        request: &T,
    ) -> Result<reqwest::Url, RequestError> {
        let raw = format!("{}{}", self.base_url, request.endpoint());
        reqwest::Url::parse_with_params(&raw, request.query_params())
            .map_err(|e| RequestError::InvalidUrl(e.to_string()))
    }

    /// Sends `request` and parses the response according to its response type.
    ///
    /// # Errors
    /// Returns a [`HTTPError`] if the URL is invalid, the request cannot be sent,
    /// the provider answers with a non-success status or the body cannot be read.
    pub(crate) async fn send_request<T: HTTPRequestType>(
        &self,
        request: T,
    ) -> Result<<T::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let url = self.request_url(&request)?;
        let response = self
            .client
            .request(request.request_method(), url)
            .headers(request.header_params())
            .send()
            .await
            .map_err(RequestError::from)?;
        Ok(<T::Response as HTTPResponseType>::read_response(response).await?)
    }
}
