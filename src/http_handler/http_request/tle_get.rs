use super::request_common::HTTPRequestType;
use super::tle::TleResponse;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

/// Request type for the GP element endpoint of a `CelesTrak`-compatible provider.
#[derive(Debug)]
pub struct TleRequest {
    /// NORAD catalog number of the requested object.
    catalog_number: u32,
}

impl TleRequest {
    pub fn new(catalog_number: u32) -> Self { Self { catalog_number } }
}

impl HTTPRequestType for TleRequest {
    type Response = TleResponse;
    fn endpoint(&self) -> &'static str { "/NORAD/elements/gp.php" }
    fn request_method(&self) -> reqwest::Method { reqwest::Method::GET }
    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("CATNR", self.catalog_number.to_string()),
            ("FORMAT", String::from("tle")),
        ]
    }
    fn header_params(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/plain"));
        headers
    }
}
