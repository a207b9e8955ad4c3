use crate::http_handler::http_response::response_common::{
    HTTPResponseType, PlainTextBodyHTTPResponseType, ResponseError,
};

/// Response type for the GP element endpoint in `FORMAT=tle`.
pub(crate) struct TleResponse {}

impl PlainTextBodyHTTPResponseType for TleResponse {}

impl HTTPResponseType for TleResponse {
    /// The raw three-line text block.
    type ParsedResponseType = String;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response).await?;
        Self::parse_text_body(resp).await
    }
}
