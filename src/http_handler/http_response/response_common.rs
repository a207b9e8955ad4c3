use strum_macros::Display;

/// Response types whose body is read as plain UTF-8 text.
pub(crate) trait PlainTextBodyHTTPResponseType: HTTPResponseType {
    async fn parse_text_body(response: reqwest::Response) -> Result<String, ResponseError> {
        Ok(response.text().await?)
    }
}

pub(crate) trait HTTPResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status.is_server_error() {
            Err(ResponseError::InternalServer(status.as_u16()))
        } else if status.is_client_error() {
            Err(ResponseError::BadRequest(status.as_u16()))
        } else {
            Err(ResponseError::Unknown)
        }
    }
}

#[derive(Debug, Display)]
pub enum ResponseError {
    InternalServer(u16),
    BadRequest(u16),
    NoConnection,
    InvalidBody,
    Unknown,
}

impl std::error::Error for ResponseError {}
impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() || value.is_body() {
            ResponseError::InvalidBody
        } else if value.is_connect() || value.is_timeout() {
            ResponseError::NoConnection
        } else {
            ResponseError::Unknown
        }
    }
}
