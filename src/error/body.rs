use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure to turn a request body into key-value fields.
///
/// [`BodyError::UnknownContentType`] is not fatal: the CSRF middleware
/// recovers from it by treating the body as carrying no token and falling
/// back to the header. The other variants end the request.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("unknown body content type: {0}")]
    UnknownContentType(String),

    #[error("malformed {content_type} body: {detail}")]
    Malformed {
        content_type: &'static str,
        detail: String,
    },

    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("request body could not be read: {0}")]
    Unreadable(String),
}

impl BodyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Malformed { .. } | Self::Unreadable(_) => StatusCode::BAD_REQUEST,
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for BodyError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
