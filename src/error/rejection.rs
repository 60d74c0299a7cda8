use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Reason a state-changing request failed the CSRF check.
///
/// Every variant maps to `403 Forbidden`; the `Display` text is the
/// message shown to the user. CSRF failures are never transient, so the
/// request is aborted rather than retried.
///
/// # Example
/// ```
/// use csrf_gate::error::rejection::CsrfRejection;
///
/// let err = CsrfRejection::TokenMismatch;
/// assert_eq!(err.to_string(), "The anti-CSRF tokens don't match.");
/// assert_eq!(err.status().as_u16(), 403);
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CsrfRejection {
    /// The client sent no usable `csrf_token` cookie, so a fresh token was
    /// minted that it has not had a chance to echo back.
    #[error(
        "A security check has failed. Please make sure your browser is configured \
         to allow cookies for {canonical_host}, then try again."
    )]
    MissingCookieToken { canonical_host: String },

    /// Neither the body field nor the `X-CSRF-TOKEN` header carried a token.
    #[error("The X-CSRF-TOKEN header is missing.")]
    MissingSubmittedToken,

    /// A token was submitted but does not equal the cookie token.
    #[error("The anti-CSRF tokens don't match.")]
    TokenMismatch,
}

impl CsrfRejection {
    pub fn status(&self) -> StatusCode {
        StatusCode::FORBIDDEN
    }

    /// Short, stable reason used in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingCookieToken { .. } => "missing/invalid cookie for CSRF",
            Self::MissingSubmittedToken => "missing X-CSRF-TOKEN header",
            Self::TokenMismatch => "token mismatch",
        }
    }
}

impl IntoResponse for CsrfRejection {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
