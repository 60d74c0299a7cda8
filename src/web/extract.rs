use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{StatusCode, request::Parts},
};

use crate::csrf::context::SessionCsrfState;
use crate::csrf::token::CsrfToken;

/// The token resolved by [`csrf_middleware`] for the current request.
///
/// Handlers use it to embed the token in rendered forms. Extracting it on a
/// route the middleware does not cover, or on an exempt path, is a wiring
/// error and yields `500`; use `Option<CurrentCsrfToken>` where the token
/// may legitimately be absent.
///
/// [`csrf_middleware`]: crate::web::middleware::csrf_middleware
#[derive(Clone, Debug)]
pub struct CurrentCsrfToken(pub CsrfToken);

fn from_extensions(parts: &Parts) -> Option<CurrentCsrfToken> {
    parts
        .extensions
        .get::<SessionCsrfState>()
        .map(|state| CurrentCsrfToken(state.token().clone()))
}

impl<S> FromRequestParts<S> for CurrentCsrfToken
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        from_extensions(parts).ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "CSRF token not available for this route",
        ))
    }
}

impl<S> OptionalFromRequestParts<S> for CurrentCsrfToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(from_extensions(parts))
    }
}
