//! # CSRF Middleware
//!
//! Runs the CSRF pipeline around every request of an axum [`Router`]:
//!
//! 1. resolve the token (exempt paths skip everything below)
//! 2. decide, reading the body only for POST requests that get as far as
//!    the token comparison
//! 3. on success, expose the [`SessionCsrfState`] to handlers through the
//!    request extensions and run the handler
//! 4. write the token cookie on the response, rejected responses included,
//!    so a client that lacked the cookie can simply retry
//!
//! # Example
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use axum::{Router, routing::{get, post}};
//! use csrf_gate::config::app::AppConfig;
//! use csrf_gate::web::{handler::csrf_token_handler, middleware::protect};
//!
//! let guard = Arc::new(AppConfig::from_env().build_guard());
//! let app: Router = protect(
//!     Router::new()
//!         .route("/csrf", get(csrf_token_handler))
//!         .route("/pay", post(|| async { "paid" })),
//!     guard,
//! );
//! ```

use std::error::Error as StdError;
use std::iter::successors;
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    extract::{Request, State},
    http::{Method, header::CONTENT_LENGTH, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use http_body_util::LengthLimitError;
use tracing::{debug, warn};

use crate::csrf::context::{RequestBody, RequestContext, SessionCsrfState};
use crate::csrf::guard::CsrfGuard;
use crate::csrf::resolver::Resolution;
use crate::csrf::validator::ValidationOutcome;
use crate::error::body::BodyError;
use crate::web::body::parse_fields;

/// Installs [`csrf_middleware`] on `router`.
pub fn protect<S>(router: Router<S>, guard: Arc<CsrfGuard>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(guard, csrf_middleware))
}

/// Axum middleware enforcing double-submit-cookie CSRF protection.
///
/// Use with [`axum::middleware::from_fn_with_state`] and an
/// `Arc<CsrfGuard>`, or through [`protect`].
pub async fn csrf_middleware(
    State(guard): State<Arc<CsrfGuard>>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let mut ctx = RequestContext::from_parts(&parts);

    let state = match guard.resolver().resolve(&ctx) {
        Resolution::Exempt => return next.run(Request::from_parts(parts, body)).await,
        Resolution::Active(state) => state,
    };
    let jar = ctx.cookies.clone();

    let mut body = body;
    let outcome = match guard.validator().precheck(&ctx, &state) {
        Some(outcome) => outcome,
        None => {
            if ctx.method == Method::POST {
                let bytes = match buffer_body(&parts, body, guard.body_limit()).await {
                    Ok(bytes) => bytes,
                    Err(err) => return body_failure(&guard, jar, &state, &ctx, err),
                };
                ctx.body = match parse_fields(&parts.headers, bytes.clone()).await {
                    Ok(fields) => RequestBody::ParsedFields(fields),
                    Err(BodyError::UnknownContentType(ct)) => {
                        debug!("CSRF: cannot read fields from {:?} body, using header", ct);
                        RequestBody::Unparseable
                    }
                    Err(err) => return body_failure(&guard, jar, &state, &ctx, err),
                };
                body = Body::from(bytes);
            }
            guard.validator().compare_submitted(&ctx, &state)
        }
    };

    if let ValidationOutcome::Rejected(rejection) = outcome {
        warn!(
            "CSRF check failed: {} {} ({})",
            ctx.method,
            ctx.path,
            rejection.reason()
        );
        return (guard.attach(jar, Some(&state)), rejection).into_response();
    }

    parts.extensions.insert(state.clone());
    let response = next.run(Request::from_parts(parts, body)).await;

    (guard.attach(jar, Some(&state)), response).into_response()
}

/// Reads the whole body, refusing anything larger than `limit`.
async fn buffer_body(parts: &Parts, body: Body, limit: usize) -> Result<Bytes, BodyError> {
    let declared = parts
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<usize>().ok());
    if declared.is_some_and(|n| n > limit) {
        return Err(BodyError::TooLarge { limit });
    }

    to_bytes(body, limit).await.map_err(|e| {
        if exceeds_limit(&e) {
            BodyError::TooLarge { limit }
        } else {
            BodyError::Unreadable(e.to_string())
        }
    })
}

fn exceeds_limit(err: &(dyn StdError + 'static)) -> bool {
    successors(Some(err), |&e| e.source()).any(|e| e.is::<LengthLimitError>())
}

fn body_failure(
    guard: &CsrfGuard,
    jar: CookieJar,
    state: &SessionCsrfState,
    ctx: &RequestContext,
    err: BodyError,
) -> Response {
    warn!("CSRF: request body rejected: {} {} ({})", ctx.method, ctx.path, err);
    (guard.attach(jar, Some(state)), err).into_response()
}
