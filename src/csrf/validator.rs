use std::sync::Arc;

use axum::http::Method;

use crate::config::csrf::CsrfConfig;
use crate::crypto::compare::constant_time_compare;
use crate::csrf::context::{RequestContext, SessionCsrfState};
use crate::error::rejection::CsrfRejection;

/// Decision for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationOutcome {
    Allowed,
    Rejected(CsrfRejection),
}

impl ValidationOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn into_result(self) -> Result<(), CsrfRejection> {
        match self {
            Self::Allowed => Ok(()),
            Self::Rejected(rejection) => Err(rejection),
        }
    }
}

/// Checks that an unsafe request echoes the cookie token back.
///
/// Only called for requests the [`TokenResolver`] did not mark exempt.
/// The checks run in a fixed order and the first one that decides wins:
///
/// 1. safe method → allowed
/// 2. exempt path with an empty query string → allowed
/// 3. no valid cookie token → rejected
/// 4. submitted token from the POST body, else from the header; none → rejected
/// 5. constant-time comparison
///
/// [`TokenResolver`]: crate::csrf::resolver::TokenResolver
pub struct RequestValidator {
    cfg: Arc<CsrfConfig>,
}

impl RequestValidator {
    pub fn new(cfg: Arc<CsrfConfig>) -> Self {
        Self { cfg }
    }

    pub fn validate(&self, ctx: &RequestContext, state: &SessionCsrfState) -> ValidationOutcome {
        self.precheck(ctx, state)
            .unwrap_or_else(|| self.compare_submitted(ctx, state))
    }

    /// Steps 1 to 3. Returns `None` when the submitted token has to be
    /// looked at, which is the only case where the body matters.
    pub fn precheck(
        &self,
        ctx: &RequestContext,
        state: &SessionCsrfState,
    ) -> Option<ValidationOutcome> {
        if self.cfg.is_safe_method(&ctx.method) {
            return Some(ValidationOutcome::Allowed);
        }
        if self.cfg.is_exempt_path(&ctx.path) && !ctx.has_query {
            return Some(ValidationOutcome::Allowed);
        }
        if !state.had_valid_cookie_token() {
            return Some(ValidationOutcome::Rejected(
                CsrfRejection::MissingCookieToken {
                    canonical_host: self.cfg.canonical_host.clone(),
                },
            ));
        }
        None
    }

    /// Steps 4 and 5.
    ///
    /// Only POST bodies are searched; other methods go straight to the
    /// header.
    pub fn compare_submitted(
        &self,
        ctx: &RequestContext,
        state: &SessionCsrfState,
    ) -> ValidationOutcome {
        let mut submitted = String::new();
        if ctx.method == Method::POST {
            if let Some(v) = ctx.body.field(&self.cfg.form_field) {
                submitted = v.to_owned();
            }
        }

        if submitted.is_empty() {
            submitted = ctx
                .headers
                .get(&self.cfg.header_name)
                .map(|v| decode_ascii_lossy(v.as_bytes()))
                .unwrap_or_default();
            if submitted.is_empty() {
                return ValidationOutcome::Rejected(CsrfRejection::MissingSubmittedToken);
            }
        }

        if constant_time_compare(&submitted, state.token().as_str()) {
            ValidationOutcome::Allowed
        } else {
            ValidationOutcome::Rejected(CsrfRejection::TokenMismatch)
        }
    }
}

/// Decodes bytes as ASCII, replacing every non-ASCII byte with U+FFFD.
fn decode_ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { char::from(b) } else { char::REPLACEMENT_CHARACTER })
        .collect()
}
