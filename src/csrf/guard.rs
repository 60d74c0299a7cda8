use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;

use crate::clock::{Clock, SystemClock};
use crate::config::csrf::CsrfConfig;
use crate::config::web::DEFAULT_MAX_BODY_BYTES;
use crate::csrf::context::{RequestContext, SessionCsrfState};
use crate::csrf::resolver::{Resolution, TokenResolver};
use crate::csrf::token::{RandomTokenGenerator, TokenGenerator};
use crate::csrf::validator::{RequestValidator, ValidationOutcome};
use crate::csrf::writer::ResponseCookieWriter;

/// The three CSRF components wired to one configuration.
///
/// Built once at startup and shared (behind an `Arc`) by every request.
///
/// # Example
/// ```rust
/// use axum::http::Method;
/// use csrf_gate::config::csrf::CsrfConfig;
/// use csrf_gate::csrf::{context::RequestContext, guard::CsrfGuard};
///
/// let guard = CsrfGuard::new(CsrfConfig::default());
/// let ctx = RequestContext::new(Method::GET, &"/".parse().unwrap());
///
/// let (state, outcome) = guard.check(&ctx);
/// assert!(outcome.is_allowed());
/// assert!(state.is_some());
/// ```
pub struct CsrfGuard {
    resolver: TokenResolver,
    validator: RequestValidator,
    writer: ResponseCookieWriter,
    body_limit: usize,
}

impl CsrfGuard {
    /// Creates a guard using [`RandomTokenGenerator`] and [`SystemClock`].
    pub fn new(cfg: CsrfConfig) -> Self {
        Self::with_parts(cfg, Arc::new(RandomTokenGenerator), Arc::new(SystemClock))
    }

    pub fn with_parts(
        cfg: CsrfConfig,
        generator: Arc<dyn TokenGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cfg = Arc::new(cfg);
        Self {
            resolver: TokenResolver::new(Arc::clone(&cfg), generator),
            validator: RequestValidator::new(Arc::clone(&cfg)),
            writer: ResponseCookieWriter::new(cfg, clock),
            body_limit: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Sets the largest body the middleware buffers for a token lookup.
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn body_limit(&self) -> usize {
        self.body_limit
    }

    pub fn resolver(&self) -> &TokenResolver {
        &self.resolver
    }

    pub fn validator(&self) -> &RequestValidator {
        &self.validator
    }

    pub fn writer(&self) -> &ResponseCookieWriter {
        &self.writer
    }

    /// Runs resolution and validation over a fully built context.
    ///
    /// Returns the state to hand to [`CsrfGuard::attach`] (`None` for exempt
    /// requests) together with the decision. For frameworks other than axum
    /// this is the whole request-side pipeline.
    pub fn check(&self, ctx: &RequestContext) -> (Option<SessionCsrfState>, ValidationOutcome) {
        match self.resolver.resolve(ctx) {
            Resolution::Exempt => (None, ValidationOutcome::Allowed),
            Resolution::Active(state) => {
                let outcome = self.validator.validate(ctx, &state);
                (Some(state), outcome)
            }
        }
    }

    pub fn attach(&self, jar: CookieJar, state: Option<&SessionCsrfState>) -> CookieJar {
        self.writer.attach(jar, state)
    }
}
