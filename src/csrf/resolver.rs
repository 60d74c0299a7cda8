use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::csrf::CsrfConfig;
use crate::csrf::context::{RequestContext, SessionCsrfState};
use crate::csrf::token::{CsrfToken, TokenGenerator};
use crate::crypto::random::get_random_string;

/// Result of [`TokenResolver::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Path under an exempt prefix: no token, no validation, no cookie.
    Exempt,
    /// The token for this cycle, reused or freshly minted.
    Active(SessionCsrfState),
}

impl Resolution {
    pub fn state(&self) -> Option<&SessionCsrfState> {
        match self {
            Self::Exempt => None,
            Self::Active(state) => Some(state),
        }
    }
}

/// Decides whether a request is exempt and, if not, which token is active.
pub struct TokenResolver {
    cfg: Arc<CsrfConfig>,
    generator: Arc<dyn TokenGenerator>,
}

impl TokenResolver {
    pub fn new(cfg: Arc<CsrfConfig>, generator: Arc<dyn TokenGenerator>) -> Self {
        Self { cfg, generator }
    }

    /// Resolves the token for `ctx`.
    ///
    /// The exempt-prefix check comes first and short-circuits everything,
    /// including token generation. A `csrf_token` cookie of exactly
    /// `token_length` characters is reused; any other value is ignored and a
    /// new token is minted.
    pub fn resolve(&self, ctx: &RequestContext) -> Resolution {
        if self.cfg.is_exempt_prefix(&ctx.path) {
            debug!(path = %ctx.path, "CSRF: exempt path prefix");
            return Resolution::Exempt;
        }

        let length = self.cfg.token_length;
        let from_cookie = ctx
            .cookies
            .get(&self.cfg.cookie_name)
            .and_then(|c| CsrfToken::parse(c.value(), length));

        let state = match from_cookie {
            Some(token) => SessionCsrfState::reused(token),
            None => {
                debug!(path = %ctx.path, "CSRF: minted new token");
                SessionCsrfState::minted(self.mint(length))
            }
        };

        Resolution::Active(state)
    }

    /// Asks the generator for a token, replacing any output of the wrong
    /// length with a random alphanumeric one.
    fn mint(&self, length: usize) -> CsrfToken {
        let raw = self.generator.generate(length);
        CsrfToken::parse(&raw, length).unwrap_or_else(|| {
            warn!(
                expected = length,
                got = raw.chars().count(),
                "CSRF: generator returned a token of the wrong length"
            );
            CsrfToken::from_generated(get_random_string(length))
        })
    }
}
