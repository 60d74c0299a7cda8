use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::clock::Clock;
use crate::config::csrf::CsrfConfig;
use crate::csrf::context::SessionCsrfState;

/// Stores the resolved token in the outgoing `csrf_token` cookie.
pub struct ResponseCookieWriter {
    cfg: Arc<CsrfConfig>,
    clock: Arc<dyn Clock>,
}

impl ResponseCookieWriter {
    pub fn new(cfg: Arc<CsrfConfig>, clock: Arc<dyn Clock>) -> Self {
        Self { cfg, clock }
    }

    /// Adds the token cookie to `jar`, or returns `jar` unchanged when no
    /// token was resolved (exempt requests).
    ///
    /// The cookie expires `timeout` from now and is deliberately **not**
    /// `HttpOnly`: script has to read it to send the token with XHR/fetch.
    pub fn attach(&self, jar: CookieJar, state: Option<&SessionCsrfState>) -> CookieJar {
        let Some(state) = state else {
            return jar;
        };

        let cookie = Cookie::build((
            self.cfg.cookie_name.clone(),
            state.token().as_str().to_owned(),
        ))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(self.cfg.cookie_secure)
        .http_only(false)
        .expires(self.clock.now() + self.cfg.timeout)
        .build();

        jar.add(cookie)
    }
}
