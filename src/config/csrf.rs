//! # CSRF Configuration
//!
//! Settings for double-submit-cookie CSRF protection: token length, cookie
//! lifetime, the names of the cookie, form field and header that carry the
//! token, and the methods and paths that are never checked.
//!
//! The configuration reads from environment variables:
//! - `CANONICAL_HOST` — host named in the "enable cookies" rejection message (default: `localhost`)
//! - `CSRF_TOKEN_LENGTH` — token length in characters (default: `32`)
//! - `CSRF_TIMEOUT_DAYS` — cookie lifetime (default: `7`)
//! - `CSRF_EXEMPT_PREFIXES` — comma-separated path prefixes skipped entirely (default: `/assets/,/callbacks/`)
//! - `CSRF_EXEMPT_PATHS` — comma-separated paths allowed when the query string is empty (default: `/migrate`)
//! - `CSRF_COOKIE_SECURE` — enables the `Secure` cookie flag (default: `true`)
//!
//! The cookie is never `HttpOnly`: browser script has to read it to attach
//! the token to XHR/fetch requests.
//!
//! # Examples
//! ```rust
//! use csrf_gate::config::csrf::{CsrfConfig, TOKEN_LENGTH};
//!
//! let cfg = CsrfConfig::default();
//! assert_eq!(cfg.token_length, TOKEN_LENGTH);
//! assert!(cfg.is_exempt_prefix("/assets/app.css"));
//! ```

use std::env as std_env;

use axum::http::{HeaderName, Method};
use time::Duration;

use crate::config::env::{read_flag_from, read_list_from, read_u32_from};

/// Length of a CSRF token in characters.
pub const TOKEN_LENGTH: usize = 32;

/// Cookie name used to store the CSRF token.
pub const CSRF_COOKIE_NAME: &str = "csrf_token";

/// Form / JSON body field carrying the submitted token.
pub const CSRF_FORM_FIELD: &str = "csrf_token";

/// Request header carrying the submitted token (AJAX, PUT, DELETE...).
pub const CSRF_HEADER_NAME: HeaderName = HeaderName::from_static("x-csrf-token");

/// Cookie lifetime in days.
pub const CSRF_TIMEOUT_DAYS: u32 = 7;

/// Methods RFC 7231 defines as safe; these never need a submitted token.
pub const SAFE_METHODS: [Method; 4] = [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE];

/// Path prefixes for which no token is generated or checked.
///
/// Assets must not vary by cookie (it would bust caches), and callbacks are
/// machine-to-machine calls without a browser cookie.
pub const DEFAULT_EXEMPT_PREFIXES: [&str; 2] = ["/assets/", "/callbacks/"];

/// Paths whose unsafe requests are allowed when the query string is empty.
pub const DEFAULT_EXEMPT_PATHS: [&str; 1] = ["/migrate"];

/// Host used in the rejection message when `CANONICAL_HOST` is not set.
pub const DEFAULT_CANONICAL_HOST: &str = "localhost";

/// Configuration for CSRF protection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsrfConfig {
    pub token_length: usize,
    pub cookie_name: String,
    pub form_field: String,
    pub header_name: HeaderName,
    pub timeout: Duration,
    pub safe_methods: Vec<Method>,
    pub exempt_prefixes: Vec<String>,
    pub exempt_paths: Vec<String>,
    pub canonical_host: String,
    pub cookie_secure: bool,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            token_length: TOKEN_LENGTH,
            cookie_name: CSRF_COOKIE_NAME.to_owned(),
            form_field: CSRF_FORM_FIELD.to_owned(),
            header_name: CSRF_HEADER_NAME,
            timeout: Duration::days(i64::from(CSRF_TIMEOUT_DAYS)),
            safe_methods: SAFE_METHODS.to_vec(),
            exempt_prefixes: DEFAULT_EXEMPT_PREFIXES.iter().map(|s| (*s).to_owned()).collect(),
            exempt_paths: DEFAULT_EXEMPT_PATHS.iter().map(|s| (*s).to_owned()).collect(),
            canonical_host: DEFAULT_CANONICAL_HOST.to_owned(),
            cookie_secure: true,
        }
    }
}

impl CsrfConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std_env::var(k).ok())
    }

    /// Loads configuration using a custom key provider (for testing/mocking).
    ///
    /// Values that are missing or unparsable fall back to the defaults.
    /// A token length of zero is rejected the same way.
    pub fn from_env_with<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_length = match read_u32_from(&get, "CSRF_TOKEN_LENGTH", TOKEN_LENGTH as u32) {
            0 => TOKEN_LENGTH,
            n => n as usize,
        };
        let timeout_days = read_u32_from(&get, "CSRF_TIMEOUT_DAYS", CSRF_TIMEOUT_DAYS);

        let canonical_host = get("CANONICAL_HOST")
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CANONICAL_HOST.to_owned());

        Self {
            token_length,
            timeout: Duration::days(i64::from(timeout_days)),
            exempt_prefixes: read_list_from(&get, "CSRF_EXEMPT_PREFIXES", &DEFAULT_EXEMPT_PREFIXES),
            exempt_paths: read_list_from(&get, "CSRF_EXEMPT_PATHS", &DEFAULT_EXEMPT_PATHS),
            canonical_host,
            cookie_secure: read_flag_from(&get, "CSRF_COOKIE_SECURE", true),
            ..Self::default()
        }
    }

    /// Returns `true` if `path` lies under one of the exempt prefixes.
    pub fn is_exempt_prefix(&self, path: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Returns `true` if `path` is one of the carve-out paths.
    ///
    /// The caller still has to check that the query string is empty.
    pub fn is_exempt_path(&self, path: &str) -> bool {
        self.exempt_paths.iter().any(|p| p == path)
    }

    pub fn is_safe_method(&self, method: &Method) -> bool {
        self.safe_methods.contains(method)
    }
}
