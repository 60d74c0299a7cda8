//! # HTTP Configuration
//!
//! HTTP-layer limits used by the CSRF middleware when it has to buffer a
//! request body to look for a submitted token.
//!
//! # Examples
//! ```rust
//! use csrf_gate::config::web::HttpConfig;
//!
//! let http = HttpConfig { max_body_bytes: 10 * 1024 * 1024 };
//! assert!(http.max_body_bytes > 1_000_000);
//! ```

/// Default body limit: 5 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// HTTP-related configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpConfig {
    /// Largest request body the middleware will buffer. Larger POST bodies
    /// that need a token lookup are answered with `413 Payload Too Large`.
    pub max_body_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
