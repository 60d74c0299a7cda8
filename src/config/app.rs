//! # Application Configuration Loader
//!
//! Unified loader for the settings the CSRF layer needs: HTTP body limits
//! and the CSRF configuration itself.
//!
//! Automatically loads `.env` files for non-production environments.
//! It checks for a custom `DOTENV_FILE` path first, then falls back to
//! `.env.{APP_ENV}` or `.env`.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `APP_ENV` | Current environment (`development`, `production`, etc.) | `"development"` |
//! | `DOTENV_FILE` | Optional path to a custom dotenv file | *none* |
//! | `HTTP_MAX_BODY_BYTES` | Maximum buffered request body (bytes) | derived from `HTTP_MAX_BODY_MB` |
//! | `HTTP_MAX_BODY_MB` | Max body size in megabytes (if bytes not set) | `5` |
//! | `CANONICAL_HOST` | Host named in cookie rejection messages | `"localhost"` |
//! | `CSRF_*` | See [`CsrfConfig`](crate::config::csrf::CsrfConfig) | |
//!
//! # Example
//! ```rust,no_run
//! use csrf_gate::config::app::AppConfig;
//!
//! let cfg = AppConfig::from_env();
//! let guard = cfg.build_guard();
//! ```

use std::env;

use tracing::debug;

use crate::config::{csrf::CsrfConfig, env::read_u32, web::HttpConfig};
use crate::csrf::guard::CsrfGuard;

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// CSRF token, cookie and exemption settings.
    pub csrf: CsrfConfig,
}

impl AppConfig {
    /// Loads application configuration from environment variables.
    ///
    /// ## Behavior
    /// - Reads `APP_ENV` (defaults to `"development"`).
    /// - Loads `.env` or `.env.{APP_ENV}` for non-production environments.
    /// - Parses all supported environment variables and falls back to defaults.
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        if app_env != "production" {
            if let Ok(path) = env::var("DOTENV_FILE") {
                let _ = dotenvy::from_filename(path);
            } else {
                let candidate = format!(".env.{app_env}");
                dotenvy::from_filename(&candidate)
                    .or_else(|_| dotenvy::dotenv())
                    .ok();
            }
        }

        let max_body_bytes = env::var("HTTP_MAX_BODY_BYTES")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or_else(|| (read_u32("HTTP_MAX_BODY_MB", 5) as usize) * 1024 * 1024);

        let csrf = CsrfConfig::from_env();
        debug!(
            "CSRF config: host={} token_length={} exempt_prefixes={:?} exempt_paths={:?}",
            csrf.canonical_host, csrf.token_length, csrf.exempt_prefixes, csrf.exempt_paths
        );

        AppConfig {
            http: HttpConfig { max_body_bytes },
            csrf,
        }
    }

    /// Builds a [`CsrfGuard`] wired with the system clock, the default
    /// random token generator and this configuration's body limit.
    pub fn build_guard(&self) -> CsrfGuard {
        CsrfGuard::new(self.csrf.clone()).with_body_limit(self.http.max_body_bytes)
    }
}
