//! # csrf_gate
//!
//! Double-submit-cookie CSRF protection for [axum](https://crates.io/crates/axum)
//! applications.
//!
//! A token is issued in a script-readable `csrf_token` cookie; every
//! state-changing request must echo it back in a `csrf_token` body field or
//! an `X-CSRF-TOKEN` header. Safe methods, exempt path prefixes (`/assets/`,
//! `/callbacks/`) and the `/migrate` carve-out are never rejected.
//!
//! - Configuration (`config`)
//! - Token resolution, validation and cookie writing (`csrf`)
//! - axum middleware, extractor and token endpoint (`web`)
//!
//! ## Example usage (in another crate)
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use csrf_gate::axum::{Router, routing::post};
//! use csrf_gate::config::app::AppConfig;
//! use csrf_gate::web::middleware::protect;
//!
//! let guard = Arc::new(AppConfig::from_env().build_guard());
//! let app: Router = protect(Router::new().route("/pay", post(|| async { "ok" })), guard);
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use axum;
pub use axum_extra;
pub use dotenvy;
pub use rand;
pub use serde;
pub use serde_json;
pub use subtle;
pub use time;
pub use tokio;

// ===============================
// Public modules
// ===============================
pub mod clock;
pub mod config;
pub mod crypto;
pub mod csrf;
pub mod error;
pub mod web;
