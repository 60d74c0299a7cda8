//! Double-submit-cookie CSRF protection.
//!
//! A request flows through three components:
//!
//! - [`resolver::TokenResolver`] picks the active token (or exempts the request)
//! - [`validator::RequestValidator`] checks unsafe requests echo it back
//! - [`writer::ResponseCookieWriter`] stores it in the response cookie
//!
//! [`guard::CsrfGuard`] wires the three together; the axum integration
//! lives in [`crate::web::middleware`].

pub mod context;
pub mod guard;
pub mod resolver;
pub mod token;
pub mod validator;
pub mod writer;
