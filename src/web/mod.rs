//! axum integration: middleware, body decoding, extractor and token endpoint.

pub mod body;
pub mod extract;
pub mod handler;
pub mod middleware;
