use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header::CACHE_CONTROL},
};
use serde::Serialize;

use crate::web::extract::CurrentCsrfToken;

/// JSON response schema returned by [`csrf_token_handler`].
#[derive(Debug, Serialize)]
pub struct CsrfResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

/// Axum handler returning the current CSRF token as JSON.
///
/// Meant for single-page frontends that prefer fetching the token over
/// reading the cookie. The cookie itself is set by the middleware, which
/// must cover this route.
///
/// # Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use axum::{Router, routing::get};
/// use csrf_gate::config::csrf::CsrfConfig;
/// use csrf_gate::csrf::guard::CsrfGuard;
/// use csrf_gate::web::{handler::csrf_token_handler, middleware::protect};
///
/// let guard = Arc::new(CsrfGuard::new(CsrfConfig::default()));
/// let app: Router = protect(Router::new().route("/csrf", get(csrf_token_handler)), guard);
/// ```
pub async fn csrf_token_handler(
    CurrentCsrfToken(token): CurrentCsrfToken,
) -> (StatusCode, HeaderMap, Json<CsrfResponse>) {
    let mut headers = HeaderMap::new();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate"),
    );

    let json = Json(CsrfResponse {
        csrf_token: token.as_str().to_owned(),
    });

    (StatusCode::OK, headers, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csrf::token::CsrfToken;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn returns_token_as_uncacheable_json() {
        let token = CsrfToken::parse(&"Z".repeat(32), 32).unwrap();

        let response = csrf_token_handler(CurrentCsrfToken(token))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            "no-store, no-cache, must-revalidate"
        );
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::CONTENT_TYPE)
                .unwrap(),
            "application/json"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["csrfToken"], "Z".repeat(32));
    }
}
