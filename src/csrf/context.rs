//! Per-request data flowing through the CSRF pipeline.
//!
//! [`RequestContext`] is the read-only input, [`SessionCsrfState`] is what
//! the resolver produces and both the validator and the cookie writer
//! consume. Neither outlives a single request/response cycle.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    http::{HeaderMap, HeaderName, HeaderValue, Method, Uri, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::csrf::token::CsrfToken;

/// The body of a request, as far as token lookup is concerned.
#[derive(Clone, Debug)]
pub enum RequestBody {
    /// Key-value fields decoded from a form, JSON object or multipart body.
    ParsedFields(HashMap<String, String>),
    /// The content type is not one we know how to decode.
    Unparseable,
    /// Bytes that were not (or not yet) decoded.
    Raw(Bytes),
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::Raw(Bytes::new())
    }
}

impl RequestBody {
    /// Returns the named field when the body was decoded into fields.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::ParsedFields(fields) => fields.get(name).map(String::as_str),
            Self::Unparseable | Self::Raw(_) => None,
        }
    }
}

/// Read-only view of an inbound request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub method: Method,
    /// Raw path, without the query string.
    pub path: String,
    /// `true` only for a non-empty query string: `/migrate?` counts as none.
    pub has_query: bool,
    pub cookies: CookieJar,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl RequestContext {
    pub fn new(method: Method, uri: &Uri) -> Self {
        Self {
            method,
            path: uri.path().to_owned(),
            has_query: uri.query().is_some_and(|q| !q.is_empty()),
            cookies: CookieJar::new(),
            headers: HeaderMap::new(),
            body: RequestBody::default(),
        }
    }

    /// Builds a context from the head of an HTTP request.
    ///
    /// Cookies are parsed from the `Cookie` headers. The body is left as an
    /// empty [`RequestBody::Raw`]; the caller fills it in once it knows the
    /// body is needed.
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            cookies: CookieJar::from_headers(&parts.headers),
            headers: parts.headers.clone(),
            ..Self::new(parts.method.clone(), &parts.uri)
        }
    }

    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies = self
            .cookies
            .add(Cookie::new(name.to_owned(), value.to_owned()));
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// Where the token of a [`SessionCsrfState`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenProvenance {
    /// Taken from a well-formed `csrf_token` cookie.
    Reused,
    /// Minted for this request because no valid cookie token was sent.
    Minted,
}

/// The token resolved for one request/response cycle.
///
/// Inserted into the request extensions by the middleware so handlers can
/// embed the token in forms (see [`CurrentCsrfToken`]).
///
/// [`CurrentCsrfToken`]: crate::web::extract::CurrentCsrfToken
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCsrfState {
    token: CsrfToken,
    provenance: TokenProvenance,
}

impl SessionCsrfState {
    pub fn reused(token: CsrfToken) -> Self {
        Self {
            token,
            provenance: TokenProvenance::Reused,
        }
    }

    pub fn minted(token: CsrfToken) -> Self {
        Self {
            token,
            provenance: TokenProvenance::Minted,
        }
    }

    pub fn token(&self) -> &CsrfToken {
        &self.token
    }

    pub fn provenance(&self) -> TokenProvenance {
        self.provenance
    }

    /// `false` when the token was minted this request, i.e. the client
    /// never had a chance to echo it back.
    pub fn had_valid_cookie_token(&self) -> bool {
        self.provenance == TokenProvenance::Reused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, header};

    #[test]
    fn new_splits_path_and_query() {
        let ctx = RequestContext::new(Method::POST, &"/migrate?x=1".parse().unwrap());
        assert_eq!(ctx.path, "/migrate");
        assert!(ctx.has_query);

        let ctx = RequestContext::new(Method::POST, &"/migrate".parse().unwrap());
        assert!(!ctx.has_query);
    }

    #[test]
    fn empty_query_string_counts_as_absent() {
        let ctx = RequestContext::new(Method::POST, &"/migrate?".parse().unwrap());
        assert_eq!(ctx.path, "/migrate");
        assert!(!ctx.has_query);
    }

    #[test]
    fn from_parts_reads_cookies_and_headers() {
        let (parts, _) = Request::builder()
            .method(Method::PUT)
            .uri("/pay?amount=5")
            .header(header::COOKIE, "csrf_token=abc; other=1")
            .header("x-csrf-token", "abc")
            .body(())
            .unwrap()
            .into_parts();

        let ctx = RequestContext::from_parts(&parts);

        assert_eq!(ctx.method, Method::PUT);
        assert_eq!(ctx.path, "/pay");
        assert!(ctx.has_query);
        assert_eq!(ctx.cookies.get("csrf_token").unwrap().value(), "abc");
        assert_eq!(ctx.cookies.get("other").unwrap().value(), "1");
        assert_eq!(ctx.headers.get("x-csrf-token").unwrap(), "abc");
        assert!(matches!(ctx.body, RequestBody::Raw(ref b) if b.is_empty()));
    }

    #[test]
    fn body_field_only_from_parsed_fields() {
        let mut fields = HashMap::new();
        fields.insert("csrf_token".to_owned(), "t".to_owned());

        assert_eq!(RequestBody::ParsedFields(fields).field("csrf_token"), Some("t"));
        assert_eq!(RequestBody::Unparseable.field("csrf_token"), None);
        assert_eq!(
            RequestBody::Raw(Bytes::from_static(b"csrf_token=t")).field("csrf_token"),
            None
        );
    }

    #[test]
    fn provenance_drives_had_valid_cookie_token() {
        let token = CsrfToken::parse(&"a".repeat(32), 32).unwrap();

        let reused = SessionCsrfState::reused(token.clone());
        assert!(reused.had_valid_cookie_token());
        assert_eq!(reused.provenance(), TokenProvenance::Reused);

        let minted = SessionCsrfState::minted(token.clone());
        assert!(!minted.had_valid_cookie_token());
        assert_eq!(minted.token(), &token);
    }
}
