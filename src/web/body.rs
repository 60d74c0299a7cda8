//! # Request Body Fields
//!
//! Decodes a buffered request body into key-value fields so the CSRF
//! validator can look for the `csrf_token` field.
//!
//! Supported content types:
//! - `application/x-www-form-urlencoded`
//! - `application/json` and `*/*+json` (top-level string fields of an object)
//! - `multipart/form-data` (text fields; file parts are skipped)
//!
//! Repeated fields keep the last value. An empty body always yields no
//! fields. Anything else is [`BodyError::UnknownContentType`], which the
//! middleware treats as "no token in the body".

use std::collections::HashMap;

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, header::CONTENT_TYPE},
};
use serde_json::Value;

use crate::error::body::BodyError;

const FORM: &str = "application/x-www-form-urlencoded";
const JSON: &str = "application/json";
const MULTIPART: &str = "multipart/form-data";

/// Decodes `bytes` according to the `Content-Type` in `headers`.
pub async fn parse_fields(
    headers: &HeaderMap,
    bytes: Bytes,
) -> Result<HashMap<String, String>, BodyError> {
    if bytes.is_empty() {
        return Ok(HashMap::new());
    }

    let essence = headers
        .get(CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .map(|ct| {
            let mime = ct.split_once(';').map_or(ct.as_str(), |(mime, _)| mime);
            mime.trim().to_ascii_lowercase()
        })
        .unwrap_or_default();

    match essence.as_str() {
        FORM => parse_form(&bytes),
        MULTIPART => parse_multipart(headers, bytes).await,
        ct if ct == JSON || ct.ends_with("+json") => parse_json(&bytes),
        other => Err(BodyError::UnknownContentType(other.to_owned())),
    }
}

fn parse_form(bytes: &[u8]) -> Result<HashMap<String, String>, BodyError> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_bytes(bytes).map_err(|e| BodyError::Malformed {
            content_type: FORM,
            detail: e.to_string(),
        })?;
    Ok(pairs.into_iter().collect())
}

fn parse_json(bytes: &[u8]) -> Result<HashMap<String, String>, BodyError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| BodyError::Malformed {
        content_type: JSON,
        detail: e.to_string(),
    })?;

    // Arrays and scalars are valid JSON but carry no named fields.
    let Value::Object(map) = value else {
        return Ok(HashMap::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(s) => Some((k, s)),
            _ => None,
        })
        .collect())
}

async fn parse_multipart(
    headers: &HeaderMap,
    bytes: Bytes,
) -> Result<HashMap<String, String>, BodyError> {
    let malformed = |detail: String| BodyError::Malformed {
        content_type: MULTIPART,
        detail,
    };

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let boundary = multer::parse_boundary(content_type).map_err(|e| malformed(e.to_string()))?;

    // The body is already buffered and bounded by the guard's limit.
    let mut multipart = multer::Multipart::new(Body::from(bytes).into_data_stream(), boundary);

    let mut fields = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| malformed(e.to_string()))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field.text().await.map_err(|e| malformed(e.to_string()))?;
        fields.insert(name, value);
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(ct: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
        h
    }

    #[tokio::test]
    async fn form_fields_are_decoded() {
        let fields = parse_fields(
            &headers("application/x-www-form-urlencoded; charset=UTF-8"),
            Bytes::from_static(b"amount=5&csrf_token=abc%2Bdef&note=a+b"),
        )
        .await
        .unwrap();

        assert_eq!(fields["csrf_token"], "abc+def");
        assert_eq!(fields["note"], "a b");
        assert_eq!(fields["amount"], "5");
    }

    #[tokio::test]
    async fn repeated_form_field_keeps_last_value() {
        let fields = parse_fields(&headers(FORM), Bytes::from_static(b"csrf_token=a&csrf_token=b"))
            .await
            .unwrap();
        assert_eq!(fields["csrf_token"], "b");
    }

    #[tokio::test]
    async fn json_object_string_fields_are_decoded() {
        let fields = parse_fields(
            &headers("application/json"),
            Bytes::from_static(br#"{"csrf_token":"abc","amount":5,"nested":{"a":"b"}}"#),
        )
        .await
        .unwrap();

        assert_eq!(fields.get("csrf_token").map(String::as_str), Some("abc"));
        assert!(!fields.contains_key("amount"));
        assert!(!fields.contains_key("nested"));
    }

    #[tokio::test]
    async fn json_suffix_types_are_accepted() {
        let fields = parse_fields(
            &headers("application/activity+json"),
            Bytes::from_static(br#"{"csrf_token":"abc"}"#),
        )
        .await
        .unwrap();
        assert_eq!(fields["csrf_token"], "abc");
    }

    #[tokio::test]
    async fn json_array_has_no_fields() {
        let fields = parse_fields(&headers(JSON), Bytes::from_static(b"[1,2,3]"))
            .await
            .unwrap();
        assert!(fields.is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let err = parse_fields(&headers(JSON), Bytes::from_static(b"{not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, BodyError::Malformed { content_type: JSON, .. }));
    }

    #[tokio::test]
    async fn multipart_text_fields_are_decoded_and_files_skipped() {
        let body = concat!(
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"csrf_token\"\r\n",
            "\r\n",
            "abc\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"upload\"; filename=\"a.txt\"\r\n",
            "Content-Type: text/plain\r\n",
            "\r\n",
            "file contents\r\n",
            "--XBOUNDARY--\r\n",
        );

        let fields = parse_fields(
            &headers("multipart/form-data; boundary=XBOUNDARY"),
            Bytes::from_static(body.as_bytes()),
        )
        .await
        .unwrap();

        assert_eq!(fields["csrf_token"], "abc");
        assert!(!fields.contains_key("upload"));
    }

    #[tokio::test]
    async fn multipart_without_boundary_is_malformed() {
        let err = parse_fields(&headers(MULTIPART), Bytes::from_static(b"--X\r\n"))
            .await
            .unwrap_err();
        assert!(matches!(err, BodyError::Malformed { content_type: MULTIPART, .. }));
    }

    #[tokio::test]
    async fn unknown_content_type_is_reported() {
        let err = parse_fields(&headers("text/plain"), Bytes::from_static(b"csrf_token=abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, BodyError::UnknownContentType(ref ct) if ct == "text/plain"));
    }

    #[tokio::test]
    async fn missing_content_type_with_body_is_unknown() {
        let err = parse_fields(&HeaderMap::new(), Bytes::from_static(b"csrf_token=abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, BodyError::UnknownContentType(_)));
    }

    #[tokio::test]
    async fn empty_body_has_no_fields_whatever_the_type() {
        for h in [HeaderMap::new(), headers(JSON), headers("text/plain")] {
            let fields = parse_fields(&h, Bytes::new()).await.unwrap();
            assert!(fields.is_empty());
        }
    }
}
