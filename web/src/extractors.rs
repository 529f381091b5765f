//! Custom Axum extractors.
//!
//! - `AssertedIdentity`: identity set by the trusted edge in the configured header
//! - `CallbackCredential`: credential salt-api posts to the eauth callback
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(
//!     State(state): State<AppState<C>>,
//!     AssertedIdentity(identity): AssertedIdentity,
//!     request: Request,
//! ) -> Result<Response, AppError> {
//!     match identity {
//!         Some(identity) => { /* rewrite */ }
//!         None => { /* passthrough */ }
//!     }
//! }
//! ```

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderMap, HeaderName, header, request::Parts},
};
use salt_bridge_auth::{ChallengeStore, LoginCredential};

/// Identity asserted by the upstream edge.
///
/// `None` when the configured header is missing, empty, or not valid UTF-8.
/// The value is trusted as-is: nothing here verifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertedIdentity(pub Option<String>);

#[async_trait]
impl<C> FromRequestParts<AppState<C>> for AssertedIdentity
where
    C: ChallengeStore + 'static,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<C>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(asserted_identity(
            &parts.headers,
            &state.options.identity_header,
        )))
    }
}

/// Read a non-empty identity from `header_name`.
fn asserted_identity(headers: &HeaderMap, header_name: &HeaderName) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Credential posted by salt-api's `rest` eauth module.
///
/// Decoded as JSON when `Content-Type` is `application/json` (or a `+json`
/// type), as form data otherwise. Rejects with `400 Bad Request` when
/// `username` or `password` is missing.
#[derive(Debug, Clone)]
pub struct CallbackCredential(pub LoginCredential);

#[async_trait]
impl<S> FromRequest<S> for CallbackCredential
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(req.headers());

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(format!("Unreadable callback body: {e}")))?;

        let credential = if json {
            LoginCredential::from_json(&body)?
        } else {
            LoginCredential::from_form(&body)?
        };

        Ok(Self(credential))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| {
            let mime = mime.to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{HeaderValue, Request, StatusCode};

    fn identity_header() -> HeaderName {
        HeaderName::from_static("x-forwarded-user")
    }

    #[test]
    fn test_identity_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-User", HeaderValue::from_static("alice"));

        assert_eq!(
            asserted_identity(&headers, &identity_header()),
            Some("alice".to_string())
        );
    }

    #[test]
    fn test_identity_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(asserted_identity(&headers, &identity_header()), None);

        headers.insert("X-Forwarded-User", HeaderValue::from_static(""));
        assert_eq!(asserted_identity(&headers, &identity_header()), None);
    }

    #[test]
    fn test_identity_utf8() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Forwarded-User",
            HeaderValue::from_bytes("josé@example.com".as_bytes()).expect("Valid opaque header"),
        );

        assert_eq!(
            asserted_identity(&headers, &identity_header()),
            Some("josé@example.com".to_string())
        );
    }

    #[test]
    fn test_identity_invalid_utf8() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Forwarded-User",
            HeaderValue::from_bytes(b"al\xffce").expect("Valid opaque header"),
        );

        assert_eq!(asserted_identity(&headers, &identity_header()), None);
    }

    #[test]
    fn test_custom_identity_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-User", HeaderValue::from_static("alice"));
        headers.insert("X-Auth-Request-Email", HeaderValue::from_static("bob@example.com"));

        assert_eq!(
            asserted_identity(&headers, &HeaderName::from_static("x-auth-request-email")),
            Some("bob@example.com".to_string())
        );
    }

    #[test]
    fn test_is_json() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        assert!(is_json(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/vnd.api+json"));
        assert!(is_json(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        assert!(!is_json(&headers));
    }

    #[tokio::test]
    async fn test_callback_credential_from_json() {
        let req = Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"alice","password":"pw","eauth":"rest"}"#))
            .expect("Valid request");

        let CallbackCredential(credential) = CallbackCredential::from_request(req, &())
            .await
            .expect("Should extract");

        assert_eq!(credential.username, "alice");
        assert_eq!(credential.password, "pw");
    }

    #[tokio::test]
    async fn test_callback_credential_from_form() {
        let req = Request::builder()
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=alice&password=pw&eauth=rest"))
            .expect("Valid request");

        let CallbackCredential(credential) = CallbackCredential::from_request(req, &())
            .await
            .expect("Should extract");

        assert_eq!(credential.username, "alice");
    }

    #[tokio::test]
    async fn test_callback_credential_rejects_missing_fields() {
        let req = Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"username":"alice"}"#))
            .expect("Valid request");

        let err = CallbackCredential::from_request(req, &())
            .await
            .expect_err("Should reject");

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
