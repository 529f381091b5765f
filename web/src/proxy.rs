//! Reverse proxy to salt-api.
//!
//! Only routing fields change on the way through: scheme and authority come
//! from the configured salt-api URL, while method, path, query, end-to-end
//! headers and body come from the inbound request. Responses are relayed as
//! they arrive, streamed in both directions.
//!
//! No retries. A request that cannot reach salt-api becomes `502 Bad Gateway`.

use crate::error::AppError;
use axum::{
    body::{Body, Bytes, HttpBody},
    extract::Request,
    http::{HeaderMap, HeaderValue, Uri, header, request::Parts},
    response::Response,
};
use reqwest::{Client, Url, redirect};

/// Headers that describe a single connection and must not be forwarded.
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Forwards requests to a fixed salt-api base URL.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    target: Url,
}

impl Forwarder {
    /// Create a forwarder for `target`.
    ///
    /// Redirects returned by salt-api are relayed to the caller, not followed.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialised (TLS backend).
    pub fn new(target: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client, target })
    }

    /// Base URL requests are forwarded to.
    #[must_use]
    pub const fn target(&self) -> &Url {
        &self.target
    }

    /// Downstream URL for an inbound request URI.
    ///
    /// The path of the base URL is replaced, not prefixed.
    #[must_use]
    pub fn target_url(&self, uri: &Uri) -> Url {
        let mut url = self.target.clone();
        url.set_path(uri.path());
        url.set_query(uri.query());
        url
    }

    /// Forward `request` unchanged, streaming its body.
    ///
    /// # Errors
    ///
    /// Returns `502 Bad Gateway` if salt-api cannot be reached.
    pub async fn forward(&self, request: Request) -> Result<Response, AppError> {
        let (parts, body) = request.into_parts();
        // An empty stream would still be sent chunked
        let body = if body.size_hint().exact() == Some(0) {
            reqwest::Body::from(Bytes::new())
        } else {
            reqwest::Body::wrap_stream(body.into_data_stream())
        };

        self.send(&parts, forwarded_headers(&parts.headers), body)
            .await
    }

    /// Forward the head of a request with a replacement JSON body.
    ///
    /// Content headers of the original request are replaced so that
    /// `Content-Length` always matches `body`.
    ///
    /// # Errors
    ///
    /// Returns `502 Bad Gateway` if salt-api cannot be reached.
    pub async fn forward_json(&self, parts: &Parts, body: Vec<u8>) -> Result<Response, AppError> {
        let mut headers = forwarded_headers(&parts.headers);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
        headers.remove(header::CONTENT_ENCODING);

        self.send(parts, headers, reqwest::Body::from(Bytes::from(body)))
            .await
    }

    async fn send(
        &self,
        parts: &Parts,
        headers: HeaderMap,
        body: reqwest::Body,
    ) -> Result<Response, AppError> {
        let url = self.target_url(&parts.uri);

        let upstream = self
            .client
            .request(parts.method.clone(), url.clone())
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(
                    method = %parts.method,
                    url = %url,
                    error = %e,
                    "Forwarding to salt-api failed"
                );
                AppError::bad_gateway("salt-api is unreachable")
            })?;

        tracing::debug!(
            method = %parts.method,
            url = %url,
            status = upstream.status().as_u16(),
            "Forwarded request"
        );

        relay(upstream)
    }
}

/// Turn a salt-api response into a response for the caller.
fn relay(upstream: reqwest::Response) -> Result<Response, AppError> {
    let mut response = Response::builder().status(upstream.status());
    if let Some(headers) = response.headers_mut() {
        *headers = forwarded_headers(upstream.headers());
    }

    response
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| AppError::internal("Failed to relay response").with_source(e.into()))
}

/// End-to-end headers of `source`.
///
/// Drops hop-by-hop headers, anything the `Connection` header nominates and
/// `Host` (the client sets it from the target URL).
fn forwarded_headers(source: &HeaderMap) -> HeaderMap {
    let nominated: Vec<String> = source
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let mut headers = HeaderMap::with_capacity(source.len());
    for (name, value) in source {
        if name == header::HOST
            || HOP_BY_HOP_HEADERS.contains(&name.as_str())
            || nominated.iter().any(|n| n == name.as_str())
        {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}
