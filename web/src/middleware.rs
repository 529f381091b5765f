//! Access logging middleware.
//!
//! Every request outside the skip list gets:
//! - a correlation ID, taken from `X-Correlation-ID` or freshly generated
//! - an `http_request` tracing span carrying method, URI and correlation ID
//! - one completion event with status and latency
//! - the correlation ID echoed in the response header
//!
//! Liveness probes (`/healthz`) are skipped so they do not flood the log.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use salt_bridge_web::middleware::access_log_layer;
//!
//! let app = Router::new()
//!     .route("/login", post(login))
//!     .layer(access_log_layer(["/healthz"]));
//! ```

use axum::{extract::Request, http::HeaderValue, response::Response};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Create an access-log layer that ignores requests to `skip_paths`.
#[must_use]
pub fn access_log_layer<I, P>(skip_paths: I) -> AccessLogLayer
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
{
    AccessLogLayer {
        skip_paths: skip_paths.into_iter().map(Into::into).collect(),
    }
}

/// Layer for access logging.
#[derive(Clone, Debug)]
pub struct AccessLogLayer {
    skip_paths: Arc<[String]>,
}

impl<S> Layer<S> for AccessLogLayer {
    type Service = AccessLogMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLogMiddleware {
            inner,
            skip_paths: Arc::clone(&self.skip_paths),
        }
    }
}

/// Middleware service for access logging.
#[derive(Clone, Debug)]
pub struct AccessLogMiddleware<S> {
    inner: S,
    skip_paths: Arc<[String]>,
}

impl<S> Service<Request> for AccessLogMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let path = req.uri().path();
        if self.skip_paths.iter().any(|skip| skip == path) {
            return Box::pin(self.inner.call(req));
        }

        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        req.extensions_mut().insert(correlation_id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        let started = Instant::now();
        let fut = self.inner.call(req);

        Box::pin(
            async move {
                let mut response = fut.await?;

                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "Request completed"
                );

                if let Ok(header_value) = HeaderValue::from_str(&correlation_id.to_string()) {
                    response
                        .headers_mut()
                        .insert(CORRELATION_ID_HEADER, header_value);
                }

                Ok(response)
            }
            .instrument(span),
        )
    }
}
