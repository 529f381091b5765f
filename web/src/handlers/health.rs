//! Health check endpoint.
//!
//! Used by load balancers and orchestrators to verify the process is serving.

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

/// Liveness check.
///
/// Returns 200 OK with an empty JSON object. Does not consult the challenge
/// store or salt-api, and never changes any state.
///
/// # Endpoint
///
/// ```text
/// GET /healthz
/// ```
#[allow(clippy::unused_async)]
pub async fn healthz() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_healthz() {
        let (status, Json(body)) = healthz().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
    }
}
