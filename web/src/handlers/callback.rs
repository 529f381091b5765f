//! Eauth callback.
//!
//! salt-api's `rest` eauth module posts the credential it received on
//! `/login` here and waits for the answer before creating a session. This is
//! the trust anchor of the bridge and must only be reachable from salt-api.

use crate::WebResult;
use crate::extractors::CallbackCredential;
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use salt_bridge_auth::ChallengeStore;
use salt_bridge_auth::constants::GRANTED_CAPABILITIES;
use serde_json::json;

/// Handle `POST /_callback`.
///
/// Consumes the pending challenge for `username` whatever the outcome.
///
/// # Responses
///
/// - `200 ["test.ping"]` when `password` is the pending challenge
/// - `403 {}` when it is wrong, absent, expired or already used
/// - `400` when the body lacks `username` or `password` (nothing consumed)
///
/// # Errors
///
/// Returns `500` if the challenge store fails.
pub async fn callback<C>(
    State(state): State<AppState<C>>,
    CallbackCredential(credential): CallbackCredential,
) -> WebResult<Response>
where
    C: ChallengeStore + 'static,
{
    let valid = state
        .store
        .validate(&credential.username, &credential.password)
        .await?;

    if valid {
        tracing::info!(identity = %credential.username, "Challenge accepted");
        Ok((StatusCode::OK, Json(GRANTED_CAPABILITIES)).into_response())
    } else {
        tracing::warn!(identity = %credential.username, "Challenge rejected");
        Ok((StatusCode::FORBIDDEN, Json(json!({}))).into_response())
    }
}
