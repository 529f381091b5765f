//! Catch-all forwarding, installed only when passthrough is enabled.

use crate::WebResult;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    response::Response,
};
use salt_bridge_auth::ChallengeStore;

/// Forward any request no other route claims to salt-api unchanged.
///
/// # Errors
///
/// Returns `502` if salt-api is unreachable.
pub async fn forward_unmatched<C>(
    State(state): State<AppState<C>>,
    request: Request,
) -> WebResult<Response>
where
    C: ChallengeStore + 'static,
{
    state.forwarder.forward(request).await
}
