//! Login interception.
//!
//! Turns an identity asserted by the trusted edge into a credential salt-api
//! will accept through its `rest` eauth module:
//!
//! 1. **Issue** a challenge for the asserted identity
//! 2. **Rewrite** the body as `{"username":identity,"password":secret,"eauth":"rest"}`
//! 3. **Forward** to salt-api's `/login`, which calls back `/_callback`
//!
//! Whatever the caller put in the body is discarded: the header wins.

use crate::WebResult;
use crate::error::AppError;
use crate::extractors::AssertedIdentity;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    response::Response,
};
use salt_bridge_auth::{ChallengeStore, LoginCredential};

/// Intercept `POST /login`.
///
/// Without an identity assertion the request is forwarded unchanged when
/// passthrough is enabled, so salt-api's native methods still work, and
/// answered `404 Not Found` otherwise. No challenge is issued in either case.
///
/// # Errors
///
/// - `500` if the challenge cannot be stored or the body cannot be built;
///   nothing is forwarded
/// - `502` if salt-api is unreachable
pub async fn login<C>(
    State(state): State<AppState<C>>,
    AssertedIdentity(identity): AssertedIdentity,
    request: Request,
) -> WebResult<Response>
where
    C: ChallengeStore + 'static,
{
    let Some(identity) = identity else {
        if state.options.passthrough {
            tracing::debug!("No identity asserted, forwarding login unchanged");
            return state.forwarder.forward(request).await;
        }
        tracing::debug!("No identity asserted and passthrough disabled");
        return Err(AppError::not_found(request.uri().path()));
    };

    let secret = state.store.issue(&identity).await?;
    let body = LoginCredential::for_challenge(identity.as_str(), secret).to_json()?;

    tracing::info!(identity = %identity, "Rewrote login with issued challenge");

    let (parts, _discarded) = request.into_parts();
    state.forwarder.forward_json(&parts, body).await
}
