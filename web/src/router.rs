//! Router composition.

use crate::handlers::{callback, forward_unmatched, healthz, login};
use crate::middleware::access_log_layer;
use crate::state::AppState;
use axum::{
    Router,
    routing::{MethodRouter, get, post},
};
use salt_bridge_auth::ChallengeStore;

/// Path of the liveness endpoint.
pub const HEALTH_PATH: &str = "/healthz";

/// Path salt-api's `rest` eauth module calls back.
pub const CALLBACK_PATH: &str = "/_callback";

/// Path of the intercepted login endpoint.
pub const LOGIN_PATH: &str = "/login";

/// Create the bridge router.
///
/// # Routes
///
/// - `GET /healthz` - Liveness check
/// - `POST /login` - Login interception
/// - `POST /_callback` - Eauth callback (salt-api only)
///
/// With passthrough enabled, every other path and every other method on the
/// paths above is forwarded to salt-api unchanged. Without it they are
/// answered by axum (`404` / `405`).
pub fn build_router<C>(state: AppState<C>) -> Router
where
    C: ChallengeStore + 'static,
{
    let passthrough = state.options.passthrough;
    let route = |method_router: MethodRouter<AppState<C>>| {
        if passthrough {
            method_router.fallback(forward_unmatched::<C>)
        } else {
            method_router
        }
    };

    let router = Router::new()
        .route(HEALTH_PATH, route(get(healthz)))
        .route(LOGIN_PATH, route(post(login::<C>)))
        .route(CALLBACK_PATH, route(post(callback::<C>)));

    let router = if passthrough {
        router.fallback(forward_unmatched::<C>)
    } else {
        router
    };

    router
        .layer(access_log_layer([HEALTH_PATH]))
        .with_state(state)
}
