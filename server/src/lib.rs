//! HTTP server for the salt-api eauth bridge.
//!
//! Wires [`Config`] to a challenge store, the router from
//! `salt_bridge_web`, and graceful shutdown.
//!
//! # Trust model
//!
//! The bridge believes whatever identity header reaches it. Deploy it only
//! behind an edge that authenticates callers and overwrites that header, and
//! make `/_callback` reachable from salt-api alone.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod config;
pub mod shutdown;

pub use config::{Config, ConfigError};
pub use shutdown::{serve_with_grace, signal};

use axum::Router;
use salt_bridge_auth::{ChallengeStore, InMemoryChallengeStore};
use salt_bridge_web::{AppState, BridgeOptions, Forwarder, build_router};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Build the bridge router for `store` as configured.
///
/// # Errors
///
/// Returns error if the HTTP client for salt-api cannot be built.
pub fn app<C>(store: C, config: &Config) -> anyhow::Result<Router>
where
    C: ChallengeStore + 'static,
{
    let forwarder = Forwarder::new(config.salt_api_url.clone())?;
    let options =
        BridgeOptions::new(config.identity_header.clone()).with_passthrough(config.passthrough);

    Ok(build_router(AppState::new(store, forwarder, options)))
}

/// Sweep expired challenges out of `store` every `period`.
///
/// Challenges for identities that never call back would otherwise stay in
/// memory until re-issued.
pub fn spawn_expiry_sweep(store: InMemoryChallengeStore, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "Swept expired challenges");
            }
        }
    })
}
