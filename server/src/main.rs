//! salt-bridge HTTP server.
//!
//! Turns identities asserted by a trusted edge into salt-api `rest` eauth
//! logins.
//!
//! # Usage
//!
//! ```bash
//! SALT_API_URL=http://127.0.0.1:8000 REVERSE_PROXY=true salt-bridge
//! ```

use anyhow::Context;
use salt_bridge_auth::{ChallengeStore, InMemoryChallengeStore, RedisChallengeStore};
use salt_bridge_server::{Config, app, serve_with_grace, signal, spawn_expiry_sweep};
use std::net::{Ipv4Addr, SocketAddr};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salt_bridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting salt-bridge");

    let config = Config::from_env().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;
    info!(
        port = config.port,
        identity_header = %config.identity_header,
        salt_api_url = %config.salt_api_url,
        passthrough = config.passthrough,
        shutdown_timeout_secs = config.shutdown_timeout.as_secs(),
        challenge_ttl_secs = config.challenge_ttl.map(|ttl| ttl.as_secs()),
        redis = config.redis_url.is_some(),
        "Configuration loaded"
    );

    let result = match config.redis_url.as_deref() {
        Some(redis_url) => {
            info!("Connecting to Redis challenge store...");
            let store = RedisChallengeStore::new(redis_url, config.challenge_ttl)
                .await
                .context("Failed to connect to Redis")?;
            info!("Redis challenge store connected");
            run(store, &config).await
        }
        None => {
            let store = match config.challenge_ttl {
                Some(ttl) => {
                    let store = InMemoryChallengeStore::with_ttl(ttl);
                    spawn_expiry_sweep(store.clone(), ttl);
                    store
                }
                None => InMemoryChallengeStore::new(),
            };
            run(store, &config).await
        }
    };

    if let Err(e) = &result {
        error!(error = %e, "Server exited with error");
    }
    result
}

async fn run<C>(store: C, config: &Config) -> anyhow::Result<()>
where
    C: ChallengeStore + 'static,
{
    let app = app(store, config)?;

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "Server listening");

    serve_with_grace(listener, app, signal(), config.shutdown_timeout).await?;

    info!("Server stopped");
    Ok(())
}
