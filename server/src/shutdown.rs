//! Graceful shutdown.
//!
//! The server stops accepting connections when [`signal`] resolves, then
//! waits for in-flight requests for at most the configured grace period.

use axum::Router;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::{error, info, warn};

/// Resolve on Ctrl+C (SIGINT) or SIGTERM.
///
/// A handler that cannot be installed is logged and never fires; the other
/// one still does.
pub async fn signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}

/// Serve `app` on `listener` until `shutdown` resolves.
///
/// Once `shutdown` resolves no new connections are accepted and in-flight
/// requests get `grace` to finish.
///
/// # Errors
///
/// Returns error if the server fails, or if requests are still in flight
/// when `grace` elapses.
pub async fn serve_with_grace<S>(
    listener: TcpListener,
    app: Router,
    shutdown: S,
    grace: Duration,
) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let draining = Arc::new(Notify::new());
    let trigger = Arc::clone(&draining);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            trigger.notify_one();
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return Ok(result?),
        () = draining.notified() => {}
    }

    info!(grace_secs = grace.as_secs_f64(), "Draining in-flight requests");

    match tokio::time::timeout(grace, server).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            warn!(grace_secs = grace.as_secs_f64(), "Graceful shutdown timed out");
            anyhow::bail!("requests still in flight after {grace:?}")
        }
    }
}
