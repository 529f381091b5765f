//! Axum front end of the salt-api eauth bridge.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  caller (behind trusted edge)                │
//! └──────────────┬───────────────────────────────┘
//!                │ POST /login  X-Forwarded-User: alice
//!                ▼
//! ┌──────────────────────────────────────────────┐
//! │  bridge                                      │
//! │  - login: issue challenge, rewrite body      │  ← ChallengeStore::issue
//! │  - proxy: relay to salt-api, stream reply    │
//! │  - callback: consume challenge, grant/deny   │  ← ChallengeStore::validate
//! └──────────────┬──────────────────▲────────────┘
//!                │ POST /login      │ POST /_callback
//!                ▼                  │
//! ┌──────────────────────────────────────────────┐
//! │  salt-api (eauth: rest)                      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use salt_bridge_auth::InMemoryChallengeStore;
//! use salt_bridge_web::{AppState, BridgeOptions, Forwarder, build_router};
//!
//! let forwarder = Forwarder::new("http://127.0.0.1:8000".parse()?)?;
//! let state = AppState::new(InMemoryChallengeStore::new(), forwarder, BridgeOptions::default());
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod proxy;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{AssertedIdentity, CallbackCredential};
pub use middleware::{CORRELATION_ID_HEADER, access_log_layer};
pub use proxy::Forwarder;
pub use router::build_router;
pub use state::{AppState, BridgeOptions};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
