//! Application state for Axum handlers.

use crate::proxy::Forwarder;
use http::HeaderName;
use salt_bridge_auth::ChallengeStore;
use std::sync::Arc;

/// Routing behaviour of the bridge.
#[derive(Debug, Clone)]
pub struct BridgeOptions {
    /// Header carrying the identity asserted by the trusted edge.
    pub identity_header: HeaderName,

    /// Forward requests without an identity assertion, and every unmatched
    /// route, to salt-api unchanged.
    ///
    /// Default: `false`
    pub passthrough: bool,
}

impl BridgeOptions {
    /// Create options reading identity from `identity_header`.
    #[must_use]
    pub const fn new(identity_header: HeaderName) -> Self {
        Self {
            identity_header,
            passthrough: false,
        }
    }

    /// Enable or disable passthrough.
    #[must_use]
    pub const fn with_passthrough(mut self, passthrough: bool) -> Self {
        self.passthrough = passthrough;
        self
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        // Lowercase form of `DEFAULT_IDENTITY_HEADER`
        Self::new(HeaderName::from_static("x-forwarded-user"))
    }
}

/// Application state shared across all HTTP handlers.
///
/// Generic over the challenge store so the same router serves the in-memory
/// store, the Redis store, or a test double.
pub struct AppState<C> {
    /// Pending challenges.
    pub store: Arc<C>,

    /// Client for salt-api.
    pub forwarder: Forwarder,

    /// Routing options.
    pub options: Arc<BridgeOptions>,
}

impl<C> AppState<C>
where
    C: ChallengeStore + 'static,
{
    /// Create a new application state.
    #[must_use]
    pub fn new(store: C, forwarder: Forwarder, options: BridgeOptions) -> Self {
        Self {
            store: Arc::new(store),
            forwarder,
            options: Arc::new(options),
        }
    }
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            forwarder: self.forwarder.clone(),
            options: Arc::clone(&self.options),
        }
    }
}
