//! Error types for challenge issuance and validation.

use thiserror::Error;

/// Result type alias for challenge operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Failure modes of the challenge protocol.
///
/// A challenge that is absent, already consumed, expired or simply wrong is
/// **not** an error: `validate` reports it as `Ok(false)`. Errors are reserved
/// for conditions where the store could not answer at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Request Errors
    // ═══════════════════════════════════════════════════════════

    /// Callback body could not be decoded into a credential.
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    /// Synthesized login body could not be encoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════

    /// Backing store failed (connection lost, command rejected).
    #[error("Challenge store error: {0}")]
    StoreError(String),
}
