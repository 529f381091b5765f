//! Challenge storage trait.
//!
//! Holds at most one pending secret per identity and hands it out for a single
//! validation attempt.
//!
//! # Security
//!
//! Challenges must be:
//! - **Single-use**: the entry is removed by the first `validate` for that
//!   identity, whether or not the presented secret matched
//! - **Exclusive**: issuing again for an identity replaces the pending secret
//! - **Unpredictable**: drawn from the OS CSPRNG
//!
//! # Implementation
//!
//! **Single instance**: [`InMemoryChallengeStore`](crate::stores::InMemoryChallengeStore)
//! **Multiple replicas**: [`RedisChallengeStore`](crate::stores::RedisChallengeStore)
//!
//! # Example
//!
//! ```ignore
//! // Login interception
//! let secret = challenge_store.issue("alice").await?;
//!
//! // Callback from salt-api
//! if challenge_store.validate("alice", &presented).await? {
//!     // grant
//! } else {
//!     // deny: wrong, absent, expired or already used
//! }
//! ```

use crate::error::Result;

/// Single-use challenge store keyed by identity.
///
/// Both operations are atomic with respect to each other: a concurrent
/// `issue` and `validate` for the same identity observe one another in some
/// serial order, never a torn state.
pub trait ChallengeStore: Send + Sync {
    /// Issue a fresh secret for `identity`, replacing any pending one.
    ///
    /// # Errors
    ///
    /// Returns error if the backing store cannot be written.
    fn issue(&self, identity: &str) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Consume the pending challenge for `identity` and compare it to `presented`.
    ///
    /// The entry is removed unconditionally. An absent entry never matches,
    /// not even an empty `presented` value.
    ///
    /// # Returns
    ///
    /// - `true` if a pending, unexpired secret existed and equals `presented`
    /// - `false` otherwise
    ///
    /// # Errors
    ///
    /// Returns error only on storage failures, not on mismatches.
    fn validate(
        &self,
        identity: &str,
        presented: &str,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;
}
