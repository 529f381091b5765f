//! In-memory challenge store.
//!
//! One `Mutex<HashMap>` guards every identity. Critical sections are a single
//! map insert or remove; secret generation and comparison happen outside the
//! lock. Suitable for a single bridge instance only: replicas do not see each
//! other's challenges.
//!
//! With a TTL, expired entries stay in the map until their identity is
//! validated or re-issued, or until [`InMemoryChallengeStore::purge_expired`]
//! sweeps them.

use crate::error::Result;
use crate::providers::ChallengeStore;
use crate::utils::generate_secret;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct PendingChallenge {
    secret: String,
    issued_at: Instant,
}

impl PendingChallenge {
    fn is_expired(&self, ttl: Option<Duration>, now: Instant) -> bool {
        ttl.is_some_and(|ttl| now.duration_since(self.issued_at) >= ttl)
    }
}

/// Process-local challenge store.
///
/// Cloning is cheap and clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct InMemoryChallengeStore {
    challenges: Arc<Mutex<HashMap<String, PendingChallenge>>>,
    ttl: Option<Duration>,
}

impl InMemoryChallengeStore {
    /// Create a store whose challenges live until consumed or replaced.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose challenges also stop validating after `ttl`.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            challenges: Arc::default(),
            ttl: Some(ttl),
        }
    }

    /// Number of pending challenges, expired ones included until purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no challenge is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired challenge and return how many were removed.
    ///
    /// Scans the whole map under the lock, so call it from a background task
    /// rather than per request. A no-op without a TTL.
    pub fn purge_expired(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }

        let now = Instant::now();
        let mut challenges = self.lock();
        let before = challenges.len();
        challenges.retain(|_, pending| !pending.is_expired(self.ttl, now));
        before - challenges.len()
    }

    // The map holds no cross-entry invariant a panicking writer could break.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, PendingChallenge>> {
        self.challenges.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChallengeStore for InMemoryChallengeStore {
    async fn issue(&self, identity: &str) -> Result<String> {
        let secret = generate_secret();
        let now = Instant::now();

        self.lock().insert(
            identity.to_string(),
            PendingChallenge {
                secret: secret.clone(),
                issued_at: now,
            },
        );

        tracing::debug!(identity = %identity, "Issued challenge");
        Ok(secret)
    }

    async fn validate(&self, identity: &str, presented: &str) -> Result<bool> {
        // Atomic get-and-remove
        let pending = self.lock().remove(identity);

        let Some(pending) = pending else {
            tracing::debug!(identity = %identity, "No pending challenge");
            return Ok(false);
        };

        if pending.is_expired(self.ttl, Instant::now()) {
            tracing::debug!(identity = %identity, "Challenge expired");
            return Ok(false);
        }

        Ok(constant_time_eq::constant_time_eq(
            pending.secret.as_bytes(),
            presented.as_bytes(),
        ))
    }
}
