//! Recording challenge store for testing.

use crate::error::Result;
use crate::providers::ChallengeStore;
use crate::stores::InMemoryChallengeStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Challenge store that counts calls.
///
/// Delegates to an [`InMemoryChallengeStore`] so issued secrets really
/// validate, and records how often each operation ran. Handler tests use it
/// to assert that a code path never issued a challenge.
#[derive(Clone, Default)]
pub struct RecordingChallengeStore {
    inner: InMemoryChallengeStore,
    issued: Arc<AtomicUsize>,
    validated: Arc<AtomicUsize>,
}

impl RecordingChallengeStore {
    /// Create a new recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `issue` calls so far.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }

    /// Number of `validate` calls so far.
    #[must_use]
    pub fn validate_count(&self) -> usize {
        self.validated.load(Ordering::SeqCst)
    }

    /// Number of challenges still pending.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.len()
    }
}

impl ChallengeStore for RecordingChallengeStore {
    async fn issue(&self, identity: &str) -> Result<String> {
        self.issued.fetch_add(1, Ordering::SeqCst);
        self.inner.issue(identity).await
    }

    async fn validate(&self, identity: &str, presented: &str) -> Result<bool> {
        self.validated.fetch_add(1, Ordering::SeqCst);
        self.inner.validate(identity, presented).await
    }
}
