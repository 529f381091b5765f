//! Challenge store whose backend is always down.

use crate::error::{AuthError, Result};
use crate::providers::ChallengeStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Challenge store that fails every call with [`AuthError::StoreError`].
///
/// Stands in for an unreachable Redis so handler tests can check that a
/// storage failure never turns into a forwarded login or a granted callback.
#[derive(Clone, Debug, Default)]
pub struct FailingChallengeStore {
    calls: Arc<AtomicUsize>,
}

impl FailingChallengeStore {
    /// Create a new failing store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `issue` and `validate` calls so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> AuthError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        AuthError::StoreError("connection refused".to_string())
    }
}

impl ChallengeStore for FailingChallengeStore {
    async fn issue(&self, _identity: &str) -> Result<String> {
        Err(self.fail())
    }

    async fn validate(&self, _identity: &str, _presented: &str) -> Result<bool> {
        Err(self.fail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_call_fails() {
        let store = FailingChallengeStore::new();

        assert!(matches!(
            store.issue("alice").await,
            Err(AuthError::StoreError(_))
        ));
        assert!(matches!(
            store.validate("alice", "secret").await,
            Err(AuthError::StoreError(_))
        ));
        assert_eq!(store.call_count(), 2);
    }
}
