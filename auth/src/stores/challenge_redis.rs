//! Redis-based challenge store implementation.
//!
//! Lets several bridge replicas share pending challenges: the replica that
//! rewrites `POST /login` and the replica that receives salt-api's callback
//! need not be the same process.
//!
//! # Architecture
//!
//! - **Key**: `salt_bridge_challenge:{identity}` → secret (plain string)
//! - **Issue**: `SET` (or `SET EX` when a TTL is configured) overwrites any pending secret
//! - **Validate**: `GETDEL` removes the entry and returns it in one command
//!
//! # Example
//!
//! ```no_run
//! use salt_bridge_auth::stores::RedisChallengeStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RedisChallengeStore::new("redis://127.0.0.1:6379", None).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::providers::ChallengeStore;
use crate::utils::generate_secret;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::time::Duration;

/// Key prefix for pending challenges.
const KEY_PREFIX: &str = "salt_bridge_challenge";

/// `Redis`-based challenge store with atomic consumption.
///
/// Provides:
/// - Single-use validation (atomic `GETDEL`)
/// - Optional expiration via key TTL
/// - Connection pooling via `ConnectionManager`
#[derive(Clone)]
pub struct RedisChallengeStore {
    /// Connection manager for connection pooling.
    conn_manager: ConnectionManager,
    ttl: Option<Duration>,
}

impl RedisChallengeStore {
    /// Create a new `Redis` challenge store.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - `Redis` connection URL (e.g., "<redis://127.0.0.1:6379>")
    /// * `ttl` - Lifetime of an unconsumed challenge; `None` keeps it until consumed
    ///
    /// # Errors
    ///
    /// Returns error if connection to `Redis` fails.
    pub async fn new(redis_url: &str, ttl: Option<Duration>) -> Result<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| AuthError::StoreError(format!("Failed to create Redis client: {e}")))?;

        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            AuthError::StoreError(format!("Failed to create Redis connection manager: {e}"))
        })?;

        Ok(Self { conn_manager, ttl })
    }

    /// Get the `Redis` key for an identity.
    fn challenge_key(identity: &str) -> String {
        format!("{KEY_PREFIX}:{identity}")
    }
}

impl ChallengeStore for RedisChallengeStore {
    async fn issue(&self, identity: &str) -> Result<String> {
        let mut conn = self.conn_manager.clone();
        let key = Self::challenge_key(identity);
        let secret = generate_secret();

        match self.ttl {
            Some(ttl) => {
                let ttl_seconds = ttl.as_secs().max(1);
                let _: () = conn
                    .set_ex(&key, &secret, ttl_seconds)
                    .await
                    .map_err(|e| AuthError::StoreError(format!("Failed to store challenge: {e}")))?;
            }
            None => {
                let _: () = conn
                    .set(&key, &secret)
                    .await
                    .map_err(|e| AuthError::StoreError(format!("Failed to store challenge: {e}")))?;
            }
        }

        tracing::debug!(identity = %identity, "Stored challenge in Redis");

        Ok(secret)
    }

    async fn validate(&self, identity: &str, presented: &str) -> Result<bool> {
        let mut conn = self.conn_manager.clone();
        let key = Self::challenge_key(identity);

        // GETDEL: read and delete in one command, so a challenge has one consumer
        let stored: Option<String> = conn
            .get_del(&key)
            .await
            .map_err(|e| AuthError::StoreError(format!("Failed to consume challenge: {e}")))?;

        Ok(stored.is_some_and(|secret| {
            constant_time_eq::constant_time_eq(secret.as_bytes(), presented.as_bytes())
        }))
    }
}
