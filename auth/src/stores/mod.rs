//! Storage implementations for pending challenges.
//!
//! - **In-memory** - one process, one mutex; the default
//! - **Redis** - shared between replicas, atomic consumption via `GETDEL`

pub mod challenge_redis;
pub mod memory;

// Re-exports
pub use challenge_redis::RedisChallengeStore;
pub use memory::InMemoryChallengeStore;
