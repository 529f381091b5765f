//! Challenge providers.
//!
//! Traits for the stateful dependencies of the bridge, so handlers can be
//! exercised against in-memory implementations and deployed against shared
//! ones.

pub mod challenge_store;

pub use challenge_store::ChallengeStore;
