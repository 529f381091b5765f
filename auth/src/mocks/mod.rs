//! Instrumented store implementations for testing.

pub mod challenge_store;
pub mod failing_store;

pub use challenge_store::RecordingChallengeStore;
pub use failing_store::FailingChallengeStore;
