//! # Salt Bridge challenge protocol
//!
//! Single-use challenges that turn a trusted identity assertion into a
//! credential salt-api's `rest` eauth module can verify.
//!
//! ## Protocol
//!
//! ```text
//! caller ──X-Forwarded-User: alice──▶ bridge
//!                                      │ issue("alice") → secret
//!                                      ▼
//!                    POST /login {"username":"alice","password":secret,"eauth":"rest"}
//!                                      │
//!                                      ▼
//!                                  salt-api ──POST /_callback──▶ bridge
//!                                                                 │ validate("alice", secret)
//!                                                                 ▼
//!                                                         200 ["test.ping"] / 403 {}
//! ```
//!
//! ## Trust model
//!
//! The identity header is trusted unconditionally. Deployments must ensure
//! that every network path to the bridge goes through an edge component that
//! strips and re-sets that header, and that `/_callback` is reachable from
//! salt-api only.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod constants;
pub mod credential;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;
pub mod providers;
pub mod stores;
pub mod utils;

// Re-export main types for convenience
pub use credential::LoginCredential;
pub use error::{AuthError, Result};
pub use providers::ChallengeStore;
pub use stores::{InMemoryChallengeStore, RedisChallengeStore};
