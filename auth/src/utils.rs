//! Utility functions for challenge generation.

use crate::constants::SECRET_LENGTH;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Generate a cryptographically secure random secret.
///
/// Draws from the operating system CSPRNG, never from a seeded userspace
/// generator. Returns [`SECRET_LENGTH`] alphanumeric characters (~381 bits).
///
/// # Examples
///
/// ```
/// use salt_bridge_auth::utils::generate_secret;
///
/// let secret = generate_secret();
/// assert_eq!(secret.len(), 64);
/// assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
#[must_use]
pub fn generate_secret() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(SECRET_LENGTH)
        .map(char::from)
        .collect()
}
