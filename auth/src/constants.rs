//! Protocol constants shared by the bridge and the validator.

/// `eauth` value that makes salt-api call back into the bridge.
pub const EAUTH_METHOD: &str = "rest";

/// Length of an issued challenge secret, in characters.
pub const SECRET_LENGTH: usize = 64;

/// Header consulted for the asserted identity when none is configured.
pub const DEFAULT_IDENTITY_HEADER: &str = "X-Forwarded-User";

/// Capabilities granted on a successful callback.
///
/// salt-api treats an empty list as a denial whatever the status code, so at
/// least one entry is required for the login to go through.
pub const GRANTED_CAPABILITIES: &[&str] = &["test.ping"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_never_empty() {
        assert!(!GRANTED_CAPABILITIES.is_empty());
    }

    #[test]
    fn test_protocol_constants() {
        assert_eq!(EAUTH_METHOD, "rest");
        assert_eq!(SECRET_LENGTH, 64);
        assert_eq!(DEFAULT_IDENTITY_HEADER, "X-Forwarded-User");
    }
}
