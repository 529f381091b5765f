//! Login credential exchanged with salt-api.
//!
//! The same triple travels twice: the bridge writes it as the body of the
//! rewritten `POST /login`, and salt-api's `rest` eauth module posts it back
//! to the validator callback.

use crate::constants::EAUTH_METHOD;
use crate::error::{AuthError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Credential triple understood by salt-api's login endpoint.
///
/// Field order is the wire order: `{"username":..,"password":..,"eauth":..}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredential {
    /// Asserted identity.
    pub username: String,

    /// Challenge secret issued for `username`.
    pub password: String,

    /// External-auth module tag. Optional on the callback side, where `null`
    /// or any other non-string value reads as empty.
    #[serde(rename = "eauth", default, deserialize_with = "lenient_tag")]
    pub auth_method: String,
}

impl LoginCredential {
    /// Build the credential the bridge sends downstream for `identity`.
    #[must_use]
    pub fn for_challenge(identity: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: identity.into(),
            password: secret.into(),
            auth_method: EAUTH_METHOD.to_string(),
        }
    }

    /// Encode as a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SerializationError`] if encoding fails.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| AuthError::SerializationError(e.to_string()))
    }

    /// Decode a JSON callback body.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedCredential`] if the body is not a JSON
    /// object carrying string `username` and `password` fields.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| AuthError::MalformedCredential(e.to_string()))
    }

    /// Decode a `application/x-www-form-urlencoded` callback body.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedCredential`] if `username` or `password`
    /// is missing.
    pub fn from_form(body: &[u8]) -> Result<Self> {
        serde_urlencoded::from_bytes(body)
            .map_err(|e| AuthError::MalformedCredential(e.to_string()))
    }
}

fn lenient_tag<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tag {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Tag::deserialize(deserializer)? {
        Tag::Text(tag) => tag,
        Tag::Other(_) => String::new(),
    })
}

impl fmt::Debug for LoginCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredential")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("auth_method", &self.auth_method)
            .finish()
    }
}
