//! Configuration management for the bridge server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Every value is optional; a value that is set but cannot be parsed is an
//! error rather than silently falling back to the default.

use http::HeaderName;
use reqwest::Url;
use salt_bridge_auth::constants::DEFAULT_IDENTITY_HEADER;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default salt-api base URL.
pub const DEFAULT_SALT_API_URL: &str = "http://127.0.0.1:8000";

/// Default graceful shutdown period in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 300;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used.
    #[error("Invalid {key}={value:?}: {reason}")]
    Invalid {
        /// Environment variable name.
        key: &'static str,
        /// Offending value.
        value: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Bridge configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to bind on all interfaces (`PORT`).
    pub port: u16,
    /// Header carrying the asserted identity (`USER_HEADER_NAME`).
    pub identity_header: HeaderName,
    /// salt-api base URL (`SALT_API_URL`).
    pub salt_api_url: Url,
    /// Forward non-asserted and unmatched requests (`REVERSE_PROXY`).
    pub passthrough: bool,
    /// Grace period for in-flight requests on shutdown (`SHUTDOWN_TIMEOUT`, seconds).
    pub shutdown_timeout: Duration,
    /// Lifetime of an issued challenge (`CHALLENGE_TTL`, seconds, 0 = none).
    pub challenge_ttl: Option<Duration>,
    /// Redis connection URL; the in-memory store is used when unset (`REDIS_URL`).
    pub redis_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    /// Variables already set in the environment take precedence.
    ///
    /// # Errors
    ///
    /// Returns error if any variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns error if any variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = match get("PORT") {
            Some(value) => value
                .parse()
                .map_err(|e| ConfigError::invalid("PORT", &value, e))?,
            None => DEFAULT_PORT,
        };

        let header = get("USER_HEADER_NAME").unwrap_or_else(|| DEFAULT_IDENTITY_HEADER.to_string());
        let identity_header = HeaderName::from_bytes(header.as_bytes())
            .map_err(|e| ConfigError::invalid("USER_HEADER_NAME", &header, e))?;

        let salt_api_url = parse_url(
            "SALT_API_URL",
            &get("SALT_API_URL").unwrap_or_else(|| DEFAULT_SALT_API_URL.to_string()),
        )?;

        let passthrough = match get("REVERSE_PROXY") {
            Some(value) => parse_bool("REVERSE_PROXY", &value)?,
            None => false,
        };

        let shutdown_timeout = Duration::from_secs(match get("SHUTDOWN_TIMEOUT") {
            Some(value) => parse_secs("SHUTDOWN_TIMEOUT", &value)?,
            None => DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        });

        let challenge_ttl = match get("CHALLENGE_TTL") {
            Some(value) => match parse_secs("CHALLENGE_TTL", &value)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            None => None,
        };

        Ok(Self {
            port,
            identity_header,
            salt_api_url,
            passthrough,
            shutdown_timeout,
            challenge_ttl,
            redis_url: get("REDIS_URL"),
        })
    }
}

/// Parse `1`, `t`, `true`, `0`, `f` or `false`, ignoring case.
fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        _ => Err(ConfigError::invalid(
            key,
            value,
            "expected one of 1, t, true, 0, f, false",
        )),
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|e| ConfigError::invalid(key, value, e))
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url: Url = value
        .parse()
        .map_err(|e| ConfigError::invalid(key, value, e))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(ConfigError::invalid(key, value, "missing host")),
        scheme => Err(ConfigError::invalid(
            key,
            value,
            format!("unsupported scheme {scheme:?}"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.identity_header, DEFAULT_IDENTITY_HEADER);
        assert_eq!(config.salt_api_url.as_str(), "http://127.0.0.1:8000/");
        assert!(!config.passthrough);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(300));
        assert_eq!(config.challenge_ttl, None);
        assert_eq!(config.redis_url, None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9090"),
            ("USER_HEADER_NAME", "X-Auth-Request-Email"),
            ("SALT_API_URL", "https://salt.internal:8443"),
            ("REVERSE_PROXY", "TRUE"),
            ("SHUTDOWN_TIMEOUT", "5"),
            ("CHALLENGE_TTL", "30"),
            ("REDIS_URL", "redis://127.0.0.1:6379"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.identity_header, "x-auth-request-email");
        assert_eq!(config.salt_api_url.host_str(), Some("salt.internal"));
        assert!(config.passthrough);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(5));
        assert_eq!(config.challenge_ttl, Some(Duration::from_secs(30)));
        assert_eq!(config.redis_url.as_deref(), Some("redis://127.0.0.1:6379"));
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = load(&[("PORT", ""), ("REVERSE_PROXY", ""), ("REDIS_URL", "")]).unwrap();

        assert_eq!(config.port, 8080);
        assert!(!config.passthrough);
        assert_eq!(config.redis_url, None);
    }

    #[test]
    fn test_zero_ttl_disables_expiry() {
        let config = load(&[("CHALLENGE_TTL", "0")]).unwrap();
        assert_eq!(config.challenge_ttl, None);
    }

    #[test]
    fn test_bool_spellings() {
        for value in ["1", "t", "T", "true", "True", "TRUE"] {
            assert!(parse_bool("REVERSE_PROXY", value).unwrap(), "{value}");
        }
        for value in ["0", "f", "F", "false", "False", "FALSE"] {
            assert!(!parse_bool("REVERSE_PROXY", value).unwrap(), "{value}");
        }
        assert!(parse_bool("REVERSE_PROXY", "yes").is_err());
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let cases = [
            ("PORT", "eighty"),
            ("PORT", "70000"),
            ("USER_HEADER_NAME", "X Forwarded User"),
            ("SALT_API_URL", "not a url"),
            ("SALT_API_URL", "ftp://salt.internal"),
            ("REVERSE_PROXY", "maybe"),
            ("SHUTDOWN_TIMEOUT", "-1"),
            ("CHALLENGE_TTL", "1m"),
        ];

        for (key, value) in cases {
            let ConfigError::Invalid { key: k, value: v, .. } =
                load(&[(key, value)]).expect_err("Should reject");
            assert_eq!(k, key);
            assert_eq!(v, value);
        }
    }

    #[test]
    fn test_error_message_names_variable() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid PORT=\"eighty\""));
    }
}
