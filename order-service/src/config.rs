//! Configuration management for the order service.
//!
//! Loads configuration from environment variables (optionally seeded from a
//! `.env` file by the binary). The gateway key id and secret are required;
//! everything else has a default.

use openroot_razorpay::{KeySecret, DEFAULT_API_URL};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default outbound gateway timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default receipt prefix
pub const DEFAULT_RECEIPT_PREFIX: &str = "openroot";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("Invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Raw value
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Gateway credentials and endpoint
    pub razorpay: RazorpayConfig,
    /// Order minting options
    pub order: OrderConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// Razorpay configuration
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// Public key id
    pub key_id: String,
    /// Key secret (never logged)
    pub key_secret: KeySecret,
    /// API base URL
    pub api_url: String,
    /// Timeout for each outbound request
    pub timeout: Duration,
}

/// Order options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfig {
    /// Receipts are `"<prefix>_<unix millis>"`
    pub receipt_prefix: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let optional = |name: &'static str, default: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_or(&lookup, "RAZORPAY_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "RAZORPAY_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            server: ServerConfig {
                host: optional("HOST", DEFAULT_HOST),
                port,
            },
            razorpay: RazorpayConfig {
                key_id: required("RAZORPAY_KEY_ID")?,
                key_secret: KeySecret::new(required("RAZORPAY_KEY_SECRET")?),
                api_url: optional("RAZORPAY_API_URL", DEFAULT_API_URL),
                timeout: Duration::from_secs(timeout_secs),
            },
            order: OrderConfig {
                receipt_prefix: optional("RECEIPT_PREFIX", DEFAULT_RECEIPT_PREFIX),
            },
        })
    }

    /// Socket address string the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_keys_are_set() {
        let config = Config::from_lookup(lookup_from(&[
            ("RAZORPAY_KEY_ID", "rzp_test_key"),
            ("RAZORPAY_KEY_SECRET", "testsecret"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.razorpay.key_id, "rzp_test_key");
        assert_eq!(config.razorpay.key_secret.expose(), "testsecret");
        assert_eq!(config.razorpay.api_url, "https://api.razorpay.com/v1");
        assert_eq!(config.razorpay.timeout, Duration::from_secs(10));
        assert_eq!(config.order.receipt_prefix, "openroot");
    }

    #[test]
    fn overrides_are_honoured() {
        let config = Config::from_lookup(lookup_from(&[
            ("RAZORPAY_KEY_ID", "rzp_live_key"),
            ("RAZORPAY_KEY_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("RAZORPAY_API_URL", "http://localhost:9999/v1"),
            ("RAZORPAY_TIMEOUT_SECS", "3"),
            ("RECEIPT_PREFIX", "classes"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.razorpay.api_url, "http://localhost:9999/v1");
        assert_eq!(config.razorpay.timeout, Duration::from_secs(3));
        assert_eq!(config.order.receipt_prefix, "classes");
    }

    #[test]
    fn missing_key_id_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("RAZORPAY_KEY_SECRET", "testsecret")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("RAZORPAY_KEY_ID"));
    }

    #[test]
    fn empty_secret_counts_as_missing() {
        let result = Config::from_lookup(lookup_from(&[
            ("RAZORPAY_KEY_ID", "rzp_test_key"),
            ("RAZORPAY_KEY_SECRET", "  "),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("RAZORPAY_KEY_SECRET"));
    }

    #[test]
    fn unparsable_port_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("RAZORPAY_KEY_ID", "rzp_test_key"),
            ("RAZORPAY_KEY_SECRET", "testsecret"),
            ("PORT", "fifty"),
        ]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid {
                name: "PORT",
                value: "fifty".to_string()
            }
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("RAZORPAY_KEY_ID", "rzp_test_key"),
            ("RAZORPAY_KEY_SECRET", "testsecret"),
            ("RAZORPAY_TIMEOUT_SECS", "0"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "RAZORPAY_TIMEOUT_SECS", .. })
        ));
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = Config::from_lookup(lookup_from(&[
            ("RAZORPAY_KEY_ID", "rzp_test_key"),
            ("RAZORPAY_KEY_SECRET", "do-not-print-me"),
        ]))
        .unwrap();

        assert!(!format!("{config:?}").contains("do-not-print-me"));
    }
}
