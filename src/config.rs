//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_NAMESPACE;

/// Square API environment the upstream client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareEnvironment {
    Sandbox,
    Production,
}

impl SquareEnvironment {
    /// Parses `SQUARE_ENVIRONMENT`; anything other than `production` is sandbox.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Sandbox
        }
    }

    /// Base URL of the Square REST API.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://connect.squareup.com",
            Self::Sandbox => "https://connect.squareupsandbox.com",
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Redis connection URL; selects the shared cache when present
    pub redis_url: Option<String>,
    /// Prefix applied to every key in the shared cache
    pub cache_namespace: String,
    /// Square API access token
    pub square_access_token: String,
    /// Square API environment
    pub square_environment: SquareEnvironment,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 4000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `REDIS_URL` - Redis URL, in-memory cache when unset or empty
    /// - `CACHE_NAMESPACE` - Shared cache key prefix (default: `storefront:`)
    /// - `SQUARE_ACCESS_TOKEN` - Square API token (default: empty)
    /// - `SQUARE_ENVIRONMENT` - `production` or sandbox (default: sandbox)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed_var("SERVER_PORT").unwrap_or(defaults.server_port),
            default_ttl: parsed_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            cleanup_interval: parsed_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            redis_url: non_empty_var("REDIS_URL"),
            cache_namespace: non_empty_var("CACHE_NAMESPACE").unwrap_or(defaults.cache_namespace),
            square_access_token: env::var("SQUARE_ACCESS_TOKEN").unwrap_or_default(),
            square_environment: env::var("SQUARE_ENVIRONMENT")
                .map(|v| SquareEnvironment::parse(&v))
                .unwrap_or(defaults.square_environment),
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 4000,
            default_ttl: 300,
            cleanup_interval: 60,
            redis_url: None,
            cache_namespace: DEFAULT_NAMESPACE.to_string(),
            square_access_token: String::new(),
            square_environment: SquareEnvironment::Sandbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 4000);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.cleanup_interval, 60);
        assert!(config.redis_url.is_none());
        assert_eq!(config.cache_namespace, "storefront:");
        assert_eq!(config.square_environment, SquareEnvironment::Sandbox);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("DEFAULT_TTL");
        env::remove_var("CLEANUP_INTERVAL");
        env::remove_var("REDIS_URL");
        env::remove_var("CACHE_NAMESPACE");
        env::remove_var("SQUARE_ENVIRONMENT");

        let config = Config::from_env();
        assert_eq!(config.server_port, 4000);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.cleanup_interval, 60);
        assert!(config.redis_url.is_none());
        assert_eq!(config.cache_namespace, "storefront:");
    }

    #[test]
    fn test_square_environment_parse() {
        assert_eq!(SquareEnvironment::parse("production"), SquareEnvironment::Production);
        assert_eq!(SquareEnvironment::parse("PRODUCTION"), SquareEnvironment::Production);
        assert_eq!(SquareEnvironment::parse("sandbox"), SquareEnvironment::Sandbox);
        assert_eq!(SquareEnvironment::parse(""), SquareEnvironment::Sandbox);
        assert_eq!(
            SquareEnvironment::Production.base_url(),
            "https://connect.squareup.com"
        );
    }
}
