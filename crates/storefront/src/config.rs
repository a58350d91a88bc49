//! Process configuration read from the environment.
//!
//! | variable                         | default        |
//! |----------------------------------|----------------|
//! | `STOREFRONT_BIND`                | `0.0.0.0:9001` |
//! | `STOREFRONT_SESSION_TTL_SECS`    | `120`          |
//! | `STOREFRONT_SWEEP_INTERVAL_SECS` | unset (lazy eviction only) |
//!
//! Logging is configured separately through `RUST_LOG`.

use std::time::Duration;

use storefront_session::SessionConfig;

use crate::StorefrontError;

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:9001";

/// Everything the binary needs to start a server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: String,
    /// Session TTL, cookie name, and sweeper interval.
    pub session: SessionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            session: SessionConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, StorefrontError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable
    /// name to its value.
    ///
    /// # Errors
    /// Returns [`StorefrontError::Config`] if a duration is not a positive
    /// whole number of seconds, and [`StorefrontError::Session`] if the TTL
    /// is larger than [`MAX_SESSION_TTL`](storefront_session::MAX_SESSION_TTL).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorefrontError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = lookup("STOREFRONT_BIND") {
            config.bind = bind;
        }
        if let Some(raw) = lookup("STOREFRONT_SESSION_TTL_SECS") {
            config.session.ttl = parse_secs("STOREFRONT_SESSION_TTL_SECS", &raw)?;
        }
        if let Some(raw) = lookup("STOREFRONT_SWEEP_INTERVAL_SECS") {
            config.session.sweep_interval =
                Some(parse_secs("STOREFRONT_SWEEP_INTERVAL_SECS", &raw)?);
        }

        config.session.validate()?;
        Ok(config)
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<Duration, StorefrontError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(StorefrontError::Config(format!("{key} must be greater than 0"))),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(StorefrontError::Config(format!("{key}={raw:?}: {e}"))),
    }
}
