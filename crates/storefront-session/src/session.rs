//! Session types: the server's record of a signed-in user.
//!
//! A session tracks:
//! - WHO signed in (`owner`)
//! - HOW the browser proves it (`token`, carried in a cookie)
//! - WHEN it stops being valid (`expires_at`, an absolute UTC instant)
//!
//! Sessions are immutable. Signing in again creates a new session with a
//! new token instead of extending the old one.

use std::time::Duration;

use storefront_protocol::Identity;
use time::OffsetDateTime;

use crate::SessionError;

/// How long a freshly created session stays valid.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(120);

/// Longest TTL a session may be configured with: 100 years.
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Name of the cookie that carries the session token.
pub const DEFAULT_SESSION_COOKIE: &str = "session_token";

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
///
/// Create one with `SessionConfig::default()` and override the fields you
/// care about.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Time-to-live of a new session. Default: 120 seconds.
    pub ttl: Duration,

    /// Cookie name used for the token. Default: `session_token`.
    pub cookie_name: String,

    /// When set, a background task evicts expired sessions on this
    /// interval. Default: `None`, meaning eviction is purely lazy.
    pub sweep_interval: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_SESSION_TTL,
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            sweep_interval: None,
        }
    }
}

impl SessionConfig {
    /// Checks that the TTL is non-zero and at most [`MAX_SESSION_TTL`], and
    /// that a sweep interval, if set, is non-zero.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.ttl.is_zero() {
            return Err(SessionError::InvalidConfig(
                "ttl must be greater than zero".into(),
            ));
        }
        if self.ttl > MAX_SESSION_TTL {
            return Err(SessionError::InvalidConfig(format!(
                "ttl of {}s exceeds the maximum of {}s",
                self.ttl.as_secs(),
                MAX_SESSION_TTL.as_secs()
            )));
        }
        if self.sweep_interval.is_some_and(|every| every.is_zero()) {
            return Err(SessionError::InvalidConfig(
                "sweep interval must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A single signed-in user's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The opaque token handed to the browser: 32 hex characters
    /// (128 bits of randomness).
    pub token: String,

    /// Who signed in. Held by value; removing the user's credentials does
    /// not invalidate the session.
    pub owner: Identity,

    /// The instant after which the session is no longer accepted.
    pub expires_at: OffsetDateTime,
}

impl Session {
    /// The lifecycle rule: a session is expired iff its expiry is strictly
    /// before `now`. At exactly `expires_at` it is still valid.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at < now
    }
}
