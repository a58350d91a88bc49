//! Error types for the session layer.

use storefront_protocol::Identity;

/// Errors that can occur while registering users or checking sessions.
///
/// The gate's rejection states each have their own variant so the HTTP
/// layer can log precisely while still answering with a coarse status.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Registration was attempted for an identity that already exists.
    /// The stored secret is left untouched.
    #[error("user {0} already exists")]
    AlreadyExists(Identity),

    /// The request carried no session cookie.
    #[error("no session cookie")]
    MissingToken,

    /// The session cookie was present but could not be read
    /// (e.g., the `Cookie` header is not valid text).
    #[error("malformed session cookie: {0}")]
    MalformedCookie(String),

    /// The token doesn't match any stored session. It may have been
    /// logged out, evicted, or never issued.
    #[error("unknown session token")]
    UnknownToken,

    /// The token matched a session whose expiry has passed. The session
    /// has already been evicted by the time this error is returned.
    #[error("session for {owner} expired")]
    Expired { owner: Identity },

    /// `now + ttl` does not fit in a timestamp.
    #[error("session expiry is out of range")]
    ExpiryOutOfRange,

    /// A session setting can't be used (zero or oversized TTL, zero sweep
    /// interval).
    #[error("invalid session config: {0}")]
    InvalidConfig(String),
}

impl SessionError {
    /// Returns `true` for the rejections that mean "sign in again":
    /// missing, unknown, or expired tokens.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Self::MissingToken | Self::UnknownToken | Self::Expired { .. }
        )
    }
}
