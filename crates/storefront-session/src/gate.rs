//! The request authentication gate.
//!
//! Every protected request passes through [`Gate::authenticate`], which
//! walks this state machine:
//!
//! ```text
//!            ┌─ cookie absent ─────────────→ MissingToken      (401)
//!            ├─ cookie unreadable ─────────→ MalformedCookie   (400)
//! request ───┤
//!            └─ token ── not in store ─────→ UnknownToken      (401)
//!                  │
//!                  ├── expired ── evict ───→ Expired           (401)
//!                  │
//!                  └── live ───────────────→ Ok(owner)
//! ```
//!
//! Extracting the cookie from HTTP headers is the HTTP layer's job; it hands
//! the result over as a [`CookieToken`].

use storefront_protocol::Identity;

use crate::store::token_prefix;
use crate::{Clock, Session, SessionConfig, SessionError, SharedSessions};

/// What the HTTP layer found when it looked for the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieToken<'a> {
    /// No cookie with the session cookie's name.
    Missing,
    /// The cookie header could not be read; the string says why.
    Malformed(&'a str),
    /// The cookie's value.
    Present(&'a str),
}

impl<'a> CookieToken<'a> {
    /// Steps 1 and 2 of the gate: a token, or the matching rejection.
    pub fn token(self) -> Result<&'a str, SessionError> {
        match self {
            Self::Missing => Err(SessionError::MissingToken),
            Self::Malformed(why) => {
                Err(SessionError::MalformedCookie(why.to_string()))
            }
            Self::Present(token) => Ok(token),
        }
    }
}

/// Issues, checks, and revokes sessions against a shared store.
///
/// The gate holds the store's lock for the whole of each operation, so a
/// lookup and the eviction of an expired session are atomic with respect to
/// every other request.
pub struct Gate<C: Clock> {
    sessions: SharedSessions,
    clock: C,
    config: SessionConfig,
}

impl<C: Clock> Gate<C> {
    /// Creates a gate over `sessions`, reading time from `clock`.
    pub fn new(sessions: SharedSessions, clock: C, config: SessionConfig) -> Self {
        Self {
            sessions,
            clock,
            config,
        }
    }

    /// The store this gate guards.
    pub fn sessions(&self) -> &SharedSessions {
        &self.sessions
    }

    /// The gate's clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The session configuration (TTL, cookie name, sweep interval).
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Opens a new session for `owner` with the configured TTL.
    ///
    /// Call this only after the owner's credentials have been verified.
    ///
    /// # Errors
    /// Returns [`SessionError::ExpiryOutOfRange`] if the TTL pushes the
    /// expiry past the largest representable timestamp.
    pub async fn open(&self, owner: Identity) -> Result<Session, SessionError> {
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;
        sessions.create(owner, self.config.ttl, now).cloned()
    }

    /// Resolves a request's cookie to the identity that owns the session.
    ///
    /// An expired session is deleted before the rejection is returned.
    ///
    /// # Errors
    /// - [`SessionError::MissingToken`] — no cookie
    /// - [`SessionError::MalformedCookie`] — cookie unreadable
    /// - [`SessionError::UnknownToken`] — no such session
    /// - [`SessionError::Expired`] — session expired (and now evicted)
    pub async fn authenticate(
        &self,
        cookie: CookieToken<'_>,
    ) -> Result<Identity, SessionError> {
        let token = cookie.token()?;
        let now = self.clock.now();
        let mut sessions = self.sessions.lock().await;

        let session = sessions.get(token).ok_or(SessionError::UnknownToken)?;
        if session.is_expired(now) {
            let owner = session.owner.clone();
            sessions.delete(token);
            tracing::debug!(
                %owner,
                token = %token_prefix(token),
                "expired session evicted on access"
            );
            return Err(SessionError::Expired { owner });
        }

        Ok(session.owner.clone())
    }

    /// Ends the session named by the request's cookie, if there is one.
    ///
    /// An unknown or already-expired token is not an error: the caller
    /// wanted the session gone and it is.
    ///
    /// # Errors
    /// - [`SessionError::MissingToken`] — no cookie
    /// - [`SessionError::MalformedCookie`] — cookie unreadable
    pub async fn logout(&self, cookie: CookieToken<'_>) -> Result<(), SessionError> {
        let token = cookie.token()?;
        let removed = self.sessions.lock().await.delete(token);
        if removed.is_none() {
            tracing::debug!(
                token = %token_prefix(token),
                "logout for unknown session"
            );
        }
        Ok(())
    }
}
