//! The session store: every issued token and the session it opens.
//!
//! # Concurrency note
//!
//! `SessionStore` is NOT thread-safe by itself; it is a plain `HashMap`
//! with `&mut self` writers. Shared access goes through
//! [`SharedSessions`], a `tokio::sync::Mutex` around the store, so that a
//! lookup, its expiry check, and the eviction that may follow all happen
//! under one lock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use storefront_protocol::Identity;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{Session, SessionError};

/// A session store shared between the gate, the handlers, and the
/// optional sweeper.
pub type SharedSessions = Arc<Mutex<SessionStore>>;

/// Maps session tokens to sessions.
///
/// ## Lifecycle
///
/// ```text
/// create() ──→ [live] ──(now > expires_at)──→ [expired] ──(next lookup)──→ gone
///                 │                                │
///                 └──────────── delete() ──────────┴──────────────────────→ gone
/// ```
///
/// Expired records stay in the map until something looks at them; the
/// store itself never checks the clock on `get`.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a new, empty store for sharing across tasks.
    pub fn shared() -> SharedSessions {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Opens a session for `owner` that expires at `now + ttl`.
    ///
    /// The token is regenerated until it differs from every token in the
    /// store, so a live session is never overwritten. With 128 random bits
    /// the loop practically never runs twice.
    ///
    /// # Errors
    /// Returns [`SessionError::ExpiryOutOfRange`] if `now + ttl` can't be
    /// represented. Nothing is stored in that case.
    pub fn create(
        &mut self,
        owner: Identity,
        ttl: Duration,
        now: OffsetDateTime,
    ) -> Result<&Session, SessionError> {
        let expires_at = time::Duration::try_from(ttl)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or(SessionError::ExpiryOutOfRange)?;

        let mut token = generate_token();
        while self.sessions.contains_key(&token) {
            token = generate_token();
        }

        let session = Session {
            token: token.clone(),
            owner,
            expires_at,
        };

        tracing::info!(
            owner = %session.owner,
            token = %token_prefix(&token),
            expires_at = %session.expires_at,
            "session created"
        );

        Ok(self.sessions.entry(token).or_insert(session))
    }

    /// Looks up a session by token, whether or not it has expired.
    pub fn get(&self, token: &str) -> Option<&Session> {
        self.sessions.get(token)
    }

    /// Removes a session. Deleting a token that isn't there is a no-op.
    ///
    /// Returns the removed session, if there was one.
    pub fn delete(&mut self, token: &str) -> Option<Session> {
        let removed = self.sessions.remove(token);
        if let Some(session) = &removed {
            tracing::info!(
                owner = %session.owner,
                token = %token_prefix(token),
                "session deleted"
            );
        }
        removed
    }

    /// Removes every session that is expired at `now` and returns their
    /// tokens.
    ///
    /// Only the sweeper calls this. Request handling relies on lazy
    /// eviction through the gate.
    pub fn evict_expired(&mut self, now: OffsetDateTime) -> Vec<String> {
        let mut evicted = Vec::new();
        self.sessions.retain(|token, session| {
            if session.is_expired(now) {
                evicted.push(token.clone());
                false
            } else {
                true
            }
        });
        evicted
    }

    /// Number of stored sessions, expired ones included.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if there are no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Generates a random 32-character hex string (128 bits of entropy).
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// First eight characters of a token, for log lines.
pub(crate) fn token_prefix(token: &str) -> String {
    token.chars().take(8).collect()
}

// =========================================================================
// Tests
// =========================================================================
