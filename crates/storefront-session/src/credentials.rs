//! The credential store: who is allowed to sign in.
//!
//! Secrets are kept and compared as plaintext. There is no hashing, no
//! salting, and no constant-time comparison. A deployment that stores real
//! passwords must replace `verify` with a salted one-way hash check before
//! anything else.

use std::collections::HashMap;

use storefront_protocol::Identity;

use crate::SessionError;

/// Maps an identity (email) to its secret (password).
///
/// Like [`SessionStore`](crate::SessionStore) this is a plain map with
/// `&mut self` writers; the server wraps it in a mutex.
#[derive(Debug, Default)]
pub struct CredentialStore {
    users: HashMap<Identity, String>,
}

impl CredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `identity` with `secret` if the identity is not taken.
    ///
    /// No validation of the identity format or the secret's strength is
    /// performed; the empty string is a valid identity.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyExists`] if the identity is already
    /// registered. The existing secret is not modified.
    pub fn register(
        &mut self,
        identity: Identity,
        secret: impl Into<String>,
    ) -> Result<(), SessionError> {
        if self.users.contains_key(&identity) {
            return Err(SessionError::AlreadyExists(identity));
        }
        tracing::info!(%identity, "user registered");
        self.users.insert(identity, secret.into());
        Ok(())
    }

    /// Returns `true` iff `identity` exists and its stored secret equals
    /// `secret` byte-for-byte.
    pub fn verify(&self, identity: &Identity, secret: &str) -> bool {
        self.users
            .get(identity)
            .is_some_and(|stored| stored.as_bytes() == secret.as_bytes())
    }

    /// Returns `true` if the identity is registered.
    pub fn contains(&self, identity: &Identity) -> bool {
        self.users.contains_key(identity)
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
