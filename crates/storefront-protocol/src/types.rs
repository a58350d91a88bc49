//! Core protocol types for Storefront's request and response bodies.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The identity of a registered user: their email address.
///
/// A newtype over `String` so an identity can't be confused with a password
/// or a session token, even though all three are strings underneath.
/// No format validation happens anywhere; any string is accepted.
///
/// Serializes as the bare string (`"alice@example.com"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub String);

impl Identity {
    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Identity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// The JSON body of `signUp` and `signIn`: `{"email": ..., "password": ...}`.
///
/// Both fields are required. Unknown fields are ignored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Builds a credentials body. Mostly useful for clients and tests.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The email as an [`Identity`].
    pub fn identity(&self) -> Identity {
        Identity(self.email.clone())
    }
}

// Hand-written so passwords never end up in logs via `{:?}`.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// One entry of the product catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Product {
    pub name: &'static str,
    pub price: f64,
}

/// Renders as `{Name Price}`, e.g. `{Kayak 279}` or `{Soccer Ball 19.5}`.
///
/// `f64`'s `Display` already drops a zero fraction and trailing zeros,
/// which is exactly the listing format clients expect.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {}}}", self.name, self.price)
    }
}
