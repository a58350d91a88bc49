//! Credential and session management for Storefront.
//!
//! This crate handles everything between "a request arrived with a cookie"
//! and "this request belongs to alice@example.com":
//!
//! 1. **Credentials** — who may sign in ([`CredentialStore`])
//! 2. **Sessions** — which tokens are live and whose they are
//!    ([`SessionStore`], [`Session`])
//! 3. **Lifecycle** — when a session stops being valid
//!    ([`Session::is_expired`]) and lazy eviction of stale records
//! 4. **Gate** — turning a request's cookie into an [`Identity`] or a
//!    rejection ([`Gate`], [`CookieToken`])
//!
//! # How it fits in the stack
//!
//! ```text
//! HTTP layer (above)      ← extracts the cookie, maps errors to status codes
//!     ↕
//! Session layer (this crate)  ← stores, expiry policy, gate
//!     ↕
//! Protocol layer (below)  ← provides Identity, Credentials
//! ```
//!
//! # Eviction
//!
//! Expired sessions are removed lazily, the first time the gate sees them.
//! A session that is created and never presented again stays in memory
//! until the process exits, unless the opt-in [`spawn_sweeper`] task runs.
//!
//! [`Identity`]: storefront_protocol::Identity

mod clock;
mod credentials;
mod error;
mod gate;
mod session;
mod store;
mod sweeper;

pub use clock::{Clock, ManualClock, SystemClock};
pub use credentials::CredentialStore;
pub use error::SessionError;
pub use gate::{CookieToken, Gate};
pub use session::{
    DEFAULT_SESSION_COOKIE, DEFAULT_SESSION_TTL, MAX_SESSION_TTL, Session,
    SessionConfig,
};
pub use store::{SessionStore, SharedSessions};
pub use sweeper::spawn_sweeper;
