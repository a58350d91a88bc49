//! # Storefront
//!
//! A small cookie-session authentication server. Users sign up with an
//! email and password, sign in to receive a short-lived `session_token`
//! cookie, browse a fixed product catalog while the session is live, and
//! log out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use storefront::prelude::*;
//!
//! # async fn run() -> Result<(), StorefrontError> {
//! let server = StorefrontServer::builder()
//!     .bind("127.0.0.1:9001")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```
//!
//! ## Routes
//!
//! | method | path               | success                          |
//! |--------|--------------------|----------------------------------|
//! | POST   | `/api/v1/signUp`   | 200, confirmation text           |
//! | POST   | `/api/v1/signIn`   | 200, `session_token` cookie set  |
//! | GET    | `/api/v1/products` | 200, product listing             |
//! | POST   | `/api/v1/logout`   | 200, cookie cleared              |

mod config;
mod cookies;
mod error;
mod handler;
mod server;

pub use config::ServerConfig;
pub use error::{ApiError, StorefrontError};
pub use handler::API_PREFIX;
pub use server::{StorefrontServer, StorefrontServerBuilder};

/// Everything needed to embed or test a Storefront server.
pub mod prelude {
    pub use crate::{
        ApiError, ServerConfig, StorefrontError, StorefrontServer,
        StorefrontServerBuilder,
    };
    pub use storefront_protocol::{
        Codec, Credentials, Identity, JsonCodec, Product,
    };
    pub use storefront_session::{
        Clock, ManualClock, SessionConfig, SharedSessions, SystemClock,
    };
}
