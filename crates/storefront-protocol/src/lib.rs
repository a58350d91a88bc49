//! Wire protocol for Storefront.
//!
//! This crate defines what travels between an HTTP client and the server:
//!
//! - **Types** ([`Identity`], [`Credentials`], [`Product`]) — the request
//!   bodies and the values the handlers hand back.
//! - **Catalog** ([`catalog`], [`render_catalog`]) — the fixed product list
//!   served to authenticated users, and its plain-text rendering.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how request bodies are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while decoding a body
//!   or rendering a response.
//!
//! # Architecture
//!
//! ```text
//! HTTP (bytes) → Protocol (Credentials) → Session (identity, tokens)
//! ```
//!
//! The protocol layer knows nothing about sessions or cookies. It only knows
//! how to turn bytes into typed values and typed values into text.

mod catalog;
mod codec;
mod error;
mod types;

pub use catalog::{catalog, render_catalog};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{Credentials, Identity, Product};
