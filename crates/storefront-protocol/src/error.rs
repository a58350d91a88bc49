//! Error types for the protocol layer.
//!
//! Each crate in Storefront defines its own error enum. A `ProtocolError`
//! always means the problem is in decoding a request or rendering a
//! response, never in session bookkeeping.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields, wrong data
    /// types, or a truncated body. The HTTP layer answers these with 400.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Writing a textual response failed.
    #[error("render failed: {0}")]
    Render(#[from] std::fmt::Error),
}
