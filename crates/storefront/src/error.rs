//! Error types for the Storefront server.
//!
//! Two layers:
//!
//! - [`StorefrontError`] wraps every sub-crate error plus startup failures.
//!   This is what the builder, `run()` and the binary return.
//! - [`ApiError`] is the per-request taxonomy. Each variant maps to one HTTP
//!   status, and every request error ends the request without touching the
//!   process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use storefront_protocol::ProtocolError;
use storefront_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    /// A protocol-level error (decode, render).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (duplicate user, bad cookie, expired session).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server loop failed.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Per-request errors, one per HTTP status the API can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed body or unreadable cookie → 400.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Duplicate registration → 409.
    #[error("{0}")]
    Conflict(String),

    /// Missing, unknown, or expired session, or wrong credentials → 401.
    #[error("unauthenticated")]
    Unauthenticated,

    /// The response could not be produced → 500.
    #[error("internal failure: {0}")]
    InternalFailure(String),
}

impl ApiError {
    /// The status code this error is answered with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::InternalFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // The conflict text is meant for the user.
            Self::Conflict(msg) => (status, msg).into_response(),
            Self::InternalFailure(msg) => {
                tracing::error!(error = %msg, "request failed");
                status.into_response()
            }
            Self::BadRequest(_) | Self::Unauthenticated => status.into_response(),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        tracing::debug!(error = %err, "request rejected");
        match err {
            SessionError::AlreadyExists(_) => Self::Conflict(
                "sorry, but user with the same email already exists".into(),
            ),
            SessionError::MalformedCookie(why) => Self::BadRequest(why),
            err if err.is_unauthenticated() => Self::Unauthenticated,
            other => Self::InternalFailure(other.to_string()),
        }
    }
}

impl From<ProtocolError> for ApiError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Decode(e) => {
                tracing::debug!(error = %e, "malformed request body");
                Self::BadRequest(e.to_string())
            }
            ProtocolError::Encode(e) => Self::InternalFailure(e.to_string()),
            ProtocolError::Render(e) => Self::InternalFailure(e.to_string()),
        }
    }
}
