//! `StorefrontServer` builder and server loop.
//!
//! This is the entry point for running Storefront. It ties the layers
//! together: HTTP (axum) → protocol (body decoding) → session (stores, gate).

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use storefront_protocol::JsonCodec;
use storefront_session::{
    Clock, CredentialStore, Gate, SessionConfig, SessionStore, SharedSessions,
    SystemClock, spawn_sweeper,
};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::handler::router;
use crate::{ServerConfig, StorefrontError};

/// Shared server state passed to every request handler.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. Both stores
/// sit behind a `Mutex`: the credential store directly, the session store
/// inside the gate.
pub(crate) struct ServerState<C: Clock> {
    pub(crate) credentials: Mutex<CredentialStore>,
    pub(crate) gate: Gate<C>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Storefront server.
///
/// # Example
///
/// ```rust,ignore
/// let server = StorefrontServer::builder()
///     .bind("0.0.0.0:9001")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct StorefrontServerBuilder {
    bind_addr: String,
    session_config: SessionConfig,
}

impl StorefrontServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:9001".to_string(),
            session_config: SessionConfig::default(),
        }
    }

    /// Starts from a fully loaded [`ServerConfig`].
    pub fn config(self, config: ServerConfig) -> Self {
        self.bind(&config.bind).session_config(config.session)
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Binds the listener and builds a server on the system clock.
    pub async fn build(self) -> Result<StorefrontServer<SystemClock>, StorefrontError> {
        self.build_with_clock(SystemClock).await
    }

    /// Binds the listener and builds a server that reads time from `clock`.
    ///
    /// # Errors
    /// Returns [`StorefrontError::Session`] if the session config is
    /// unusable, before anything is bound.
    pub async fn build_with_clock<C: Clock + Clone>(
        self,
        clock: C,
    ) -> Result<StorefrontServer<C>, StorefrontError> {
        self.session_config.validate()?;

        let listener = TcpListener::bind(&self.bind_addr).await.map_err(|source| {
            StorefrontError::Bind {
                addr: self.bind_addr.clone(),
                source,
            }
        })?;
        tracing::info!(addr = %self.bind_addr, "HTTP listener bound");

        let sessions = SessionStore::shared();
        let state = Arc::new(ServerState {
            credentials: Mutex::new(CredentialStore::new()),
            gate: Gate::new(sessions.clone(), clock, self.session_config),
            codec: JsonCodec,
        });

        Ok(StorefrontServer {
            listener,
            sessions,
            state,
        })
    }
}

impl Default for StorefrontServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Storefront server.
///
/// Call [`run()`](Self::run) to start serving requests.
pub struct StorefrontServer<C: Clock> {
    listener: TcpListener,
    sessions: SharedSessions,
    state: Arc<ServerState<C>>,
}

impl StorefrontServer<SystemClock> {
    /// Creates a new builder.
    pub fn builder() -> StorefrontServerBuilder {
        StorefrontServerBuilder::new()
    }
}

impl<C: Clock + Clone> StorefrontServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// The live session store, for inspection.
    pub fn sessions(&self) -> &SharedSessions {
        &self.sessions
    }

    /// The route table over this server's state.
    pub fn router(&self) -> Router {
        router(Arc::clone(&self.state))
    }

    /// Serves requests until the process is terminated.
    ///
    /// Starts the session sweeper first if the session config asks for one.
    pub async fn run(self) -> Result<(), StorefrontError> {
        let config = self.state.gate.config();
        if let Some(every) = config.sweep_interval {
            spawn_sweeper(
                self.sessions.clone(),
                self.state.gate.clock().clone(),
                every,
            )?;
        }

        tracing::info!(
            addr = ?self.listener.local_addr().ok(),
            ttl_secs = config.ttl.as_secs(),
            "Storefront server running"
        );

        let app = self.router();
        axum::serve(self.listener, app).await?;
        Ok(())
    }
}
