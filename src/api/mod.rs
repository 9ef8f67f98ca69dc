//! HTTP relay between the chat front-end and the upstream provider.
//!
//! Exposes `/api/config`, `/api/chat` and `/health`, and optionally serves the
//! built front-end from a static directory.

mod error;
mod handlers;
mod types;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::builder::LLMBackend;
use crate::chat::ChatProvider;
use crate::config::SessionConfig;
use crate::error::LLMError;
use handlers::{handle_chat, handle_config, handle_fallback, handle_health};

pub use error::RelayError;
pub use handlers::EMPTY_REPLY;
pub use types::{
    parse_chat_request, ChatReply, ConfigResponse, ErrorBody, HealthResponse, WireMessage,
};

/// Relay server holding the immutable startup configuration
pub struct Server {
    session: Arc<SessionConfig>,
    backend: LLMBackend,
    /// `None` when no credential is configured; chat requests then fail fast
    provider: Option<Arc<dyn ChatProvider>>,
    static_dir: Option<PathBuf>,
}

/// Internal server state shared between request handlers
#[derive(Clone)]
struct ServerState {
    session: Arc<SessionConfig>,
    backend: LLMBackend,
    provider: Option<Arc<dyn ChatProvider>>,
    /// Front-end files with `index.html` as the catch-all
    static_files: Option<ServeDir<ServeFile>>,
}

impl Server {
    /// Creates a new relay for the given session configuration and upstream provider
    pub fn new(
        session: SessionConfig,
        backend: LLMBackend,
        provider: Option<Box<dyn ChatProvider>>,
    ) -> Self {
        Self {
            session: Arc::new(session),
            backend,
            provider: provider.map(Arc::from),
            static_dir: None,
        }
    }

    /// Serves the front-end from `dir` when it exists; unknown non-API paths get its `index.html`
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn router(&self) -> Router {
        let static_files = self.static_dir.as_ref().filter(|d| d.is_dir()).map(|dir| {
            log::info!("Serving front-end from {}", dir.display());
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
        });

        Router::new()
            .route("/api/config", get(handle_config))
            .route("/api/chat", post(handle_chat))
            .route("/health", get(handle_health))
            .fallback(handle_fallback)
            .layer(CorsLayer::permissive())
            .with_state(ServerState {
                session: self.session.clone(),
                backend: self.backend,
                provider: self.provider.clone(),
                static_files,
            })
    }

    /// Binds `addr` (e.g. "0.0.0.0:3001") and serves until the process stops
    pub async fn run(self, addr: &str) -> Result<(), LLMError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| LLMError::Generic(format!("failed to bind {addr}: {e}")))?;
        self.serve(listener).await
    }

    /// Serves on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<(), LLMError> {
        if let Ok(addr) = listener.local_addr() {
            log::info!("Server listening at http://{addr}");
        }
        log::info!(
            "Upstream provider: {}{}",
            self.backend.id(),
            if self.provider.is_some() {
                ""
            } else {
                " (no API key configured)"
            }
        );

        axum::serve(listener, self.router())
            .await
            .map_err(|e| LLMError::Generic(e.to_string()))
    }
}
