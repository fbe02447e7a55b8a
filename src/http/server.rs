//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, CORS headers, path normalization)
//! - Serve on a bound listener until shutdown is broadcast

use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::get,
    Router, ServiceExt,
};
use std::future::IntoFuture;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::util::MapRequest;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::http::handlers::{fallback, health, list_messages, post_messages};
use crate::http::headers::{lowercase_path, with_cors};
use crate::store::MessageStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MessageStore>,
}

impl AppState {
    pub fn new(store: MessageStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Router wrapped in the path-lowercasing step.
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Error type for the serve loop.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the routes. OPTIONS, HEAD and unknown routes land in `fallback`.
///
/// Request bodies are unbounded; a large POST is ingested like any other.
pub fn router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health).head(fallback).fallback(fallback))
        .route(
            "/messages",
            get(list_messages)
                .head(fallback)
                .post(post_messages)
                .fallback(fallback),
        )
        .fallback(fallback)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http());

    with_cors(router)
}

/// Full service: routes plus case-insensitive path matching.
pub fn app(state: AppState) -> App {
    MapRequest::new(router(state), lowercase_path as fn(Request) -> Request)
}

/// HTTP server for the message fixture.
pub struct HttpServer {
    app: App,
    state: AppState,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            app: app(state.clone()),
            state,
        }
    }

    /// Server with an empty store sized from `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(AppState::new(MessageStore::new(config.store.capacity)))
    }

    /// Serve on `listener` until `shutdown` fires, then drop the listener.
    ///
    /// Connections already accepted are not waited for.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            capacity = self.state.store.capacity(),
            "HTTP server starting"
        );

        let service = ServiceExt::<Request>::into_make_service(self.app);
        let serve = axum::serve(listener, service).into_future();

        tokio::select! {
            result = serve => result?,
            _ = shutdown.recv() => {
                tracing::info!("Shutdown requested, closing listener");
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
