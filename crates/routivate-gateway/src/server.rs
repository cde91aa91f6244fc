// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::any::Any;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use routivate_core::{RecordStore, RoutivateError};
use routivate_storage::{ContactRepository, InteractionRepository};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    pub contacts: ContactRepository,
    pub interactions: InteractionRepository,
    /// Prefer `X-Forwarded-For` over the TCP peer for client IPs.
    pub trust_forwarded_for: bool,
}

impl AppState {
    /// Builds both repositories over one store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            contacts: ContactRepository::new(Arc::clone(&store)),
            interactions: InteractionRepository::new(store),
            trust_forwarded_for: false,
        }
    }

    pub fn with_trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }
}

/// Server configuration (mirrors `ServerConfig` from routivate-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl ServerConfig {
    fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Builds the application router.
///
/// Routes:
/// - GET /
/// - POST /api/track
/// - POST /api/contact
/// - GET /api/analytics
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/track", post(handlers::post_track))
        .route("/contact", post(handlers::post_contact))
        .route("/analytics", get(handlers::get_analytics));

    let app = Router::new()
        .route("/", get(handlers::get_root))
        .nest("/api", api_routes)
        .with_state(state);

    with_common_layers(app)
}

/// Panic catcher, request tracing, and permissive CORS.
fn with_common_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Last-resort response when a handler panics.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(panic = %detail, "request handler panicked");
    fallback_error_response()
}

/// Plain-text 500 for failures outside the handlers' own error envelopes.
pub(crate) fn fallback_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Something broke!").into_response()
}

/// Binds `config.host:config.port` and serves until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), RoutivateError> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| RoutivateError::Server {
            message: format!("failed to bind {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    serve(listener, state, shutdown).await
}

/// Serves the router on an already bound listener until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), RoutivateError> {
    if let Ok(local) = listener.local_addr() {
        info!("server listening on {local}");
    }

    let app = build_router(state);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .map_err(|e| RoutivateError::Server {
        message: format!("server error: {e}"),
        source: Some(Box::new(e)),
    })?;

    info!("server stopped");
    Ok(())
}
