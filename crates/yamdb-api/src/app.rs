//! Application builder: wires router, middleware and state into an Axum app,
//! and runs it.

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use yamdb_core::error::{AppError, ErrorKind};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = build_cors_layer(&server.cors);
    let timeout = Duration::from_secs(server.request_timeout_seconds);

    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn run_server(
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), AppError> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let app = build_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;

    tracing::info!(%addr, "YaMDb server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
