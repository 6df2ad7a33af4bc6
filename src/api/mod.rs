//! REST API for bill calculation.
//!
//! Provides two endpoints:
//! - `GET /tariffs` lists registered tariff keys and the table version
//! - `POST /bill` calculates a bill from a JSON request

mod handlers;
pub mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::tariff::TariffRegistry;

/// Immutable application state shared across all request handlers.
///
/// The registry is never mutated after startup, so no locks are needed.
pub struct AppState {
    /// Tariff table bills are calculated against.
    pub registry: TariffRegistry,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tariffs", get(handlers::get_tariffs))
        .route("/bill", post(handlers::post_bill))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
