//! HTTP frontend for the calendar event feed.
//!
//! Routes:
//! - `GET /api`, `GET /api/`: diagnostic status page
//! - `GET /api/v1/health`: liveness and calendar source status
//! - `GET /api/v1/events`: upcoming events as normalized JSON
//!
//! All routes allow cross-origin requests from any origin.

pub mod config;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{DEFAULT_PORT, ServerConfig};
pub use state::AppState;

/// Builds the application router with CORS and request tracing applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api", get(routes::status_page))
        .route("/api/", get(routes::status_page))
        .route("/api/v1/health", get(routes::health))
        .route("/api/v1/events", get(routes::events))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
