//! HTTP handlers and response payloads.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use pinfeed_core::NormalizedEvent;
use pinfeed_providers::{FetchOptions, normalize_events};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

const STATUS_PAGE: &str = "<h1>Pinfeed Calendar API</h1><p>Status: Running</p>";

/// Successful events payload.
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub success: bool,
    pub data: Vec<NormalizedEvent>,
}

/// Error payload for any failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Health report: the server is up, the calendar source may not be.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub calendar: &'static str,
    pub error: Option<String>,
}

/// `GET /api` and `GET /api/`: human-readable status page.
pub async fn status_page() -> Html<&'static str> {
    Html(STATUS_PAGE)
}

/// `GET /api/v1/health`: liveness plus calendar source status.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (calendar, error) = match state.source() {
        Some(_) => ("initialized", None),
        None => ("failed", state.init_error().map(str::to_string)),
    };
    Json(HealthResponse {
        status: "ok",
        calendar,
        error,
    })
}

/// `GET /api/v1/events`: upcoming events, normalized and color-annotated.
pub async fn events(State(state): State<AppState>) -> Response {
    let Some(source) = state.source() else {
        let message = format!(
            "Calendar not initialized: {}",
            state.init_error().unwrap_or("unknown error")
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(message)),
        )
            .into_response();
    };

    match source.fetch_events(FetchOptions::upcoming()).await {
        Ok(raw) => {
            let data = normalize_events(&raw);
            Json(EventsResponse {
                success: true,
                data,
            })
            .into_response()
        }
        Err(err) => {
            error!(source = source.name(), %err, "failed to fetch events");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(err.to_string())),
            )
                .into_response()
        }
    }
}
