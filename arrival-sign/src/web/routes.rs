//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::error;

use super::state::AppState;
use super::templates::BoardTemplate;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(board_page))
        .route("/health", get(health))
        .route("/board", get(board_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Latest snapshot as JSON.
async fn board_json(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = state.board.current().await.ok_or(AppError::Unavailable {
        message: "no data yet".to_string(),
    })?;
    Ok(Json(snapshot.as_ref()).into_response())
}

/// The sign as HTML.
async fn board_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.board.current().await;
    let template = BoardTemplate {
        station: snapshot
            .as_deref()
            .map_or(&*state.station, |board| board.station.as_str()),
        board: snapshot.as_deref(),
    };
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;
    Ok(Html(html))
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Nothing has been published yet
    Unavailable { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => {
                error!(%message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
