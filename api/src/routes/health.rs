use axum::{Json, Router, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use util::config;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// `GET /health`, mounted at the root rather than under `/api`.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
///
/// Liveness probe. Does not touch the database and always answers 200.
///
/// ```json
/// {
///   "status": "OK",
///   "message": "nanovna-water-content is running",
///   "timestamp": "2025-06-09T10:00:00Z",
///   "version": "2.0.0"
/// }
/// ```
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK",
        message: format!("{} is running", config::project_name()),
        timestamp: Utc::now(),
        version: config::version(),
    })
}

/// GET /api/test
pub async fn api_test() -> impl IntoResponse {
    Json(TestResponse {
        success: true,
        message: "API is working",
        timestamp: Utc::now(),
    })
}
