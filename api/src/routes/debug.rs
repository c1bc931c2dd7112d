//! Diagnostics for local development. Never mounted when `APP_ENV=production`.

use axum::{Json, Router, extract::State, routing::get};
use db::models::measurement::Model as Measurement;
use serde::Serialize;

use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ConnectionCheck {
    pub measurements_count: u64,
    pub water_content_count: u64,
}

pub fn debug_routes() -> Router<AppState> {
    Router::new()
        .route("/debug/connection", get(check_connection))
        .route("/debug/latest-measurement", get(latest_measurement))
}

/// GET /api/debug/connection
pub async fn check_connection(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ConnectionCheck>>, ApiError> {
    let stats = state
        .statistics()
        .summary()
        .await
        .map_err(ApiError::service("Database connection failed"))?;

    Ok(Json(ApiResponse::success(
        ConnectionCheck {
            measurements_count: stats.total_measurements,
            water_content_count: stats.total_water_content_records,
        },
        "Database connection OK",
    )))
}

/// GET /api/debug/latest-measurement
///
/// The full latest row, including `s11_magnitude` and `created_at`.
pub async fn latest_measurement(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Measurement>>, ApiError> {
    let latest = state
        .measurements()
        .latest()
        .await
        .map_err(ApiError::service("Failed to fetch latest measurement"))?;

    Ok(Json(ApiResponse::success(latest, "Latest measurement row")))
}
