use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use chrono::{DateTime, Utc};
use db::models::measurement::Model as Measurement;
use serde::Serialize;

use crate::response::{ApiError, ApiResponse};
use crate::routes::common::{LimitQuery, query_rejection};
use crate::state::AppState;

/// The subset of a measurement the dashboard polls for.
#[derive(Debug, Serialize)]
pub struct LatestReturnLoss {
    pub id: i64,
    pub frequency: i64,
    pub return_loss_db: f64,
    pub vswr: f64,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Measurement> for LatestReturnLoss {
    fn from(m: Measurement) -> Self {
        Self {
            id: m.id,
            frequency: m.frequency,
            return_loss_db: m.return_loss_db,
            vswr: m.vswr,
            session_id: m.session_id,
            timestamp: m.created_at,
        }
    }
}

/// GET /api/latest-return-loss
///
/// Returns the measurement with the highest id.
///
/// ### Responses
/// - `200 OK` with `{ id, frequency, return_loss_db, vswr, session_id, timestamp }`
/// - `404 Not Found` when the measurement table is empty
/// - `500 Internal Server Error` when the store is unreachable
pub async fn latest_return_loss(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LatestReturnLoss>>, ApiError> {
    let latest = state
        .measurements()
        .latest()
        .await
        .map_err(ApiError::service("Failed to fetch latest return loss"))?;

    Ok(Json(ApiResponse::success(
        LatestReturnLoss::from(latest),
        "Latest return loss retrieved",
    )))
}

/// GET /api/measurements?limit=N
///
/// Newest measurements first. `limit` defaults to 10 and is capped at 100.
pub async fn list_measurements(
    State(state): State<AppState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Measurement>>>, ApiError> {
    let Query(query) = query.map_err(query_rejection)?;
    let limit = query.resolve();

    let measurements = state
        .measurements()
        .recent(limit)
        .await
        .map_err(ApiError::service("Failed to fetch measurements"))?;

    let message = format!("Retrieved {} measurements", measurements.len());
    Ok(Json(ApiResponse::success(measurements, message)))
}

/// GET /api/measurements/{measurement_id}
pub async fn get_measurement(
    State(state): State<AppState>,
    Path(measurement_id): Path<i64>,
) -> Result<Json<ApiResponse<Measurement>>, ApiError> {
    let measurement = state
        .measurements()
        .by_id(measurement_id)
        .await
        .map_err(ApiError::service("Failed to fetch measurement"))?
        .ok_or_else(|| ApiError::NotFound(format!("Measurement {measurement_id} not found")))?;

    Ok(Json(ApiResponse::success(measurement, "Measurement retrieved")))
}
