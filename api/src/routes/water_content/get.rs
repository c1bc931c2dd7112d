use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use db::models::water_content::HistoryEntry;
use serde::Serialize;
use services::water_content_service::{SavedCalculation, WaterContentCalculation};

use crate::response::{ApiError, ApiResponse};
use crate::routes::common::{LimitQuery, query_rejection};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RealtimeResponse {
    pub success: bool,
    pub realtime: bool,
    pub data: SavedCalculation,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<HistoryEntry>,
}

/// GET /api/calculate-water-content
///
/// Derives water content for the latest measurement. If the measurement was
/// already processed, the stored value is returned instead. Nothing is written.
///
/// ### Responses
/// - `200 OK` with the calculation envelope (`is_new_calculation`, `should_save`, ...)
/// - `404 Not Found` when there are no measurements
/// - `500 Internal Server Error` on store failure
pub async fn calculate_water_content(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<WaterContentCalculation>>, ApiError> {
    let calculation = state
        .water_content()
        .calculate_from_latest()
        .await
        .map_err(ApiError::service("Failed to calculate water content"))?;

    let message = if calculation.is_new_calculation {
        "Water content calculated"
    } else {
        "Water content retrieved from previous calculation"
    };

    Ok(Json(ApiResponse::success(calculation, message)))
}

/// GET /api/realtime-water-content
///
/// Intended for dashboards polling on an interval. A new measurement is
/// derived and saved once; later polls for the same measurement return the
/// stored value with `save_skipped: true`.
///
/// ```json
/// {
///   "success": true,
///   "realtime": true,
///   "data": {
///     "measurement_id": 42,
///     "water_content_percent": -10.51,
///     "is_new_calculation": true,
///     "auto_saved": true,
///     "water_content_id": 7,
///     "calculation_details": { "formula": "...", "raw_calculation": "..." }
///   },
///   "message": "New measurement processed and saved"
/// }
/// ```
pub async fn realtime_water_content(
    State(state): State<AppState>,
) -> Result<Json<RealtimeResponse>, ApiError> {
    let result = state
        .water_content()
        .realtime()
        .await
        .map_err(ApiError::service("Failed to get real-time water content"))?;

    let message = if result.outcome.auto_saved {
        "New measurement processed and saved"
    } else if result.outcome.save_skipped {
        "Measurement already processed"
    } else {
        "Water content calculated (save failed)"
    };

    Ok(Json(RealtimeResponse {
        success: true,
        realtime: true,
        data: result,
        message: message.into(),
    }))
}

/// GET /api/water-content-history?limit=N
///
/// Newest derived records first, each joined with its source measurement's
/// `frequency`, `s11_magnitude` and `vswr` under `nanovna_measurements`.
/// `limit` defaults to 10 when missing or unusable and is capped at 100.
pub async fn water_content_history(
    State(state): State<AppState>,
    query: Result<Query<LimitQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(query) = query.map_err(query_rejection)?;
    let limit = query.resolve();

    let data = state
        .water_content()
        .history(limit)
        .await
        .map_err(ApiError::service("Failed to fetch water content history"))?;

    Ok(Json(HistoryResponse {
        success: true,
        count: data.len(),
        data,
    }))
}
