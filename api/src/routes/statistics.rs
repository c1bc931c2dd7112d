use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use services::statistics_service::Statistics;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub success: bool,
    pub statistics: Statistics,
}

pub fn statistics_routes() -> Router<AppState> {
    Router::new().route("/statistics", get(get_statistics))
}

/// GET /api/statistics
///
/// Counts for both tables, the latest measurement, and the water content its
/// return loss maps to. Recomputed on every request.
///
/// ```json
/// {
///   "success": true,
///   "statistics": {
///     "total_measurements": 120,
///     "total_water_content_records": 118,
///     "latest_measurement": { "id": 120, "return_loss_db": -15.0, ... },
///     "latest_water_content": -10.51,
///     "backend_status": "Running",
///     "timestamp": "2025-06-09T10:00:00Z"
///   }
/// }
/// ```
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let statistics = state
        .statistics()
        .summary()
        .await
        .map_err(ApiError::service("Failed to fetch statistics"))?;

    Ok(Json(StatisticsResponse {
        success: true,
        statistics,
    }))
}
