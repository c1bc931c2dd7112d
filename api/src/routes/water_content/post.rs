use axum::{Json, body::Bytes, extract::State};
use common::format_validation_errors;
use serde::Deserialize;
use services::water_content_service::SavedCalculation;
use validator::Validate;

use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SaveWaterContentRequest {
    #[validate(length(max = 500, message = "notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

impl SaveWaterContentRequest {
    /// An empty body is the same as `{}`. The content type is not checked.
    fn parse(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let req: Self = serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?;
        req.validate()
            .map_err(|e| ApiError::BadRequest(format_validation_errors(&e)))?;
        Ok(req)
    }
}

/// POST /api/save-water-content
///
/// Derives water content for the latest measurement and stores it unless that
/// measurement was already processed.
///
/// ### Request Body (optional)
/// ```json
/// { "notes": "manual save from bench" }
/// ```
///
/// ### Responses
/// - `200 OK` with calculation and save outcome. A failed insert still
///   answers 200, with `auto_saved: false` and `save_error` set.
/// - `400 Bad Request` for malformed JSON or notes longer than 500 characters
/// - `404 Not Found` when there are no measurements
pub async fn save_water_content(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<SavedCalculation>>, ApiError> {
    let req = SaveWaterContentRequest::parse(&body)?;

    let result = state
        .water_content()
        .calculate_and_save(req.notes)
        .await
        .map_err(ApiError::service("Failed to save water content"))?;

    let message = if result.outcome.auto_saved {
        "Water content saved successfully"
    } else if result.outcome.save_skipped {
        "Water content already saved for this measurement"
    } else {
        "Water content calculated (save failed)"
    };

    Ok(Json(ApiResponse::success(result, message)))
}
