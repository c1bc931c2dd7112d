//! HTTP route entry point.
//!
//! Route groups, all under `/api`:
//! - `/test` → API smoke test
//! - `/latest-return-loss`, `/measurements` → upstream measurements (read-only)
//! - `/calculate-water-content`, `/save-water-content`, `/realtime-water-content`,
//!   `/water-content-history` → derived water content
//! - `/statistics` → rollup over both tables
//! - `/debug/*` → diagnostics (mounted only outside production)
//!
//! `/health` lives at the root and is added in [`crate::app`].

use axum::{
    Json, Router,
    extract::OriginalUri,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;

use crate::routes::{
    debug::debug_routes, health::api_test, measurements::measurement_routes,
    statistics::statistics_routes, water_content::water_content_routes,
};
use crate::state::AppState;

pub mod common;
pub mod debug;
pub mod health;
pub mod measurements;
pub mod statistics;
pub mod water_content;

/// Listed in the body of every 404 so clients can discover the API.
pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "GET /health",
    "GET /api/test",
    "GET /api/latest-return-loss",
    "GET /api/calculate-water-content",
    "GET /api/realtime-water-content",
    "GET /api/water-content-history",
    "GET /api/statistics",
    "GET /api/measurements",
    "GET /api/measurements/{id}",
    "POST /api/save-water-content",
];

#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub error: &'static str,
    pub message: String,
    pub available_endpoints: &'static [&'static str],
}

/// Builds the `/api` router.
///
/// The `/debug` group is decided here from `AppState::debug_routes` so the
/// router type stays the same whether or not it is mounted.
pub fn routes(app_state: &AppState) -> Router<AppState> {
    let mut router: Router<AppState> = Router::new()
        .route("/test", get(api_test))
        .merge(measurement_routes())
        .merge(water_content_routes())
        .merge(statistics_routes());

    if app_state.debug_routes() {
        router = router.merge(debug_routes());
        tracing::info!("[dev] Mounted /api/debug routes");
    } else {
        tracing::info!("[prod] Skipping /api/debug routes");
    }

    // A known path with the wrong method is reported like an unknown path.
    router.method_not_allowed_fallback(not_found)
}

/// Fallback for every unmatched method/path pair.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "Endpoint not found",
            message: format!("{method} {uri} is not a valid endpoint"),
            available_endpoints: AVAILABLE_ENDPOINTS,
        }),
    )
}
