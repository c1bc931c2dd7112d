//! Read-only access to upstream NanoVNA measurements.
//!
//! - `GET /api/latest-return-loss`
//! - `GET /api/measurements?limit=N`
//! - `GET /api/measurements/{measurement_id}`

use axum::{Router, routing::get};

use crate::state::AppState;

pub mod get;

pub fn measurement_routes() -> Router<AppState> {
    Router::new()
        .route("/latest-return-loss", get(get::latest_return_loss))
        .route("/measurements", get(get::list_measurements))
        .route("/measurements/{measurement_id}", get(get::get_measurement))
}
