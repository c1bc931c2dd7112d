//! Water content derivation endpoints.
//!
//! - `GET  /api/calculate-water-content`  → compute only, never persists
//! - `POST /api/save-water-content`       → compute and persist if new
//! - `GET  /api/realtime-water-content`   → polling variant of save, with formula breakdown
//! - `GET  /api/water-content-history`    → newest derived records

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod get;
pub mod post;

pub fn water_content_routes() -> Router<AppState> {
    Router::new()
        .route("/calculate-water-content", get(get::calculate_water_content))
        .route("/save-water-content", post(post::save_water_content))
        .route("/realtime-water-content", get(get::realtime_water_content))
        .route("/water-content-history", get(get::water_content_history))
}
