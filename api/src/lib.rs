//! HTTP layer for the NanoVNA water content backend.
//!
//! [`app`] assembles the full router; `main.rs` only binds and serves it, and
//! the integration tests drive it directly with `oneshot`.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Response},
};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;

use crate::middleware::{cors_layer, enforce_origin, log_request};
use crate::response::ApiError;
use crate::routes::{health::health_routes, not_found, routes};
use crate::state::AppState;

pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

/// Builds the application router.
///
/// Layers, outermost first: request logging, origin enforcement (403),
/// CORS headers, panic recovery (500).
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .nest("/api", routes(&state))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(state.allowed_origins()))
        .layer(from_fn_with_state(state.clone(), enforce_origin))
        .layer(from_fn(log_request))
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Handler panicked");

    ApiError::Internal("Something went wrong".into()).into_response()
}
