//! Origin allow-listing.
//!
//! `cors_layer` emits the CORS response headers for allowed origins and answers
//! preflights. `enforce_origin` rejects any request whose `Origin` header is
//! not on the list with a 403. Requests without an `Origin` header (curl,
//! server-to-server, same-origin navigation) are let through.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request, header, request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::response::ApiError;
use crate::state::AppState;

/// Trailing slashes are ignored on both sides.
pub fn origin_allowed(allowed_origins: &[String], origin: &str) -> bool {
    let origin = origin.trim_end_matches('/');
    allowed_origins
        .iter()
        .any(|allowed| allowed.trim_end_matches('/') == origin)
}

pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let allowed: Arc<Vec<String>> = Arc::new(allowed_origins.to_vec());

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &request::Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| origin_allowed(&allowed, origin))
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub async fn enforce_origin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .map(|v| v.to_str().unwrap_or_default().to_string());

    if let Some(origin) = origin {
        if !origin_allowed(state.allowed_origins(), &origin) {
            return ApiError::CorsRejected {
                origin,
                allowed_origins: state.allowed_origins().to_vec(),
            }
            .into_response();
        }
    }

    next.run(req).await
}
