//! HTTP error type.
//!
//! Every failure leaving a handler or middleware is rendered as
//! `{ "error", "message", "timestamp" }` (plus `allowed_origins` for CORS
//! rejections). Store failures are logged here with full detail; the client
//! only sees the error's display message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use services::error::WaterContentError;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{context}: {source}")]
    Service {
        context: &'static str,
        #[source]
        source: WaterContentError,
    },

    #[error("Origin not allowed: {origin}")]
    CorsRejected {
        origin: String,
        allowed_origins: Vec<String>,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    /// Adapter for `map_err` that tags a service error with the failing operation.
    pub fn service(context: &'static str) -> impl FnOnce(WaterContentError) -> Self {
        move |source| ApiError::Service { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service { source, .. } => match source {
                WaterContentError::NoMeasurementData => StatusCode::NOT_FOUND,
                WaterContentError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                WaterContentError::SourceUnavailable(_)
                | WaterContentError::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::CorsRejected { .. } => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorResponse {
        let (error, message, allowed_origins) = match self {
            ApiError::Service {
                source: WaterContentError::NoMeasurementData,
                ..
            } => (
                "No measurement data found".to_string(),
                "Database appears to be empty".to_string(),
                None,
            ),
            ApiError::Service { context, source } => (context.to_string(), source.to_string(), None),
            ApiError::CorsRejected {
                allowed_origins, ..
            } => (
                "CORS Error".to_string(),
                "Origin not allowed".to_string(),
                Some(allowed_origins),
            ),
            ApiError::BadRequest(message) => ("Bad Request".to_string(), message, None),
            ApiError::NotFound(message) => ("Not Found".to_string(), message, None),
            ApiError::Internal(message) => ("Internal Server Error".to_string(), message, None),
        };

        ErrorResponse {
            error,
            message,
            allowed_origins,
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Service { context, source } if source.is_storage() => {
                error!(context, error = ?source, "Store failure");
            }
            ApiError::Internal(message) => error!(message, "Internal error"),
            ApiError::CorsRejected { origin, .. } => warn!(origin, "Origin not allowed by CORS"),
            _ => {}
        }

        (status, Json(self.body())).into_response()
    }
}
