use axum::extract::rejection::QueryRejection;
use serde::Deserialize;

use crate::response::ApiError;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// `?limit=N` for the list endpoints.
///
/// Kept as raw text: a missing, zero, negative or non-numeric value falls back
/// to [`DEFAULT_LIMIT`], and anything above [`MAX_LIMIT`] is capped.
#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

impl LimitQuery {
    pub fn resolve(&self) -> u64 {
        match self
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
        {
            Some(n) if n > 0 => (n as u64).min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        }
    }
}

pub fn query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}
