use sea_orm::DbErr;

pub type WaterContentResult<T> = Result<T, WaterContentError>;

/// Errors raised by the water content workflow.
#[derive(Debug, thiserror::Error)]
pub enum WaterContentError {
    #[error("No measurement data found")]
    NoMeasurementData,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Measurement source unavailable: {0}")]
    SourceUnavailable(#[source] DbErr),

    #[error("Failed to persist water content: {0}")]
    PersistenceError(#[source] DbErr),
}

impl WaterContentError {
    /// True for store failures that should be logged with full detail.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            WaterContentError::SourceUnavailable(_) | WaterContentError::PersistenceError(_)
        )
    }
}
