use chrono::{DateTime, Utc};
use db::models::measurement::Model as Measurement;
use db::repositories::{MeasurementSource, WaterContentStore};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{WaterContentError, WaterContentResult};
use crate::formula;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_measurements: u64,
    pub total_water_content_records: u64,
    pub latest_measurement: Option<Measurement>,
    pub latest_water_content: Option<f64>,
    pub backend_status: String,
    pub timestamp: DateTime<Utc>,
}

/// Read-only rollup over both stores. Nothing is cached between calls.
#[derive(Clone)]
pub struct StatisticsService {
    measurements: Arc<dyn MeasurementSource>,
    records: Arc<dyn WaterContentStore>,
}

impl StatisticsService {
    pub fn new(
        measurements: Arc<dyn MeasurementSource>,
        records: Arc<dyn WaterContentStore>,
    ) -> Self {
        Self {
            measurements,
            records,
        }
    }

    pub async fn summary(&self) -> WaterContentResult<Statistics> {
        let total_measurements = self
            .measurements
            .count()
            .await
            .map_err(WaterContentError::SourceUnavailable)?;
        let total_water_content_records = self
            .records
            .count()
            .await
            .map_err(WaterContentError::PersistenceError)?;
        let latest_measurement = self
            .measurements
            .latest()
            .await
            .map_err(WaterContentError::SourceUnavailable)?;

        let latest_water_content = latest_measurement
            .as_ref()
            .filter(|m| m.return_loss_db.is_finite())
            .map(|m| formula::derive(m.return_loss_db));

        Ok(Statistics {
            total_measurements,
            total_water_content_records,
            latest_measurement,
            latest_water_content,
            backend_status: "Running".into(),
            timestamp: Utc::now(),
        })
    }
}
