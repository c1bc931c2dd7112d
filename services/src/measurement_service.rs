use db::models::measurement::Model as Measurement;
use db::repositories::MeasurementSource;
use std::sync::Arc;
use tracing::debug;

use crate::error::{WaterContentError, WaterContentResult};

/// Read-only view over upstream measurements with errors mapped to
/// [`WaterContentError::SourceUnavailable`].
#[derive(Clone)]
pub struct MeasurementService {
    source: Arc<dyn MeasurementSource>,
}

impl MeasurementService {
    pub fn new(source: Arc<dyn MeasurementSource>) -> Self {
        Self { source }
    }

    /// Latest measurement, or `NoMeasurementData` when the table is empty.
    pub async fn latest(&self) -> WaterContentResult<Measurement> {
        let latest = self
            .source
            .latest()
            .await
            .map_err(WaterContentError::SourceUnavailable)?;

        match latest {
            Some(m) => {
                debug!(measurement_id = m.id, "Got latest measurement");
                Ok(m)
            }
            None => Err(WaterContentError::NoMeasurementData),
        }
    }

    pub async fn by_id(&self, id: i64) -> WaterContentResult<Option<Measurement>> {
        self.source
            .by_id(id)
            .await
            .map_err(WaterContentError::SourceUnavailable)
    }

    pub async fn count(&self) -> WaterContentResult<u64> {
        self.source
            .count()
            .await
            .map_err(WaterContentError::SourceUnavailable)
    }

    pub async fn recent(&self, limit: u64) -> WaterContentResult<Vec<Measurement>> {
        self.source
            .recent(limit)
            .await
            .map_err(WaterContentError::SourceUnavailable)
    }
}
