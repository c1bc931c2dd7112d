use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};

use crate::models::measurement::{Entity as MeasurementEntity, Model as Measurement};

/// Read-only access to upstream measurements.
#[async_trait]
pub trait MeasurementSource: Send + Sync {
    async fn latest(&self) -> Result<Option<Measurement>, DbErr>;

    async fn by_id(&self, id: i64) -> Result<Option<Measurement>, DbErr>;

    async fn count(&self) -> Result<u64, DbErr>;

    /// Descending by id, at most `limit` rows.
    async fn recent(&self, limit: u64) -> Result<Vec<Measurement>, DbErr>;
}

/// SeaORM-backed [`MeasurementSource`].
#[derive(Clone)]
pub struct MeasurementRepository {
    db: DatabaseConnection,
}

impl MeasurementRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MeasurementSource for MeasurementRepository {
    async fn latest(&self) -> Result<Option<Measurement>, DbErr> {
        MeasurementEntity::latest(&self.db).await
    }

    async fn by_id(&self, id: i64) -> Result<Option<Measurement>, DbErr> {
        MeasurementEntity::get_by_id(&self.db, id).await
    }

    async fn count(&self) -> Result<u64, DbErr> {
        MeasurementEntity::count_all(&self.db).await
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Measurement>, DbErr> {
        MeasurementEntity::recent(&self.db, limit).await
    }
}
