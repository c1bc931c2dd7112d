use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::debug;

use crate::models::water_content::{
    Entity as WaterContentEntity, HistoryEntry, Model as WaterContent, NewWaterContent,
};

/// Access to derived water content records.
#[async_trait]
pub trait WaterContentStore: Send + Sync {
    async fn exists_for_measurement(&self, measurement_id: i64) -> Result<bool, DbErr>;

    /// Not retried on failure.
    async fn insert(&self, record: NewWaterContent) -> Result<WaterContent, DbErr>;

    /// Newest first.
    async fn by_measurement(&self, measurement_id: i64) -> Result<Vec<WaterContent>, DbErr>;

    /// Newest first, joined with the source measurement projection.
    async fn history(&self, limit: u64) -> Result<Vec<HistoryEntry>, DbErr>;

    async fn count(&self) -> Result<u64, DbErr>;
}

/// SeaORM-backed [`WaterContentStore`].
#[derive(Clone)]
pub struct WaterContentRepository {
    db: DatabaseConnection,
}

impl WaterContentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WaterContentStore for WaterContentRepository {
    async fn exists_for_measurement(&self, measurement_id: i64) -> Result<bool, DbErr> {
        let exists = WaterContentEntity::exists_for_measurement(&self.db, measurement_id).await?;
        debug!(measurement_id, exists, "Checked processed status");
        Ok(exists)
    }

    async fn insert(&self, record: NewWaterContent) -> Result<WaterContent, DbErr> {
        debug!(
            measurement_id = record.measurement_id,
            water_content_percent = record.water_content_percent,
            "Inserting water content record"
        );
        WaterContentEntity::create(&self.db, record).await
    }

    async fn by_measurement(&self, measurement_id: i64) -> Result<Vec<WaterContent>, DbErr> {
        WaterContentEntity::by_measurement(&self.db, measurement_id).await
    }

    async fn history(&self, limit: u64) -> Result<Vec<HistoryEntry>, DbErr> {
        WaterContentEntity::history(&self.db, limit).await
    }

    async fn count(&self) -> Result<u64, DbErr> {
        WaterContentEntity::count_all(&self.db).await
    }
}
