//! Water content derived from a single measurement.
//!
//! Rows are written once per measurement and never updated. The table carries
//! no uniqueness constraint on `measurement_id`; callers check
//! [`Entity::exists_for_measurement`] before inserting.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, PaginatorTrait, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use super::measurement;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "water_content")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub measurement_id: i64,
    pub return_loss_db: f64,
    pub water_content_percent: f64,
    pub frequency: i64,
    pub session_id: String,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::measurement::Entity",
        from = "Column::MeasurementId",
        to = "super::measurement::Column::Id",
        on_delete = "Cascade"
    )]
    Measurement,
}

impl Related<super::measurement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Measurement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Snapshot of a calculation to be persisted. The store assigns `id` and `timestamp`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewWaterContent {
    pub measurement_id: i64,
    pub return_loss_db: f64,
    pub water_content_percent: f64,
    pub frequency: i64,
    pub session_id: String,
    pub notes: Option<String>,
}

/// Subset of the source measurement attached to history rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSummary {
    pub frequency: i64,
    pub s11_magnitude: Option<f64>,
    pub vswr: f64,
}

impl From<measurement::Model> for MeasurementSummary {
    fn from(m: measurement::Model) -> Self {
        Self {
            frequency: m.frequency,
            s11_magnitude: m.s11_magnitude,
            vswr: m.vswr,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: Model,
    pub nanovna_measurements: Option<MeasurementSummary>,
}

impl Entity {
    pub async fn exists_for_measurement(
        db: &DatabaseConnection,
        measurement_id: i64,
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::MeasurementId.eq(measurement_id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(db: &DatabaseConnection, new: NewWaterContent) -> Result<Model, DbErr> {
        let active = ActiveModel {
            measurement_id: Set(new.measurement_id),
            return_loss_db: Set(new.return_loss_db),
            water_content_percent: Set(new.water_content_percent),
            frequency: Set(new.frequency),
            session_id: Set(new.session_id),
            notes: Set(new.notes),
            timestamp: Set(Utc::now()),
            ..Default::default()
        };

        active.insert(db).await
    }

    /// All records for a measurement (newest first).
    pub async fn by_measurement(
        db: &DatabaseConnection,
        measurement_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::MeasurementId.eq(measurement_id))
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Newest `limit` records joined with their source measurement.
    pub async fn history(db: &DatabaseConnection, limit: u64) -> Result<Vec<HistoryEntry>, DbErr> {
        let rows = Entity::find()
            .find_also_related(measurement::Entity)
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(record, source)| HistoryEntry {
                record,
                nanovna_measurements: source.map(MeasurementSummary::from),
            })
            .collect())
    }

    pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }
}
