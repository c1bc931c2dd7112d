//! NanoVNA sweep readings written by the acquisition pipeline.
//!
//! The API only ever reads these rows. `create` exists for the dev seeder and tests.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, PaginatorTrait, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "nanovna_measurements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub frequency: i64, // Hz
    pub return_loss_db: f64,
    pub s11_magnitude: Option<f64>,
    pub vswr: f64,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::water_content::Entity")]
    WaterContent,
}

impl Related<super::water_content::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WaterContent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    /// Row with the highest id, if any.
    pub async fn latest(db: &DatabaseConnection) -> Result<Option<Model>, DbErr> {
        Entity::find().order_by_desc(Column::Id).one(db).await
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn count_all(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }

    /// Newest first, at most `limit` rows.
    pub async fn recent(db: &DatabaseConnection, limit: u64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(db)
            .await
    }
}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        frequency: i64,
        return_loss_db: f64,
        s11_magnitude: Option<f64>,
        vswr: f64,
        session_id: &str,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            frequency: Set(frequency),
            return_loss_db: Set(return_loss_db),
            s11_magnitude: Set(s11_magnitude),
            vswr: Set(vswr),
            session_id: Set(session_id.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        active.insert(db).await
    }
}
