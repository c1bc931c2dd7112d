use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum WaterContent {
    Table,
    Id,
    MeasurementId,
    ReturnLossDb,
    WaterContentPercent,
    Frequency,
    SessionId,
    Notes,
    Timestamp,
}

#[derive(DeriveIden)]
enum NanovnaMeasurements {
    Table,
    Id,
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202506090002_create_water_content"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WaterContent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WaterContent::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WaterContent::MeasurementId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WaterContent::ReturnLossDb).double().not_null())
                    .col(
                        ColumnDef::new(WaterContent::WaterContentPercent)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WaterContent::Frequency).big_integer().not_null())
                    .col(
                        ColumnDef::new(WaterContent::SessionId)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(WaterContent::Notes).text().null())
                    .col(
                        ColumnDef::new(WaterContent::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_water_content_measurement")
                            .from(WaterContent::Table, WaterContent::MeasurementId)
                            .to(NanovnaMeasurements::Table, NanovnaMeasurements::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup index only. At-most-one per measurement is enforced by the service.
        manager
            .create_index(
                Index::create()
                    .name("idx_water_content_measurement_id")
                    .table(WaterContent::Table)
                    .col(WaterContent::MeasurementId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WaterContent::Table).to_owned())
            .await
    }
}
