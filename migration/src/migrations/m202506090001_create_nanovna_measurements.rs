// Upstream sweep rows. The acquisition pipeline owns the data; the table is
// created here so local SQLite deployments and tests have the same schema.
use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum NanovnaMeasurements {
    Table,
    Id,
    Frequency,
    ReturnLossDb,
    S11Magnitude,
    Vswr,
    SessionId,
    CreatedAt,
}

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202506090001_create_nanovna_measurements"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NanovnaMeasurements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NanovnaMeasurements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NanovnaMeasurements::Frequency)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NanovnaMeasurements::ReturnLossDb)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NanovnaMeasurements::S11Magnitude).double().null())
                    .col(
                        ColumnDef::new(NanovnaMeasurements::Vswr)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(NanovnaMeasurements::SessionId)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(NanovnaMeasurements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NanovnaMeasurements::Table).to_owned())
            .await
    }
}
