use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::models::measurement::Model as Measurement;

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Inserts a measurement with the fields the water content flow cares about.
pub async fn seed_measurement(
    db: &DatabaseConnection,
    frequency: i64,
    return_loss_db: f64,
) -> Measurement {
    Measurement::create(db, frequency, return_loss_db, None, 1.5, "test-session")
        .await
        .expect("Failed to seed measurement")
}
