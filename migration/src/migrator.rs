use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202506090001_create_nanovna_measurements::Migration),
            Box::new(migrations::m202506090002_create_water_content::Migration),
        ]
    }
}
