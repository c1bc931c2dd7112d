pub mod models;
pub mod repositories;
pub mod test_utils;

use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use tracing::warn;
use util::config;

/// Opens the configured store.
///
/// `DATABASE_PATH` may be a full DSN or a bare SQLite file path; in the latter
/// case the parent directory is created and the file is opened in create mode.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let url = resolve_url(&config::database_path());
    Database::connect(&url).await
}

fn resolve_url(path_or_url: &str) -> String {
    if path_or_url.starts_with("sqlite:")
        || path_or_url.starts_with("postgres://")
        || path_or_url.starts_with("mysql://")
    {
        path_or_url.to_string()
    } else {
        // SQLite won't create intermediate dirs.
        if let Some(parent) = Path::new(path_or_url).parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(
                    path = %parent.display(),
                    error = %e,
                    "Could not create database directory"
                );
            }
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    }
}
