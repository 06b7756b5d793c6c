#![cfg(test)]
use std::path::Path;

use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, migrate, DatabaseConfig};

/// Fresh, migrated in-memory database; each call gets its own empty store.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migrate(&db).await?;
    Ok(db)
}

/// Migrated SQLite file under `dir` behind a multi-connection pool, so
/// writers really contend for the database lock.
pub async fn get_file_db(dir: &Path) -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.join("movies.db").display()),
        max_connections: 8,
        idle_timeout: None,
        max_lifetime: None,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migrate(&db).await?;
    Ok(db)
}
