use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};

use crate::config::DatabaseConfig;
use crate::error::ConnectionError;

pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.connect_options()).await?;
    tracing::info!(backend = ?db.get_database_backend(), "connected to database");
    Ok(db)
}

pub async fn connect_to_database() -> Result<DatabaseConnection, ConnectionError> {
    let config = DatabaseConfig::from_env()?;
    Ok(connect(&config).await?)
}

/// Connects using the environment configuration and brings the schema up to
/// date.
pub async fn connect_and_migrate() -> Result<DatabaseConnection, ConnectionError> {
    let db = connect_to_database().await?;
    Migrator::up(&db, None).await?;
    tracing::info!("database migrations applied");
    Ok(db)
}

pub async fn connect_to_memory_database() -> Result<DatabaseConnection, DbErr> {
    Database::connect("sqlite::memory:").await
}
