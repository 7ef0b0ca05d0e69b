use crate::config::DatabaseConfig;
use crate::error::AppResult;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Bring the schema up to date so lookups work before the first ingestion
pub async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

pub async fn health_check(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
