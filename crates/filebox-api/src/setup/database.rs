//! Database setup and initialization

use anyhow::{Context, Result};
use filebox_core::Config;
use filebox_db::{connect_pool, MIGRATOR};
use sqlx::SqlitePool;
use std::time::Duration;

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    tracing::info!("Connecting to database...");
    let pool = connect_pool(
        config.database_url(),
        config.db_max_connections(),
        Duration::from_secs(config.db_timeout_seconds()),
    )
    .await?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Database connected successfully"
    );

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
