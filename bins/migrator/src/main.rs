//! Database migration runner for Declara.
//!
//! Usage:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations

use anyhow::{Context, bail};
use declara_db::connect_with_pool;
use declara_db::migration::Migrator;
use declara_shared::AppConfig;
use declara_shared::telemetry::init_tracing;
use sea_orm_migration::prelude::*;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());

    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await
    .context("Failed to connect to database")?;
    info!("Connected to database");

    match command.as_str() {
        "up" => Migrator::up(&db, None).await?,
        "down" => Migrator::down(&db, Some(1)).await?,
        "status" => Migrator::status(&db).await?,
        "fresh" => Migrator::fresh(&db).await?,
        other => bail!("Unknown command '{other}', expected up, down, status or fresh"),
    }

    info!(command = %command, "Migration command finished");
    Ok(())
}
