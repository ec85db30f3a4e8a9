//! Seed command: bootstrap the table and insert demo todos

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use todo_server::db::{schema, Database, SqliteConnector};
use todo_server::AppConfig;

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// SQLite database file (overrides DATABASE_PATH)
    #[arg(long)]
    pub db_path: Option<PathBuf>,
}

/// Create the todos table and insert the demo rows
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let path = match args.db_path {
        Some(path) => path,
        None => AppConfig::from_env().context("Invalid configuration")?.database.path,
    };

    tracing::info!(database = %path.display(), "Seeding the database...");

    let db = Database::new(SqliteConnector::new(&path));
    let seeded = schema::seed(&db).await;
    db.close().await;

    let rows = seeded.context("Failed to seed the database")?;
    tracing::info!(rows, "Database seeded successfully");
    Ok(())
}
