//! Connection opening
//!
//! The handle never opens SQLite itself; it calls a [`Connector`]. The
//! production connector opens a file with `create_if_missing` and a pool
//! capped at one connection.

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use super::schema;

/// Opens the underlying SQLite connection.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self) -> Result<SqlitePool, sqlx::Error>;
}

/// File-backed SQLite connector
#[derive(Debug, Clone)]
pub struct SqliteConnector {
    path: PathBuf,
    auto_schema: bool,
}

impl SqliteConnector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            auto_schema: false,
        }
    }

    /// Create the `todos` table as part of opening.
    pub fn with_auto_schema(mut self, enabled: bool) -> Self {
        self.auto_schema = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    async fn connect(&self) -> Result<SqlitePool, sqlx::Error> {
        let started_at = Instant::now();
        tracing::info!(path = %self.path.display(), "Opening database");

        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true);

        // A single long-lived connection: never reaped, never recycled.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        if self.auto_schema {
            sqlx::raw_sql(schema::CREATE_TODOS).execute(&pool).await?;
        }

        tracing::info!(
            path = %self.path.display(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Database opened"
        );
        Ok(pool)
    }
}
