//! Database layer - lazy connection handle and repositories
//!
//! # Design Principles
//!
//! - One SQLite connection per process, opened on the first statement
//! - Concurrent first callers share a single open attempt
//! - Parameter binding for every statement, no string interpolation
//! - No transactions; each statement is atomic on its own

pub mod connector;
pub mod handle;
pub mod repos;
pub mod schema;

pub use connector::{Connector, SqliteConnector};
pub use handle::{Database, HandleStatus, RunResult, Value};
pub use repos::TodoRepo;

use std::sync::Arc;

/// Database error type
#[derive(Debug, Clone, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlx(Arc<sqlx::Error>),

    #[error("failed to connect to the database: {0}")]
    Open(Arc<sqlx::Error>),

    #[error("database not yet initialized; run a statement first")]
    Uninitialized,

    #[error("database connection is closed")]
    Closed,

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        Self::Sqlx(Arc::new(e))
    }
}
