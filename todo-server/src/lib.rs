//! todo-server: todo CRUD over HTTP
//!
//! Exposes a small REST surface for the `todos` table, backed by a single
//! SQLite connection that is opened lazily on first use.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{AppConfig, ConfigError};
pub use db::{Database, DbError};
pub use http::{run_server, ServerError};
