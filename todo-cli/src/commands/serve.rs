//! HTTP server command
//!
//! Loads configuration from the environment, applies flag overrides and runs
//! the server until Ctrl+C / SIGTERM.

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use todo_server::db::{Database, SqliteConnector};
use todo_server::http::{run_server, ServerConfig};
use todo_server::AppConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Bind host (overrides HOST)
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides PORT)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// SQLite database file (overrides DATABASE_PATH)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Do not create the todos table on first connect
    #[arg(long)]
    pub no_auto_schema: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = AppConfig::from_env().context("Invalid configuration")?;

    if let Some(host) = args.host {
        config.env.host = host;
    }
    if let Some(port) = args.port {
        config.env.port = port;
    }
    if let Some(path) = args.db_path {
        config.database.path = path;
    }
    if args.no_auto_schema {
        config.database.auto_schema = false;
    }

    tracing::info!(
        environment = %config.env.environment,
        database = %config.database.path.display(),
        "Starting todoctl server on {}",
        config.bind_addr()
    );

    // Opened lazily by the first request.
    let db = Database::new(
        SqliteConnector::new(&config.database.path).with_auto_schema(config.database.auto_schema),
    );

    // Run server (blocks until shutdown)
    run_server(db, ServerConfig::from(&config))
        .await
        .context("Server error")?;

    Ok(())
}
