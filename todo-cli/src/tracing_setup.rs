//! Tracing setup for todoctl
//!
//! Without `RUST_LOG`, todoctl logs its own crates at `info` and keeps
//! everything else (sqlx, hyper) at `warn`. `--debug` raises our crates and
//! `tower_http` to `debug`, which also prints the per-request spans from the
//! server's `TraceLayer` (when `APP_LOGGING` is on).
//!
//! Usage:
//!   todoctl --debug serve
//!   RUST_LOG=todo_server::db=trace todoctl serve
//!
//! An explicit `RUST_LOG` always replaces the defaults.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "warn,todoctl=info,todo_server=info,tower_http=info";
const DEBUG_DIRECTIVES: &str = "warn,todoctl=debug,todo_server=debug,tower_http=debug";

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Debug logging for todoctl, the server library and request spans
    pub debug: bool,
}

impl TracingConfig {
    fn directives(&self) -> &'static str {
        if self.debug {
            DEBUG_DIRECTIVES
        } else {
            DEFAULT_DIRECTIVES
        }
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
