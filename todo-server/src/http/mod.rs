//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing (toggled by config)
//! - Graceful shutdown, then database close
//! - `{status, data|message}` JSON envelopes for every response

pub mod error;
pub mod extractors;
pub mod response;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use response::Envelope;
pub use server::{build_router, run_server, serve, AppState, ServerConfig, ServerError};
