//! Root greeting endpoint

use axum::{routing::get, Json, Router};
use chrono::Local;

use crate::http::response::Envelope;

/// GET / - greeting with the server's local time
async fn index() -> Json<Envelope<()>> {
    let now = Local::now().format("%H:%M:%S GMT%z");
    Json(Envelope::message(true, format!("Hello World! - {}", now)))
}

/// Root routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}
