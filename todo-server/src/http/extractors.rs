//! Custom Axum extractors
//!
//! Both reject with [`ApiError`] so malformed input gets the same
//! envelope as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract and validate an integer id from path
///
/// Only an optional `-` followed by ASCII digits is accepted; `+5`, ` 5`
/// and `1.5` are rejected before any handler runs.
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw,
            // Undecodable segment; report it as sent.
            Err(_) => parts
                .uri
                .path()
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        match parse_id(&raw) {
            Some(id) => Ok(Self(id)),
            None => {
                tracing::debug!(value = %raw, "Rejected todo id");
                Err(ValidationError::InvalidId { value: raw }.into())
            }
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// JSON body whose rejections become 400 envelopes
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ValidationError::MalformedBody {
                reason: rejection.body_text(),
            }
        })?;

        Ok(Self(value))
    }
}
