//! HTTP handlers

pub mod events;
pub mod health;
pub mod metrics;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::storage::StorageError;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    ok: bool,
    error: String,
}

/// Local catch-and-respond for storage failures. There is no error
/// middleware; each handler maps its own failures.
pub(crate) fn storage_error(err: StorageError) -> Response {
    error!("Storage error: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            ok: false,
            error: err.to_string(),
        }),
    )
        .into_response()
}
