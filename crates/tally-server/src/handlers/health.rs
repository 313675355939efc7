//! Liveness handler

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    ok: bool,
    message: &'static str,
}

/// No storage access; answers the same in every mode.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        message: "Server is alive",
    })
}
