//! Event-recording handlers: homepage views, clicks, signups

use std::path::Path;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::warn;

use super::storage_error;
use crate::AppState;

/// Counts a page view, then serves the homepage. A failed count must not
/// take the page down: the error is logged and the request proceeds.
pub async fn home(State(state): State<AppState>, req: Request) -> Response {
    if let Err(e) = state.storage.record_page_view().await {
        warn!("Page view not recorded: {}", e);
    }

    let index = Path::new(crate::PUBLIC_DIR).join("index.html");
    match ServeFile::new(index).oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(infallible) => match infallible {},
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickResponse {
    ok: bool,
    total_clicks: u64,
}

pub async fn click(State(state): State<AppState>) -> Result<Json<ClickResponse>, Response> {
    state.storage.record_click().await.map_err(storage_error)?;

    // Separate read, not atomic with the insert; concurrent clickers may
    // observe each other's totals.
    let total = state.storage.click_count().await.map_err(storage_error)?;
    Ok(Json(ClickResponse {
        ok: true,
        total_clicks: total,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    ok: bool,
    message: &'static str,
}

/// A missing or malformed body is treated the same as a missing email.
pub async fn signup(
    State(state): State<AppState>,
    body: Option<Json<SignupRequest>>,
) -> Result<Json<SignupResponse>, Response> {
    let email = body
        .and_then(|Json(req)| req.email)
        .map(|raw| raw.trim().to_string())
        .filter(|email| !email.is_empty());

    let Some(email) = email else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(SignupResponse {
                ok: false,
                message: "Email required",
            }),
        )
            .into_response());
    };

    state
        .storage
        .record_signup(&email)
        .await
        .map_err(storage_error)?;

    Ok(Json(SignupResponse {
        ok: true,
        message: "Thanks! You're on the list.",
    }))
}
