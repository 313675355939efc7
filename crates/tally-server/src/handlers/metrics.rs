//! Aggregate metrics handler

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use super::storage_error;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    page_views: u64,
    clicks: u64,
    signups: u64,
    /// Only present in memory mode; the database variant does not enumerate
    /// signup rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    emails: Option<Vec<String>>,
    db: bool,
}

pub async fn metrics(State(state): State<AppState>) -> Result<Json<MetricsResponse>, Response> {
    let snapshot = state.storage.metrics().await.map_err(storage_error)?;
    Ok(Json(MetricsResponse {
        page_views: snapshot.page_views,
        clicks: snapshot.clicks,
        signups: snapshot.signups,
        emails: snapshot.emails,
        db: state.storage.is_durable(),
    }))
}
