use axum::{http::StatusCode, Json};
use bookgate_core::analytics::{DwellTimeEvent, PageViewEvent};
use serde_json::json;

use crate::handlers::api_json::ApiJson;

// Events are only logged here; a collector can be attached to the log stream.

pub async fn page_view(
    ApiJson(event): ApiJson<PageViewEvent>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    if let Err(message) = event.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"error": message}))));
    }

    tracing::info!(
        page_id = %event.page_id,
        page_number = event.page_number,
        page_title = ?event.page_title,
        timestamp = %event.timestamp,
        "Page view"
    );

    Ok(Json(json!({"success": true})))
}

pub async fn dwell_time(
    ApiJson(event): ApiJson<DwellTimeEvent>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    if let Err(message) = event.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({"error": message}))));
    }

    tracing::info!(
        page_id = %event.page_id,
        page_number = event.page_number,
        dwell_seconds = event.dwell_time,
        timestamp = %event.timestamp,
        "Dwell time"
    );

    Ok(Json(json!({"success": true})))
}
