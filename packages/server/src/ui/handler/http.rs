//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{infrastructure::dto::http::StatusDto, ui::state::AppState};
use hekiga_shared::time::timestamp_to_jst_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Canvas dimensions, cooldown and live subscriber count
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    let status = state.get_status_usecase.execute();

    // Domain Model から DTO への変換
    Json(StatusDto {
        width: status.dimensions.width,
        height: status.dimensions.height,
        cooldown_ms: u64::try_from(status.cooldown.as_millis()).unwrap_or(u64::MAX),
        subscribers: status.subscribers,
        started_at: timestamp_to_jst_rfc3339(status.started_at),
    })
}

/// Current canvas as an image
pub async fn get_canvas(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, StatusCode> {
    match state.get_canvas_usecase.execute().await {
        Ok((bytes, content_type)) => Ok((
            [
                (header::CONTENT_TYPE, content_type),
                (header::CACHE_CONTROL, "no-store"),
            ],
            bytes,
        )),
        Err(e) => {
            tracing::error!("Failed to encode canvas: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
