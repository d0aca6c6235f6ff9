//! Draft persistence for the account and journal forms.

use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use service_core::error::AppError;

pub async fn get_draft(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>, AppError> {
    state
        .drafts
        .load(&key)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("No draft for {}", key)))
}

/// Accepted, not yet written: the store is updated after the debounce delay.
pub async fn put_draft(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(draft): Json<Value>,
) -> Result<StatusCode, AppError> {
    state.drafts.schedule(&key, draft)?;
    Ok(StatusCode::ACCEPTED)
}

pub async fn delete_draft(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode, AppError> {
    state.drafts.clear(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
