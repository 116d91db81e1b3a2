use crate::error::AppError;
use crate::models::ReloadResponse;
use crate::state::AppState;
use axum::{Json, extract::State};
use std::collections::BTreeMap;

pub async fn get_comments(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.snapshot().await.comments.clone())
}

pub async fn get_header(State(state): State<AppState>) -> Json<BTreeMap<String, String>> {
    Json(state.snapshot().await.header.clone())
}

pub async fn get_metadata(State(state): State<AppState>) -> Json<BTreeMap<String, String>> {
    Json(state.snapshot().await.metadata.clone())
}

/// Refetch the feed. A failed fetch leaves the served dataset unchanged.
pub async fn reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let epochs = state.reload().await?;
    Ok(Json(ReloadResponse { epochs }))
}
