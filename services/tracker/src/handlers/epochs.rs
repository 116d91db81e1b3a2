use crate::error::AppError;
use crate::handlers::locate;
use crate::models::{EpochsQuery, LocationResponse, SpeedResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use orbit_core::epoch_index::find_by_key;
use orbit_core::kinematics;
use orbit_core::query::{paginate, parse_page_params};
use orbit_types::state_vector::StateVector;

pub async fn list_epochs(
    State(state): State<AppState>,
    Query(params): Query<EpochsQuery>,
) -> Result<Json<Vec<StateVector>>, AppError> {
    let page = parse_page_params(params.limit.as_deref(), params.offset.as_deref())?;
    let dataset = state.snapshot().await;

    Ok(Json(paginate(&dataset, page).to_vec()))
}

pub async fn get_epoch(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> Result<Json<StateVector>, AppError> {
    let dataset = state.snapshot().await;
    let sv = find_by_key(&dataset, &epoch)?;

    Ok(Json(sv.clone()))
}

pub async fn get_epoch_speed(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> Result<Json<SpeedResponse>, AppError> {
    let dataset = state.snapshot().await;
    let sv = find_by_key(&dataset, &epoch)?;
    let speed = kinematics::speed(&sv.velocity)?;

    Ok(Json(SpeedResponse { speed }))
}

pub async fn get_epoch_location(
    State(state): State<AppState>,
    Path(epoch): Path<String>,
) -> Result<Json<LocationResponse>, AppError> {
    let dataset = state.snapshot().await;
    let sv = find_by_key(&dataset, &epoch)?.clone();

    Ok(Json(locate(&state, &sv).await?))
}
