use crate::error::AppError;
use crate::handlers::locate;
use crate::models::{NowQuery, NowResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use orbit_core::epoch_index::{find_closest, parse_reference_time};
use orbit_core::kinematics;

pub async fn get_now(
    State(state): State<AppState>,
    Query(params): Query<NowQuery>,
) -> Result<Json<NowResponse>, AppError> {
    let reference = match params.at.as_deref() {
        Some(at) => parse_reference_time(at)?,
        None => Utc::now(),
    };

    let dataset = state.snapshot().await;
    let closest = find_closest(&dataset, reference)?.clone();
    tracing::debug!(epoch = %closest.epoch, %reference, "Closest epoch");

    let speed = kinematics::speed(&closest.velocity)?;
    let location = locate(&state, &closest).await?;

    Ok(Json(NowResponse {
        closest_epoch: closest.epoch.to_string(),
        latitude: location.latitude,
        longitude: location.longitude,
        altitude: location.altitude,
        geoposition: location.geoposition,
        speed,
    }))
}
