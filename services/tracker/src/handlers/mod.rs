pub mod epochs;
pub mod feed;
pub mod now;

use crate::error::AppError;
use crate::geocode::resolve_location;
use crate::models::LocationResponse;
use crate::state::AppState;
use orbit_core::kinematics;
use orbit_types::state_vector::StateVector;

/// Ground position plus a best-effort place name for one state vector.
pub(crate) async fn locate(state: &AppState, sv: &StateVector) -> Result<LocationResponse, AppError> {
    let geo = kinematics::geodetic(&sv.position, sv.epoch.instant())?;
    let geoposition = resolve_location(
        state.geocoder.as_ref(),
        geo.latitude,
        geo.longitude,
        state.geocode_timeout,
    )
    .await;

    Ok(LocationResponse {
        latitude: geo.latitude,
        longitude: geo.longitude,
        altitude: geo.altitude,
        geoposition,
    })
}
