//! Kinematics: speed and ground position from J2000 state vectors
//!
//! The geodetic conversion here is spherical and first-order: longitude
//! removes Earth rotation using the IAU 1982 linear GMST term, latitude is
//! the geocentric elevation angle and altitude is height above a mean-radius
//! sphere. Errors of tens of kilometres against a WGS-84 reduction are
//! expected; this is not a geodetic-grade transform.

use chrono::{DateTime, Utc};
use orbit_types::errors::QueryError;
use orbit_types::vector::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Mean Earth radius (km).
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// J2000 reference epoch, 2000-01-01T12:00:00 UTC, as Unix seconds.
pub const J2000_UNIX_SECONDS: i64 = 946_728_000;

/// GMST at the J2000 reference epoch (degrees).
const GMST_AT_J2000_DEG: f64 = 280.460_618_37;

/// Earth rotation relative to the stars (degrees per day).
const EARTH_ROTATION_DEG_PER_DAY: f64 = 360.985_647_366_29;

const SECONDS_PER_DAY: f64 = 86_400.0;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Ground position derived from an inertial position vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    /// Degrees, [-90, 90]
    pub latitude: f64,
    /// Degrees, [-180, 180)
    pub longitude: f64,
    /// Kilometres above the mean-radius sphere
    pub altitude: f64,
}

// ---------------------------------------------------------------------------
// Speed
// ---------------------------------------------------------------------------

/// Magnitude of a velocity vector, in the input's units.
pub fn speed(velocity: &Vector3) -> Result<f64, QueryError> {
    ensure_finite(velocity, "velocity")?;
    Ok(velocity.norm())
}

// ---------------------------------------------------------------------------
// Geodetic conversion
// ---------------------------------------------------------------------------

/// Convert a J2000 position (km) at `epoch_time` to latitude/longitude/altitude.
pub fn geodetic(position: &Vector3, epoch_time: DateTime<Utc>) -> Result<GeodeticPosition, QueryError> {
    ensure_finite(position, "position")?;

    let right_ascension = position.y.atan2(position.x).to_degrees();
    let longitude = normalize_longitude(right_ascension - gmst_degrees(epoch_time));
    let latitude = position.z.atan2(position.planar_norm()).to_degrees();
    let altitude = position.norm() - MEAN_EARTH_RADIUS_KM;

    Ok(GeodeticPosition {
        latitude,
        longitude,
        altitude,
    })
}

/// Greenwich mean sidereal time in degrees, [0, 360).
pub fn gmst_degrees(instant: DateTime<Utc>) -> f64 {
    let days = days_since_j2000(instant);
    (GMST_AT_J2000_DEG + EARTH_ROTATION_DEG_PER_DAY * days).rem_euclid(360.0)
}

/// Fractional days elapsed since the J2000 reference epoch.
pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    let millis = instant.timestamp_millis() - J2000_UNIX_SECONDS * 1_000;
    millis as f64 / 1_000.0 / SECONDS_PER_DAY
}

/// Wrap an angle in degrees into [-180, 180).
pub fn normalize_longitude(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

fn ensure_finite(vector: &Vector3, name: &str) -> Result<(), QueryError> {
    if vector.is_finite() {
        Ok(())
    } else {
        Err(QueryError::InvalidVector {
            reason: format!("{} has a non-finite component: {:?}", name, vector),
        })
    }
}
