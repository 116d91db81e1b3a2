//! State vector type
//!
//! One sample of the ISS trajectory: where it was (km) and how fast it was
//! moving (km/s) at a single epoch.

use serde::{Deserialize, Serialize};

use crate::epoch::Epoch;
use crate::vector::Vector3;

/// Position and velocity at one epoch. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub epoch: Epoch,
    /// J2000 position in km
    pub position: Vector3,
    /// J2000 velocity in km/s
    pub velocity: Vector3,
}

impl StateVector {
    pub fn new(epoch: Epoch, position: Vector3, velocity: Vector3) -> Self {
        Self {
            epoch,
            position,
            velocity,
        }
    }
}
