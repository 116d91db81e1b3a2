//! Orbit Core: State Vector Computation Layer
//!
//! Provides deterministic computation over a loaded trajectory:
//! - Nearest-epoch and exact-epoch lookup
//! - Speed and geodetic position from J2000 state vectors
//! - Limit/offset pagination
//!
//! # Determinism
//! All functions are pure: no system time, no external calls. Callers pass
//! the reference instant explicitly.

pub mod epoch_index;
pub mod kinematics;
pub mod query;

/// Crate version constant
pub const ORBIT_CORE_VERSION: &str = "1.0.0";
