//! Types library for the ISS state vector tracker
//!
//! This library provides the core data model shared by the computation layer
//! and the HTTP service: state vectors, their epochs, the ordered dataset
//! loaded from the OEM feed, and the error taxonomy for queries over it.
//!
//! # Modules
//! - `vector`: Cartesian triples (position in km, velocity in km/s)
//! - `epoch`: Native OEM timestamp keys (`YYYY-DDDTHH:MM:SS.sssZ`)
//! - `state_vector`: One sample of position + velocity
//! - `dataset`: Time-ordered sequence of samples plus pass-through header data
//! - `errors`: Error taxonomy

// Public modules
pub mod vector;
pub mod epoch;
pub mod state_vector;
pub mod dataset;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::vector::*;
    pub use crate::epoch::*;
    pub use crate::state_vector::*;
    pub use crate::dataset::*;
    pub use crate::errors::*;
}
