//! ISS Tracker Service
//!
//! Loads the public ISS OEM ephemeris and serves:
//! - The full state vector list, with limit/offset paging
//! - Exact-epoch state vectors, speed and ground location
//! - The epoch closest to now, with speed and ground location
//! - Header, metadata and comments passed through from the feed
//!
//! # Architecture
//!
//! ```text
//!  OEM XML feed ──► feed::HttpFeed ──► Dataset snapshot (AppState)
//!                                           │
//!                    ┌──────────────────────┼────────────────┐
//!                    │                      │                │
//!            orbit_core::query   orbit_core::epoch_index   pass-through
//!                    │                      │
//!                    │            orbit_core::kinematics ──► geocode
//!                    │                      │
//!                    └───────► router / handlers ◄───────────┘
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod geocode;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
