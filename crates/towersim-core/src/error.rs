//! Error types shared across crates.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::CrashReason;

/// Failures of the vector helpers.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("cannot normalize a vector of length 0")]
    ZeroLength,
}

/// Fatal-to-the-aircraft condition raised during movement.
///
/// Never aborts the simulation: the fleet pass turns it into the crashed
/// state of the aircraft that raised it.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{flight_number} crashed into the ground at {position} with velocity {velocity}: {reason}")]
pub struct AircraftCrash {
    pub flight_number: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub reason: CrashReason,
}
