//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What an aircraft does at a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaypointKind {
    /// Taxiing or rolling on the runway.
    Ground,
    /// Airborne.
    Air,
    /// Parking position at a gate; reaching it starts service.
    Terminal,
}

/// Built-in aircraft models. The name doubles as the sprite key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftModel {
    #[default]
    L1011,
    B707,
    Concorde,
}

impl AircraftModel {
    pub const ALL: [AircraftModel; 3] = [
        AircraftModel::L1011,
        AircraftModel::B707,
        AircraftModel::Concorde,
    ];
}

/// Why an aircraft crashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashReason {
    /// The tank ran dry.
    OutOfFuel,
    /// Touched the ground without the landing gear deployed.
    BadLanding,
}

impl fmt::Display for CrashReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrashReason::OutOfFuel => f.write_str("out of fuel"),
            CrashReason::BadLanding => f.write_str("bad landing"),
        }
    }
}

/// Top-level run state of the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}
