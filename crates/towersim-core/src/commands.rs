//! Commands sent from the driver to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::AircraftModel;

/// All possible external actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    // --- Traffic ---
    /// Create an inbound aircraft of the given model.
    SpawnAircraft { model: AircraftModel },
    /// Create an inbound aircraft of a random model.
    SpawnRandomAircraft,

    // --- Queries ---
    /// Report how many live aircraft fly for an airline.
    ReportAirline { airline: String },
    /// Report how many aircraft have crashed so far.
    ReportCrashes,

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double).
    SetTimeScale { scale: f32 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
