//! Events emitted by the simulation for status output.

use serde::{Deserialize, Serialize};

use crate::enums::{AircraftModel, CrashReason};

/// Human-facing status events, drained into every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new aircraft entered the airspace.
    AircraftSpawned {
        flight_number: String,
        model: AircraftModel,
        fuel: f32,
    },
    /// An aircraft crashed and will be removed.
    AircraftCrashed {
        flight_number: String,
        reason: CrashReason,
    },
    /// The tower granted a terminal.
    TerminalReserved {
        flight_number: String,
        terminal: usize,
    },
    /// An aircraft parked and its service countdown started.
    ServiceStarted {
        flight_number: String,
        terminal: usize,
    },
    /// Service completed and the terminal was freed.
    ServiceFinished {
        flight_number: String,
        terminal: usize,
    },
    /// The occupant crashed; the terminal was freed without finishing.
    ServiceAborted {
        flight_number: String,
        terminal: usize,
    },
    /// Fuel transferred from the airport stock into an aircraft.
    Refueled { flight_number: String, amount: f32 },
    /// A fuel truck order was placed.
    FuelOrdered { amount: f32, stock: f32 },
    /// Answer to a `ReportAirline` command.
    AirlineReport { airline: String, count: usize },
    /// Answer to a `ReportCrashes` command.
    CrashReport { count: u32 },
}
