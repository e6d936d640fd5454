//! Simulation state snapshot: the complete drawable state after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{AircraftModel, SimPhase};
use crate::events::SimEvent;
use crate::geometry::{Point2D, Point3D};
use crate::types::SimTime;

/// What a renderer needs to place one object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderData {
    /// Position on the projected drawing plane.
    pub screen: Point2D,
    /// Draw order (larger is drawn later).
    pub z: f32,
}

/// Complete state handed to the renderer after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub time_scale: f32,
    pub aircraft: Vec<AircraftView>,
    pub airport: AirportView,
    pub crashed_count: u32,
    pub events: Vec<SimEvent>,
}

/// A live aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftView {
    pub flight_number: String,
    pub model: AircraftModel,
    pub position: Point3D,
    pub velocity: Point3D,
    pub render: RenderData,
    pub fuel: f32,
    pub landing_gear_deployed: bool,
    pub at_terminal: bool,
    pub waypoints_left: usize,
}

/// The airport and its fuel depot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirportView {
    pub position: Point3D,
    pub render: RenderData,
    pub terminals: Vec<TerminalView>,
    pub fuel_stock: f32,
    pub reservations: usize,
}

/// One gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalView {
    pub index: usize,
    pub render: RenderData,
    pub in_use: bool,
    pub servicing: bool,
    pub service_progress: u32,
}
