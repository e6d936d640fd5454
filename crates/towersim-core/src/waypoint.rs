//! Navigation targets and the queues aircraft consume them from.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::enums::WaypointKind;
use crate::geometry::Point3D;

/// A single navigation target. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    position: Point3D,
    kind: WaypointKind,
}

/// Waypoints in flight order; aircraft consume them from the front.
/// An empty queue means "ask the tower for new instructions".
pub type WaypointQueue = VecDeque<Waypoint>;

impl Waypoint {
    pub fn new(position: Point3D, kind: WaypointKind) -> Self {
        Self { position, kind }
    }

    pub fn air(position: Point3D) -> Self {
        Self::new(position, WaypointKind::Air)
    }

    pub fn ground(position: Point3D) -> Self {
        Self::new(position, WaypointKind::Ground)
    }

    pub fn terminal(position: Point3D) -> Self {
        Self::new(position, WaypointKind::Terminal)
    }

    pub fn position(&self) -> Point3D {
        self.position
    }

    pub fn kind(&self) -> WaypointKind {
        self.kind
    }

    /// Terminals are on the ground too.
    pub fn is_on_ground(&self) -> bool {
        self.kind != WaypointKind::Air
    }

    pub fn is_at_terminal(&self) -> bool {
        self.kind == WaypointKind::Terminal
    }
}
