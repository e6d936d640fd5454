//! Airport traffic simulation engine.
//!
//! Owns the fleet and the airport, runs the fleet and airport passes at a
//! fixed tick rate and produces SimSnapshots for the driver.

pub mod aircraft;
pub mod aircraft_manager;
pub mod aircraft_types;
pub mod airport;
pub mod airport_layout;
pub mod engine;
pub mod error;
pub mod factory;
pub mod render;
pub mod systems;
pub mod terminal;
pub mod tower;

pub use engine::{SimConfig, SimulationEngine};
pub use towersim_core as core;
