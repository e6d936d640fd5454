//! Per-tick systems that operate on the fleet.
//!
//! Systems are plain functions over the simulation state. They do not own
//! state.

pub mod cleanup;
pub mod snapshot;
