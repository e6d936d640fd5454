//! Core types and definitions for the tower simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, waypoints, commands, state snapshots, events,
//! errors and constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;
pub mod waypoint;
