//! Airport simulator driver.
//!
//! Runs the simulation engine in a game-loop thread and feeds it commands
//! read as JSON lines.

pub mod game_loop;
pub mod input;
pub mod logging;
pub mod state;

pub use towersim_core as core;
