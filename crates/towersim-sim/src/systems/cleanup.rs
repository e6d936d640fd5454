//! Cleanup system: removes aircraft that are out of the simulation.

use hecs::{Entity, World};
use tracing::debug;

use crate::aircraft::Aircraft;

/// Despawn every aircraft that crashed or left the airspace. Uses a
/// pre-allocated buffer to avoid per-tick allocation. Returns how many were
/// removed.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, aircraft) in world.query_mut::<&Aircraft>() {
        if aircraft.is_out_of_sim() {
            debug!(flight = %aircraft.flight_number(), crashed = aircraft.has_crashed(), "removing aircraft");
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
