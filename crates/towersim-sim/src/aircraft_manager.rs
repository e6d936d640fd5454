//! The fleet: owns every live aircraft and runs the per-tick fleet pass.

use hecs::{Entity, World};
use tracing::{trace, warn};

use towersim_core::error::AircraftCrash;

use crate::aircraft::{Aircraft, FlightControl};
use crate::systems;

/// Owns the aircraft. Each aircraft is a hecs entity whose handle doubles
/// as its identity in terminals and in the tower's reservation table.
#[derive(Default)]
pub struct AircraftManager {
    world: World,
    crashed_count: u32,
    despawn_buffer: Vec<Entity>,
}

impl AircraftManager {
    /// Take ownership of `aircraft` and return its handle.
    pub fn add_aircraft(&mut self, mut aircraft: Aircraft) -> Entity {
        let handle = self.world.reserve_entity();
        aircraft.register(handle);
        self.world.spawn_at(handle, (aircraft,));
        handle
    }

    /// One fleet pass: sort by priority, advance everybody, then prune
    /// aircraft that are out of the simulation. Returns this tick's crashes.
    pub fn advance(&mut self, dt: f32, control: &mut impl FlightControl) -> Vec<AircraftCrash> {
        let mut crashes = Vec::new();

        let mut fleet: Vec<&mut Aircraft> = self
            .world
            .query_mut::<&mut Aircraft>()
            .into_iter()
            .map(|(_, aircraft)| aircraft)
            .collect();
        fleet.sort_by(|a, b| a.priority_cmp(b));

        for aircraft in fleet {
            if let Err(crash) = aircraft.advance(dt, control) {
                aircraft.crash();
                control.aircraft_crashed(aircraft);
                self.crashed_count += 1;
                warn!(flight = %crash.flight_number, reason = %crash.reason, "{crash}");
                crashes.push(crash);
            }
        }

        let removed = systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        trace!(removed, remaining = self.len(), "fleet pass done");
        crashes
    }

    /// Live aircraft whose flight number starts with `airline`.
    pub fn count_by_airline(&self, airline: &str) -> usize {
        self.world
            .query::<&Aircraft>()
            .iter()
            .filter(|(_, aircraft)| aircraft.flight_number().starts_with(airline))
            .count()
    }

    /// Fuel needed to fill every low-fuel aircraft still inbound or parked.
    pub fn required_fuel(&self) -> f32 {
        self.world
            .query::<&Aircraft>()
            .iter()
            .filter(|(_, aircraft)| !aircraft.has_left() && aircraft.is_low_on_fuel())
            .map(|(_, aircraft)| aircraft.fuel_deficit())
            .sum()
    }

    pub fn crashed_count(&self) -> u32 {
        self.crashed_count
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, handle: Entity) -> bool {
        self.world.contains(handle)
    }

    /// Read-only access to the aircraft arena.
    pub fn world(&self) -> &World {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    use towersim_core::enums::{AircraftModel, CrashReason};
    use towersim_core::waypoint::WaypointQueue;

    use crate::aircraft_types::get_type;

    /// Never hands out instructions.
    struct SilentControl {
        crashed: Vec<String>,
    }

    impl FlightControl for SilentControl {
        fn get_instructions(&mut self, _aircraft: &mut Aircraft) -> WaypointQueue {
            WaypointQueue::new()
        }
        fn reserve_terminal(&mut self, _aircraft: &Aircraft) -> WaypointQueue {
            WaypointQueue::new()
        }
        fn arrived_at_terminal(&mut self, _aircraft: &Aircraft) {}
        fn aircraft_crashed(&mut self, aircraft: &Aircraft) {
            self.crashed.push(aircraft.flight_number().to_string());
        }
    }

    fn aircraft(flight: &str, fuel: f32) -> Aircraft {
        Aircraft::new(
            get_type(AircraftModel::Concorde),
            flight,
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.5, 0.0, 0.0),
            fuel,
        )
    }

    #[test]
    fn test_add_registers_handle() {
        let mut manager = AircraftManager::default();
        let handle = manager.add_aircraft(aircraft("AF1000", 1000.0));
        let stored = manager.world().get::<&Aircraft>(handle).unwrap();
        assert_eq!(stored.handle(), handle);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_crash_is_counted_and_pruned() {
        let mut manager = AircraftManager::default();
        let doomed = manager.add_aircraft(aircraft("LH1000", 0.4));
        let fine = manager.add_aircraft(aircraft("LH1001", 1000.0));
        let mut control = SilentControl { crashed: Vec::new() };

        let crashes = manager.advance(0.1, &mut control);

        assert_eq!(crashes.len(), 1);
        assert_eq!(crashes[0].reason, CrashReason::OutOfFuel);
        assert_eq!(control.crashed, vec!["LH1000".to_string()]);
        assert_eq!(manager.crashed_count(), 1);
        assert!(!manager.contains(doomed));
        assert!(manager.contains(fine));
    }

    #[test]
    fn test_count_by_airline_uses_prefix() {
        let mut manager = AircraftManager::default();
        manager.add_aircraft(aircraft("AF1000", 1000.0));
        manager.add_aircraft(aircraft("AF2000", 1000.0));
        manager.add_aircraft(aircraft("KL1000", 1000.0));
        assert_eq!(manager.count_by_airline("AF"), 2);
        assert_eq!(manager.count_by_airline("KL"), 1);
        assert_eq!(manager.count_by_airline("EY"), 0);
    }

    #[test]
    fn test_required_fuel_counts_low_fuel_only() {
        let mut manager = AircraftManager::default();
        manager.add_aircraft(aircraft("DL1000", 100.0));
        manager.add_aircraft(aircraft("DL1001", 350.0));
        manager.add_aircraft(aircraft("DL1002", 2000.0));
        assert_eq!(manager.required_fuel(), 2900.0 + 2650.0);
    }
}
