//! A single gate: occupancy and the service countdown.

use hecs::{Entity, World};

use towersim_core::constants::{DISTANCE_THRESHOLD, SERVICE_CYCLES};
use towersim_core::geometry::Point3D;

use crate::aircraft::Aircraft;

/// A gate. The occupant is a handle into the fleet world, never an owner.
#[derive(Debug, Clone)]
pub struct Terminal {
    position: Point3D,
    occupant: Option<Entity>,
    service_progress: u32,
}

impl Terminal {
    pub fn new(position: Point3D) -> Self {
        Self {
            position,
            occupant: None,
            service_progress: SERVICE_CYCLES,
        }
    }

    pub fn position(&self) -> Point3D {
        self.position
    }

    pub fn occupant(&self) -> Option<Entity> {
        self.occupant
    }

    pub fn service_progress(&self) -> u32 {
        self.service_progress
    }

    pub fn in_use(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn is_servicing(&self) -> bool {
        self.service_progress < SERVICE_CYCLES
    }

    /// Bind an aircraft without starting service.
    pub fn assign_craft(&mut self, handle: Entity) {
        self.occupant = Some(handle);
    }

    /// Start the countdown. The aircraft must be parked here.
    pub fn start_service(&mut self, aircraft: &Aircraft) {
        debug_assert!(
            aircraft.distance_to(self.position) < DISTANCE_THRESHOLD,
            "{} is not parked at this terminal",
            aircraft.flight_number()
        );
        self.service_progress = 0;
    }

    /// Free the terminal regardless of progress. Returns the former occupant.
    pub fn abort_service(&mut self) -> Option<Entity> {
        self.occupant.take()
    }

    /// Free the terminal once service is complete; a no-op before that.
    /// Returns whether the terminal was freed.
    pub fn finish_service(&mut self) -> bool {
        if self.is_servicing() {
            return false;
        }
        self.occupant = None;
        true
    }

    /// Advance service by one tick. Occupants low on fuel wait for the
    /// fuel truck first.
    pub fn tick(&mut self, fleet: &World) {
        let Some(handle) = self.occupant else {
            return;
        };
        if !self.is_servicing() {
            return;
        }
        let ready = fleet
            .get::<&Aircraft>(handle)
            .is_ok_and(|aircraft| !aircraft.is_low_on_fuel());
        if ready {
            self.service_progress += 1;
        }
    }

    /// Refuel a parked occupant that is low on fuel from the shared stock.
    /// Returns the occupant's flight number and the amount transferred.
    pub fn refill_aircraft_if_needed(
        &mut self,
        fleet: &World,
        fuel_stock: &mut f32,
    ) -> Option<(String, f32)> {
        let handle = self.occupant?;
        let mut aircraft = fleet.get::<&mut Aircraft>(handle).ok()?;
        if !(aircraft.is_at_terminal() && aircraft.is_low_on_fuel()) {
            return None;
        }
        let amount = aircraft.refill(fuel_stock);
        (amount > 0.0).then(|| (aircraft.flight_number().to_string(), amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    use towersim_core::enums::AircraftModel;

    use crate::aircraft_types::get_type;

    fn parked(world: &mut World, at: Point3D, fuel: f32) -> Entity {
        let mut aircraft = Aircraft::new(
            get_type(AircraftModel::B707),
            "EY2000",
            at,
            Vec3::ZERO,
            fuel,
        );
        aircraft.park_for_test();
        world.spawn((aircraft,))
    }

    #[test]
    fn test_new_terminal_is_idle() {
        let terminal = Terminal::new(Vec3::X);
        assert!(!terminal.in_use());
        assert!(!terminal.is_servicing());
    }

    #[test]
    fn test_service_counts_to_completion() {
        let mut world = World::new();
        let at = Vec3::new(0.3, 0.0, 0.0);
        let handle = parked(&mut world, at, 2000.0);

        let mut terminal = Terminal::new(at);
        terminal.assign_craft(handle);
        assert!(terminal.in_use());
        terminal.start_service(&world.get::<&Aircraft>(handle).unwrap());
        assert!(terminal.is_servicing());

        assert!(!terminal.finish_service(), "finishing early is a no-op");
        assert!(terminal.in_use());

        for _ in 0..SERVICE_CYCLES {
            terminal.tick(&world);
        }
        assert!(!terminal.is_servicing());
        assert_eq!(terminal.service_progress(), SERVICE_CYCLES);

        terminal.tick(&world);
        assert_eq!(terminal.service_progress(), SERVICE_CYCLES, "bounded");

        assert!(terminal.finish_service());
        assert!(!terminal.in_use());
    }

    #[test]
    fn test_low_fuel_occupant_pauses_service() {
        let mut world = World::new();
        let at = Vec3::new(-0.3, 0.3, 0.0);
        let handle = parked(&mut world, at, 100.0);

        let mut terminal = Terminal::new(at);
        terminal.assign_craft(handle);
        terminal.start_service(&world.get::<&Aircraft>(handle).unwrap());

        for _ in 0..10 {
            terminal.tick(&world);
        }
        assert_eq!(terminal.service_progress(), 0);

        let mut empty_stock = 0.0;
        assert!(terminal
            .refill_aircraft_if_needed(&world, &mut empty_stock)
            .is_none());
        terminal.tick(&world);
        assert_eq!(terminal.service_progress(), 0);

        let mut stock = 10_000.0;
        let (flight, amount) = terminal
            .refill_aircraft_if_needed(&world, &mut stock)
            .unwrap();
        assert_eq!(flight, "EY2000");
        assert!(amount > 0.0);
        terminal.tick(&world);
        assert_eq!(terminal.service_progress(), 1);
    }

    #[test]
    fn test_abort_frees_unconditionally() {
        let mut world = World::new();
        let at = Vec3::ZERO;
        let handle = parked(&mut world, at, 2000.0);

        let mut terminal = Terminal::new(at);
        terminal.assign_craft(handle);
        terminal.start_service(&world.get::<&Aircraft>(handle).unwrap());
        assert_eq!(terminal.abort_service(), Some(handle));
        assert!(!terminal.in_use());
    }
}
