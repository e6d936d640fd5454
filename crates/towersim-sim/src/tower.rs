//! The tower: decides what each aircraft does next and owns the
//! aircraft-to-terminal reservation table.

use std::collections::HashMap;

use glam::Vec3;
use hecs::Entity;
use tracing::{info, warn};

use towersim_core::constants::{
    CAPTURE_RADIUS, HOLDING_PATTERN_ALTITUDE, HOLDING_PATTERN_HALF_SIZE,
};
use towersim_core::events::SimEvent;
use towersim_core::geometry::Point3D;
use towersim_core::waypoint::{Waypoint, WaypointQueue};

use crate::aircraft::{Aircraft, FlightControl};
use crate::airport::Facilities;

/// Reservation table. At most one entry per aircraft; terminal exclusivity
/// is enforced by the airport's free-terminal search.
#[derive(Debug, Default)]
pub struct Tower {
    reservations: HashMap<Entity, usize>,
}

impl Tower {
    /// Terminal reserved by `handle`, if any.
    pub fn reservation(&self, handle: Entity) -> Option<usize> {
        self.reservations.get(&handle).copied()
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }

    fn reserved_terminal(&self, aircraft: &Aircraft) -> usize {
        match self.reservations.get(&aircraft.handle()) {
            Some(&terminal) => terminal,
            None => panic!(
                "{} is at a terminal without a reservation",
                aircraft.flight_number()
            ),
        }
    }
}

/// Square circuit flown while no terminal is available.
pub fn holding_pattern(center: Point3D) -> WaypointQueue {
    let h = HOLDING_PATTERN_HALF_SIZE;
    [(-h, -h), (h, -h), (h, h), (-h, h)]
        .into_iter()
        .map(|(x, y)| Waypoint::air(center + Vec3::new(x, y, HOLDING_PATTERN_ALTITUDE)))
        .collect()
}

/// The tower together with the facilities it schedules, borrowed for one
/// fleet pass.
pub struct TowerControl<'a> {
    tower: &'a mut Tower,
    facilities: &'a mut Facilities,
    events: &'a mut Vec<SimEvent>,
}

impl<'a> TowerControl<'a> {
    pub fn new(
        tower: &'a mut Tower,
        facilities: &'a mut Facilities,
        events: &'a mut Vec<SimEvent>,
    ) -> Self {
        Self {
            tower,
            facilities,
            events,
        }
    }

    /// Release the terminal held by `aircraft` and plan its way out.
    fn release(&mut self, aircraft: &mut Aircraft, terminal_num: usize) -> WaypointQueue {
        self.tower.reservations.remove(&aircraft.handle());
        aircraft.leave_terminal();
        self.facilities.start_path(terminal_num)
    }
}

impl FlightControl for TowerControl<'_> {
    fn get_instructions(&mut self, aircraft: &mut Aircraft) -> WaypointQueue {
        if !aircraft.is_at_terminal() {
            let path = self.reserve_terminal(aircraft);
            if path.is_empty() {
                return holding_pattern(self.facilities.position());
            }
            return path;
        }

        let terminal_num = self.tower.reserved_terminal(aircraft);
        let terminal = self.facilities.terminal_mut(terminal_num);
        let flight_number = aircraft.flight_number().to_string();

        if aircraft.has_crashed() {
            terminal.abort_service();
            warn!(flight = %flight_number, terminal = terminal_num, "service aborted");
            self.events.push(SimEvent::ServiceAborted {
                flight_number,
                terminal: terminal_num,
            });
            return self.release(aircraft, terminal_num);
        }

        if !terminal.finish_service() {
            return WaypointQueue::new();
        }
        info!(
            flight = %flight_number,
            terminal = terminal_num,
            "{flight_number} finished service at terminal {terminal_num}"
        );
        self.events.push(SimEvent::ServiceFinished {
            flight_number,
            terminal: terminal_num,
        });
        self.release(aircraft, terminal_num)
    }

    fn reserve_terminal(&mut self, aircraft: &Aircraft) -> WaypointQueue {
        if aircraft.distance_to(self.facilities.position()) >= CAPTURE_RADIUS {
            return WaypointQueue::new();
        }
        let Some((path, terminal_num)) = self.facilities.reserve_terminal(aircraft) else {
            return WaypointQueue::new();
        };

        self.tower
            .reservations
            .insert(aircraft.handle(), terminal_num);
        info!(
            flight = %aircraft.flight_number(),
            terminal = terminal_num,
            "{} cleared to land, terminal {terminal_num}",
            aircraft.flight_number()
        );
        self.events.push(SimEvent::TerminalReserved {
            flight_number: aircraft.flight_number().to_string(),
            terminal: terminal_num,
        });
        path
    }

    fn arrived_at_terminal(&mut self, aircraft: &Aircraft) {
        let terminal_num = self.tower.reserved_terminal(aircraft);
        self.facilities
            .terminal_mut(terminal_num)
            .start_service(aircraft);
        info!(
            flight = %aircraft.flight_number(),
            terminal = terminal_num,
            "now servicing {} at terminal {terminal_num}",
            aircraft.flight_number()
        );
        self.events.push(SimEvent::ServiceStarted {
            flight_number: aircraft.flight_number().to_string(),
            terminal: terminal_num,
        });
    }

    fn aircraft_crashed(&mut self, aircraft: &Aircraft) {
        let Some(terminal_num) = self.tower.reservations.remove(&aircraft.handle()) else {
            return;
        };
        self.facilities.terminal_mut(terminal_num).abort_service();
        warn!(
            flight = %aircraft.flight_number(),
            terminal = terminal_num,
            "reservation released after crash"
        );
        self.events.push(SimEvent::ServiceAborted {
            flight_number: aircraft.flight_number().to_string(),
            terminal: terminal_num,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use towersim_core::constants::SERVICE_CYCLES;
    use towersim_core::enums::AircraftModel;

    use crate::aircraft_manager::AircraftManager;
    use crate::aircraft_types::get_type;
    use crate::airport::Airport;
    use crate::airport_layout::AirportLayout;

    fn aircraft_at(world: &mut hecs::World, flight: &str, position: Point3D) -> Entity {
        let mut aircraft = Aircraft::new(
            get_type(AircraftModel::B707),
            flight,
            position,
            Vec3::ZERO,
            2000.0,
        );
        let handle = world.reserve_entity();
        aircraft.register(handle);
        world.spawn_at(handle, (aircraft,));
        handle
    }

    #[test]
    fn test_holding_pattern_is_square_at_altitude() {
        let pattern = holding_pattern(Vec3::ZERO);
        assert_eq!(pattern.len(), 4);
        for wp in &pattern {
            assert!(!wp.is_on_ground());
            assert_eq!(wp.position().z, HOLDING_PATTERN_ALTITUDE);
            assert_eq!(wp.position().x.abs(), HOLDING_PATTERN_HALF_SIZE);
            assert_eq!(wp.position().y.abs(), HOLDING_PATTERN_HALF_SIZE);
        }
    }

    #[test]
    fn test_far_aircraft_holds_despite_free_terminals() {
        let mut world = hecs::World::new();
        let far = aircraft_at(&mut world, "DL1234", Vec3::new(6.0, 0.0, 2.0));
        let mut airport = Airport::new(AirportLayout::one_lane(), Vec3::ZERO, 0);
        let mut events = Vec::new();
        let mut control = airport.control(&mut events);

        let mut aircraft = world.get::<&mut Aircraft>(far).unwrap();
        assert!(control.reserve_terminal(&aircraft).is_empty());
        let instructions = control.get_instructions(&mut aircraft);
        assert_eq!(instructions, holding_pattern(Vec3::ZERO));
        drop(control);
        assert_eq!(airport.tower().reservation_count(), 0);
    }

    #[test]
    fn test_reservation_recorded_and_released_on_crash() {
        let mut world = hecs::World::new();
        let near = aircraft_at(&mut world, "AY4321", Vec3::new(1.0, 0.0, 1.0));
        let mut airport = Airport::new(AirportLayout::one_lane(), Vec3::ZERO, 0);
        let mut events = Vec::new();

        {
            let mut control = airport.control(&mut events);
            let aircraft = world.get::<&Aircraft>(near).unwrap();
            let path = control.reserve_terminal(&aircraft);
            assert!(path.back().unwrap().is_at_terminal());
            control.aircraft_crashed(&aircraft);
        }

        assert_eq!(airport.tower().reservation(near), None);
        assert!(!airport.terminals()[0].in_use());
        assert!(matches!(events[0], SimEvent::TerminalReserved { terminal: 0, .. }));
        assert!(matches!(events[1], SimEvent::ServiceAborted { terminal: 0, .. }));
    }

    #[test]
    #[should_panic(expected = "without a reservation")]
    fn test_arrival_without_reservation_panics() {
        let mut world = hecs::World::new();
        let handle = aircraft_at(&mut world, "SK1111", Vec3::ZERO);
        let mut airport = Airport::new(AirportLayout::one_lane(), Vec3::ZERO, 0);
        let mut events = Vec::new();
        let mut control = airport.control(&mut events);
        let aircraft = world.get::<&Aircraft>(handle).unwrap();
        control.arrived_at_terminal(&aircraft);
    }

    #[test]
    fn test_departure_issued_once_service_completes() {
        let mut manager = AircraftManager::default();
        let handle = manager.add_aircraft(Aircraft::new(
            get_type(AircraftModel::B707),
            "BA5555",
            Vec3::new(0.3, 0.0, 0.0),
            Vec3::ZERO,
            2000.0,
        ));
        let mut airport = Airport::new(AirportLayout::one_lane(), Vec3::ZERO, 0);
        let mut events = Vec::new();

        {
            let mut control = airport.control(&mut events);
            let mut aircraft = manager.world().get::<&mut Aircraft>(handle).unwrap();
            assert!(!control.reserve_terminal(&aircraft).is_empty());
            aircraft.park_for_test();
            control.arrived_at_terminal(&aircraft);
            assert!(control.get_instructions(&mut aircraft).is_empty());
        }
        for _ in 0..SERVICE_CYCLES {
            airport.tick(&manager, &mut events);
        }

        let mut control = airport.control(&mut events);
        let mut aircraft = manager.world().get::<&mut Aircraft>(handle).unwrap();
        let departure = control.get_instructions(&mut aircraft);
        assert!(departure.front().unwrap().is_on_ground());
        assert!(!aircraft.is_at_terminal());
        drop(control);
        assert_eq!(airport.tower().reservation_count(), 0);
        assert!(!airport.terminals()[0].in_use());
        assert!(events
            .iter()
            .any(|e| matches!(e, SimEvent::ServiceFinished { terminal: 0, .. })));
    }
}
