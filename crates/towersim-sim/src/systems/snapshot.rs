//! Snapshot system: reads the fleet and the airport and builds a complete
//! SimSnapshot.
//!
//! This system is read-only. It never modifies the simulation.

use towersim_core::enums::SimPhase;
use towersim_core::events::SimEvent;
use towersim_core::state::*;
use towersim_core::types::SimTime;

use crate::aircraft::Aircraft;
use crate::aircraft_manager::AircraftManager;
use crate::airport::Airport;
use crate::render::Drawable;

/// Build a complete SimSnapshot from the current simulation state.
pub fn build_snapshot(
    time: &SimTime,
    phase: SimPhase,
    time_scale: f32,
    fleet: &AircraftManager,
    airport: &Airport,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    SimSnapshot {
        time: *time,
        phase,
        time_scale,
        aircraft: build_aircraft(fleet),
        airport: build_airport(airport),
        crashed_count: fleet.crashed_count(),
        events,
    }
}

/// Build AircraftView list in draw order.
fn build_aircraft(fleet: &AircraftManager) -> Vec<AircraftView> {
    let mut aircraft: Vec<AircraftView> = fleet
        .world()
        .query::<&Aircraft>()
        .iter()
        .map(|(_, aircraft)| AircraftView {
            flight_number: aircraft.flight_number().to_string(),
            model: aircraft.aircraft_type().model,
            position: aircraft.position(),
            velocity: aircraft.velocity(),
            render: aircraft.render_data(),
            fuel: aircraft.fuel(),
            landing_gear_deployed: aircraft.landing_gear_deployed(),
            at_terminal: aircraft.is_at_terminal(),
            waypoints_left: aircraft.waypoints().len(),
        })
        .collect();

    aircraft.sort_by(|a, b| {
        a.render
            .z
            .total_cmp(&b.render.z)
            .then_with(|| a.flight_number.cmp(&b.flight_number))
    });
    aircraft
}

/// Build AirportView with one TerminalView per gate.
fn build_airport(airport: &Airport) -> AirportView {
    AirportView {
        position: airport.position(),
        render: airport.render_data(),
        terminals: airport
            .terminals()
            .iter()
            .enumerate()
            .map(|(index, terminal)| TerminalView {
                index,
                render: terminal.render_data(),
                in_use: terminal.in_use(),
                servicing: terminal.in_use() && terminal.is_servicing(),
                service_progress: terminal.service_progress(),
            })
            .collect(),
        fuel_stock: airport.fuel_stock(),
        reservations: airport.tower().reservation_count(),
    }
}
