//! The airport: terminals, fuel logistics and the tower that schedules them.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use towersim_core::constants::{FUEL_ORDER_INTERVAL_TICKS, MAX_TRUCK_LOAD};
use towersim_core::events::SimEvent;
use towersim_core::geometry::Point3D;
use towersim_core::waypoint::WaypointQueue;

use crate::aircraft::Aircraft;
use crate::aircraft_manager::AircraftManager;
use crate::airport_layout::AirportLayout;
use crate::terminal::Terminal;
use crate::tower::{Tower, TowerControl};

/// Runway every route is planned on. The built-in layouts have one.
const MAIN_RUNWAY: usize = 0;

/// Terminals and routes. Split from the tower so the tower can hold a
/// mutable borrow of both at once.
#[derive(Debug)]
pub struct Facilities {
    layout: AirportLayout,
    position: Point3D,
    terminals: Vec<Terminal>,
    rng: ChaCha8Rng,
}

impl Facilities {
    pub fn position(&self) -> Point3D {
        self.position
    }

    pub fn layout(&self) -> &AirportLayout {
        &self.layout
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// Panics on an index the layout does not have.
    pub fn terminal_mut(&mut self, terminal_num: usize) -> &mut Terminal {
        &mut self.terminals[terminal_num]
    }

    /// Bind the first free terminal to `aircraft` and plan its approach.
    pub fn reserve_terminal(&mut self, aircraft: &Aircraft) -> Option<(WaypointQueue, usize)> {
        let terminal_num = self.terminals.iter().position(|t| !t.in_use())?;
        self.terminals[terminal_num].assign_craft(aircraft.handle());
        let path = self
            .layout
            .air_to_terminal(self.position, MAIN_RUNWAY, terminal_num);
        Some((path, terminal_num))
    }

    /// Departure route from a terminal.
    pub fn start_path(&mut self, terminal_num: usize) -> WaypointQueue {
        self.layout
            .terminal_to_air(self.position, MAIN_RUNWAY, terminal_num, &mut self.rng)
    }
}

/// An airport with its terminals, its tower and a fuel depot.
#[derive(Debug)]
pub struct Airport {
    facilities: Facilities,
    tower: Tower,
    fuel_stock: f32,
    ordered_fuel: f32,
    next_refill_ticks: u32,
}

impl Airport {
    /// `seed` drives the departure headings.
    pub fn new(layout: AirportLayout, position: Point3D, seed: u64) -> Self {
        let terminals = layout.create_terminals(position);
        Self {
            facilities: Facilities {
                layout,
                position,
                terminals,
                rng: ChaCha8Rng::seed_from_u64(seed),
            },
            tower: Tower::default(),
            fuel_stock: 0.0,
            ordered_fuel: 0.0,
            next_refill_ticks: 0,
        }
    }

    pub fn position(&self) -> Point3D {
        self.facilities.position
    }

    pub fn terminals(&self) -> &[Terminal] {
        &self.facilities.terminals
    }

    pub fn facilities(&self) -> &Facilities {
        &self.facilities
    }

    pub fn tower(&self) -> &Tower {
        &self.tower
    }

    pub fn fuel_stock(&self) -> f32 {
        self.fuel_stock
    }

    /// Size of the last fuel order.
    pub fn ordered_fuel(&self) -> f32 {
        self.ordered_fuel
    }

    /// Bind the first free terminal to `aircraft`. `None` when all are taken.
    ///
    /// This bypasses the tower: the reservation is not recorded in its table.
    pub fn reserve_terminal(&mut self, aircraft: &Aircraft) -> Option<(WaypointQueue, usize)> {
        self.facilities.reserve_terminal(aircraft)
    }

    pub fn start_path(&mut self, terminal_num: usize) -> WaypointQueue {
        self.facilities.start_path(terminal_num)
    }

    /// Tower view handed to aircraft during the fleet pass. Status events are
    /// pushed into `events`.
    pub fn control<'a>(&'a mut self, events: &'a mut Vec<SimEvent>) -> TowerControl<'a> {
        TowerControl::new(&mut self.tower, &mut self.facilities, events)
    }

    /// One airport tick: fuel logistics first, then refuel and service at
    /// every terminal.
    pub fn tick(&mut self, fleet: &AircraftManager, events: &mut Vec<SimEvent>) {
        self.manage_fuel(fleet.required_fuel(), events);

        for (index, terminal) in self.facilities.terminals.iter_mut().enumerate() {
            if let Some((flight_number, amount)) =
                terminal.refill_aircraft_if_needed(fleet.world(), &mut self.fuel_stock)
            {
                debug!(terminal = index, stock = self.fuel_stock, "refuel at terminal");
                events.push(SimEvent::Refueled {
                    flight_number,
                    amount,
                });
            }
            terminal.tick(fleet.world());
        }
    }

    /// Countdown-gated fuel order covering the fleet's unmet need, capped
    /// at one truck load.
    fn manage_fuel(&mut self, required_fuel: f32, events: &mut Vec<SimEvent>) {
        if self.next_refill_ticks > 0 {
            self.next_refill_ticks -= 1;
            return;
        }
        if required_fuel <= self.fuel_stock {
            return;
        }

        self.ordered_fuel = (required_fuel - self.fuel_stock).min(MAX_TRUCK_LOAD);
        self.fuel_stock += self.ordered_fuel;
        self.next_refill_ticks = FUEL_ORDER_INTERVAL_TICKS;
        info!(
            ordered = self.ordered_fuel,
            stock = self.fuel_stock,
            "Ordered {} liters of fuel. Current fuel: {} liters.",
            self.ordered_fuel,
            self.fuel_stock
        );
        events.push(SimEvent::FuelOrdered {
            amount: self.ordered_fuel,
            stock: self.fuel_stock,
        });
    }
}
