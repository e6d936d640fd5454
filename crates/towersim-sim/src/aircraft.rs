//! Aircraft: kinematics, fuel and the waypoint-following lifecycle.
//!
//! The lifecycle (circling, approaching, at terminal, departing, gone,
//! crashed) is implicit in the flags and the waypoint queue:
//!
//! - circling: not landed and no terminal waypoint queued
//! - approaching/taxiing: a terminal waypoint is queued
//! - at terminal: parked, waiting for the tower to clear departure
//! - departing: landed, left the terminal, waypoints left
//! - out of the simulation: departed with no waypoints left, or crashed

use std::cmp::Ordering;

use hecs::Entity;
use tracing::{debug, info};

use towersim_core::constants::*;
use towersim_core::enums::CrashReason;
use towersim_core::error::AircraftCrash;
use towersim_core::geometry::{Point3D, PointExt};
use towersim_core::waypoint::WaypointQueue;

use crate::aircraft_types::AircraftType;

/// What an aircraft needs from the tower controlling its airport.
pub trait FlightControl {
    /// New waypoints for an aircraft whose queue ran empty.
    /// Empty when the aircraft has to wait (still being serviced).
    fn get_instructions(&mut self, aircraft: &mut Aircraft) -> WaypointQueue;

    /// Try to reserve a terminal. Returns the approach path, or an empty
    /// queue when the request is refused.
    fn reserve_terminal(&mut self, aircraft: &Aircraft) -> WaypointQueue;

    /// The aircraft reached the terminal it reserved.
    fn arrived_at_terminal(&mut self, aircraft: &Aircraft);

    /// The aircraft crashed; release anything it holds.
    fn aircraft_crashed(&mut self, aircraft: &Aircraft);
}

/// A single aircraft. Lives as a component in the fleet's hecs world.
#[derive(Debug, Clone)]
pub struct Aircraft {
    handle: Entity,
    aircraft_type: AircraftType,
    flight_number: String,
    position: Point3D,
    velocity: Point3D,
    waypoints: WaypointQueue,
    fuel: f32,
    landing_gear_deployed: bool,
    at_terminal: bool,
    has_landed: bool,
    has_crashed: bool,
}

impl Aircraft {
    /// Create an aircraft. Velocity is capped to the current regime and
    /// fuel to the tank capacity.
    pub fn new(
        aircraft_type: AircraftType,
        flight_number: impl Into<String>,
        position: Point3D,
        velocity: Point3D,
        fuel: f32,
    ) -> Self {
        let mut aircraft = Self {
            handle: Entity::DANGLING,
            aircraft_type,
            flight_number: flight_number.into(),
            position,
            velocity,
            waypoints: WaypointQueue::new(),
            fuel: fuel.min(aircraft_type.fuel_capacity),
            landing_gear_deployed: false,
            at_terminal: false,
            has_landed: false,
            has_crashed: false,
        };
        aircraft.velocity = aircraft.velocity.cap_length(aircraft.max_speed());
        aircraft
    }

    /// Arena handle in the fleet world. Dangling until registered.
    pub fn handle(&self) -> Entity {
        self.handle
    }

    pub(crate) fn register(&mut self, handle: Entity) {
        self.handle = handle;
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn aircraft_type(&self) -> &AircraftType {
        &self.aircraft_type
    }

    pub fn position(&self) -> Point3D {
        self.position
    }

    pub fn velocity(&self) -> Point3D {
        self.velocity
    }

    pub fn waypoints(&self) -> &WaypointQueue {
        &self.waypoints
    }

    /// Replace the remaining flight plan.
    pub fn set_waypoints(&mut self, waypoints: WaypointQueue) {
        self.waypoints = waypoints;
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn fuel_capacity(&self) -> f32 {
        self.aircraft_type.fuel_capacity
    }

    /// Fuel needed to fill the tank.
    pub fn fuel_deficit(&self) -> f32 {
        (self.fuel_capacity() - self.fuel).max(0.0)
    }

    pub fn landing_gear_deployed(&self) -> bool {
        self.landing_gear_deployed
    }

    pub fn distance_to(&self, p: Point3D) -> f32 {
        self.position.distance(p)
    }

    pub fn is_on_ground(&self) -> bool {
        self.position.z < DISTANCE_THRESHOLD
    }

    /// Speed cap of the current ground/air regime.
    pub fn max_speed(&self) -> f32 {
        if self.is_on_ground() {
            self.aircraft_type.max_ground_speed
        } else {
            self.aircraft_type.max_air_speed
        }
    }

    pub fn is_out_of_sim(&self) -> bool {
        (self.has_landed && !self.at_terminal && self.waypoints.is_empty()) || self.has_crashed
    }

    pub fn crash(&mut self) {
        self.has_crashed = true;
    }

    pub fn has_crashed(&self) -> bool {
        self.has_crashed
    }

    /// A terminal waypoint ends the queued flight plan.
    pub fn has_terminal(&self) -> bool {
        self.waypoints
            .back()
            .is_some_and(|wp| wp.is_at_terminal())
    }

    pub fn is_circling(&self) -> bool {
        !self.has_landed && !self.has_terminal()
    }

    pub fn is_at_terminal(&self) -> bool {
        self.at_terminal
    }

    pub fn has_left(&self) -> bool {
        self.has_landed && !self.at_terminal
    }

    pub fn is_low_on_fuel(&self) -> bool {
        self.fuel < self.fuel_capacity() * LOW_FUEL_FRACTION
    }

    pub(crate) fn leave_terminal(&mut self) {
        self.at_terminal = false;
    }

    /// Processing order of the fleet pass: aircraft heading to a terminal
    /// come first, then lower fuel first.
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        other
            .has_terminal()
            .cmp(&self.has_terminal())
            .then_with(|| self.fuel.total_cmp(&other.fuel))
    }

    /// Fill the tank from `fuel_stock`. Returns the amount transferred.
    pub fn refill(&mut self, fuel_stock: &mut f32) -> f32 {
        if *fuel_stock <= 0.0 {
            return 0.0;
        }
        let refilled = self.fuel_deficit().min(*fuel_stock);
        *fuel_stock -= refilled;
        self.fuel += refilled;
        info!(
            flight = %self.flight_number,
            "Refilling {refilled} units of fuel to aircraft {}",
            self.flight_number
        );
        refilled
    }

    /// Advance by one tick of `dt` seconds.
    ///
    /// Burns fuel, follows the waypoint queue and asks `control` for new
    /// instructions when it runs empty. An `Err` is fatal to this aircraft
    /// only.
    pub fn advance(
        &mut self,
        dt: f32,
        control: &mut impl FlightControl,
    ) -> Result<(), AircraftCrash> {
        self.fuel -= FUEL_BURN_PER_TICK;
        if self.fuel <= 0.0 {
            return Err(self.crash_report(CrashReason::OutOfFuel));
        }

        if self.waypoints.is_empty() {
            if self.is_out_of_sim() {
                return Ok(());
            }
            let instructions = control.get_instructions(self);
            self.waypoints.extend(instructions);
        }

        if self.at_terminal {
            return Ok(());
        }

        if self.is_circling() {
            let path = control.reserve_terminal(self);
            if !path.is_empty() {
                self.waypoints = path;
            }
        }

        self.turn_to_waypoint(dt);
        self.position += self.velocity * dt;
        self.velocity = self.velocity.cap_length(self.max_speed());

        if let Some(next) = self.waypoints.front().copied() {
            if self.distance_to(next.position()) < DISTANCE_THRESHOLD {
                if next.is_at_terminal() {
                    self.arrive_at_terminal(control);
                } else {
                    self.operate_landing_gear();
                }
                self.waypoints.pop_front();
            }
        }

        if self.is_on_ground() {
            if !self.landing_gear_deployed {
                return Err(self.crash_report(CrashReason::BadLanding));
            }
        } else {
            // too slow to stay up
            let speed = self.velocity.length();
            if speed < SPEED_THRESHOLD {
                self.position.z -= SINK_FACTOR * (SPEED_THRESHOLD - speed);
            }
        }

        Ok(())
    }

    /// Steer toward the next waypoint.
    ///
    /// With a waypoint after it, aim at the point Z on the line through both
    /// such that |Z - w1| is half our distance to w1, on the far side from
    /// w2. This rounds corners instead of overshooting them.
    fn turn_to_waypoint(&mut self, dt: f32) {
        let Some(next) = self.waypoints.front() else {
            return;
        };
        if dt <= 0.0 {
            return;
        }

        let mut target = next.position();
        if let Some(after) = self.waypoints.get(1) {
            let d = (next.position() - self.position).length();
            if let Ok(lead) = (next.position() - after.position()).normalize_to(d / 2.0) {
                target += lead;
            }
        }

        let direction = (target - self.position) / dt;
        self.turn(direction - self.velocity);
    }

    fn turn(&mut self, delta: Point3D) {
        let accel = delta.cap_length(self.aircraft_type.max_accel);
        self.velocity = (self.velocity + accel).cap_length(self.max_speed());
    }

    fn arrive_at_terminal(&mut self, control: &mut impl FlightControl) {
        control.arrived_at_terminal(self);
        self.at_terminal = true;
        self.has_landed = true;
    }

    /// Deploy the gear when the next leg goes from air to ground, retract it
    /// once two consecutive waypoints are airborne.
    fn operate_landing_gear(&mut self) {
        if self.waypoints.len() < 2 {
            return;
        }
        let ground_before = self.waypoints[0].is_on_ground();
        let ground_after = self.waypoints[1].is_on_ground();
        match (ground_before, ground_after) {
            (true, false) => info!(flight = %self.flight_number, "{} lift off", self.flight_number),
            (false, true) => {
                info!(flight = %self.flight_number, "{} is now landing...", self.flight_number);
                self.landing_gear_deployed = true;
            }
            (false, false) => self.landing_gear_deployed = false,
            (true, true) => {}
        }
    }

    fn crash_report(&self, reason: CrashReason) -> AircraftCrash {
        debug!(flight = %self.flight_number, fuel = self.fuel, "crash detected");
        AircraftCrash {
            flight_number: self.flight_number.clone(),
            position: self.position,
            velocity: self.velocity,
            reason,
        }
    }

    /// Park at the current position as if service had started.
    #[cfg(test)]
    pub(crate) fn park_for_test(&mut self) {
        self.at_terminal = true;
        self.has_landed = true;
        self.landing_gear_deployed = true;
        self.waypoints.clear();
    }
}
