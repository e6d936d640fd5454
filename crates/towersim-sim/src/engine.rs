//! Simulation engine: the root that owns the fleet, the airport and the
//! aircraft factory.
//!
//! `SimulationEngine` processes driver commands, runs the fleet and airport
//! passes in a fixed order and produces `SimSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;
use std::path::Path;

use glam::Vec3;
use hecs::Entity;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use towersim_core::commands::SimCommand;
use towersim_core::constants::{MAX_TIME_SCALE, MIN_TIME_SCALE, TICK_RATE};
use towersim_core::enums::{AircraftModel, SimPhase};
use towersim_core::events::SimEvent;
use towersim_core::state::SimSnapshot;
use towersim_core::types::SimTime;

use crate::aircraft::Aircraft;
use crate::aircraft_manager::AircraftManager;
use crate::airport::Airport;
use crate::airport_layout::AirportLayout;
use crate::error::{ConfigError, FactoryError};
use crate::factory::AircraftFactory;
use crate::systems;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f32,
    /// Ticks per wall-clock second.
    pub tick_rate: u32,
    /// Aircraft spawned before the first tick.
    pub initial_aircraft: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            tick_rate: TICK_RATE,
            initial_aircraft: 0,
        }
    }
}

impl SimConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate must be positive".to_string(),
            ));
        }
        if !(MIN_TIME_SCALE..=MAX_TIME_SCALE).contains(&self.time_scale) {
            return Err(ConfigError::ValidationError(format!(
                "time_scale {} outside [{MIN_TIME_SCALE}, {MAX_TIME_SCALE}]",
                self.time_scale
            )));
        }
        Ok(())
    }
}

/// The simulation engine. Owns the fleet, the airport and all sim state.
pub struct SimulationEngine {
    fleet: AircraftManager,
    airport: Airport,
    factory: AircraftFactory,
    time: SimTime,
    phase: SimPhase,
    time_scale: f32,
    tick_rate: u32,
    command_queue: VecDeque<SimCommand>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine around a one-lane airport at the
    /// origin.
    pub fn new(config: SimConfig) -> Self {
        let mut seeder = ChaCha8Rng::seed_from_u64(config.seed);
        let airport = Airport::new(AirportLayout::one_lane(), Vec3::ZERO, seeder.gen());
        let factory = AircraftFactory::new(seeder.gen(), airport.position());

        let mut engine = Self {
            fleet: AircraftManager::default(),
            airport,
            factory,
            time: SimTime::default(),
            phase: SimPhase::default(),
            time_scale: config.time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE),
            tick_rate: config.tick_rate.max(1),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        };
        for _ in 0..config.initial_aircraft {
            if let Err(err) = engine.spawn_random_aircraft() {
                warn!(%err, "initial aircraft not spawned");
                break;
            }
        }
        engine
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Process queued commands, advance one tick if running and return the
    /// resulting snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Running {
            self.advance(self.dt());
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.time,
            self.phase,
            self.time_scale,
            &self.fleet,
            &self.airport,
            events,
        )
    }

    /// Advance the simulation by `dt` seconds: the fleet pass, then the
    /// airport pass.
    pub fn advance(&mut self, dt: f32) {
        let crashes = {
            let mut control = self.airport.control(&mut self.events);
            self.fleet.advance(dt, &mut control)
        };
        for crash in crashes {
            self.events.push(SimEvent::AircraftCrashed {
                flight_number: crash.flight_number,
                reason: crash.reason,
            });
        }

        self.airport.tick(&self.fleet, &mut self.events);
        self.time.advance(dt);
        debug!(tick = self.time.tick, fleet = self.fleet.len(), "tick");
    }

    /// Simulated seconds per tick.
    pub fn dt(&self) -> f32 {
        self.time_scale / self.tick_rate as f32
    }

    /// Spawn an inbound aircraft of `model`.
    pub fn spawn_aircraft(&mut self, model: AircraftModel) -> Result<Entity, FactoryError> {
        let aircraft = self.factory.create_aircraft(model)?;
        Ok(self.register(aircraft))
    }

    /// Spawn an inbound aircraft of a random model.
    pub fn spawn_random_aircraft(&mut self) -> Result<Entity, FactoryError> {
        let aircraft = self.factory.create_random_aircraft()?;
        Ok(self.register(aircraft))
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn fleet(&self) -> &AircraftManager {
        &self.fleet
    }

    pub fn airport(&self) -> &Airport {
        &self.airport
    }

    /// Add an aircraft built outside the factory (for tests).
    #[cfg(test)]
    pub(crate) fn insert_aircraft(&mut self, aircraft: Aircraft) -> Entity {
        self.fleet.add_aircraft(aircraft)
    }

    fn register(&mut self, aircraft: Aircraft) -> Entity {
        info!(
            flight = %aircraft.flight_number(),
            model = ?aircraft.aircraft_type().model,
            fuel = aircraft.fuel(),
            "{} entering airspace",
            aircraft.flight_number()
        );
        self.events.push(SimEvent::AircraftSpawned {
            flight_number: aircraft.flight_number().to_string(),
            model: aircraft.aircraft_type().model,
            fuel: aircraft.fuel(),
        });
        self.fleet.add_aircraft(aircraft)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::SpawnAircraft { model } => {
                if let Err(err) = self.spawn_aircraft(model) {
                    warn!(%err, ?model, "spawn refused");
                }
            }
            SimCommand::SpawnRandomAircraft => {
                if let Err(err) = self.spawn_random_aircraft() {
                    warn!(%err, "spawn refused");
                }
            }
            SimCommand::ReportAirline { airline } => {
                let count = self.fleet.count_by_airline(&airline);
                info!(%airline, count, "{airline} has {count} aircraft in the air or on the ground");
                self.events.push(SimEvent::AirlineReport { airline, count });
            }
            SimCommand::ReportCrashes => {
                let count = self.fleet.crashed_count();
                info!(count, "{count} aircraft crashed so far");
                self.events.push(SimEvent::CrashReport { count });
            }
            SimCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
            }
            SimCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                }
            }
        }
    }
}
