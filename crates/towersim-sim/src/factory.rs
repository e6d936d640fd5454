//! Aircraft factory: flight numbers, spawn positions and initial fuel.

use std::collections::HashSet;
use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use towersim_core::constants::*;
use towersim_core::enums::AircraftModel;
use towersim_core::geometry::{Point3D, PointExt};

use crate::aircraft::Aircraft;
use crate::aircraft_types::get_type;
use crate::error::FactoryError;

/// Number of distinct flight numbers the factory can hand out.
pub const FLIGHT_NUMBER_SPACE: usize =
    AIRLINES.len() * (MAX_FLIGHT_SUFFIX - MIN_FLIGHT_SUFFIX + 1) as usize;

/// Creates inbound aircraft on a circle around `center`. Flight numbers are
/// unique for the lifetime of the factory.
#[derive(Debug)]
pub struct AircraftFactory {
    rng: ChaCha8Rng,
    center: Point3D,
    used_flight_numbers: HashSet<String>,
}

impl AircraftFactory {
    pub fn new(seed: u64, center: Point3D) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            center,
            used_flight_numbers: HashSet::new(),
        }
    }

    pub fn issued_count(&self) -> usize {
        self.used_flight_numbers.len()
    }

    pub fn create_aircraft(&mut self, model: AircraftModel) -> Result<Aircraft, FactoryError> {
        let aircraft_type = get_type(model);
        let flight_number = self.next_flight_number()?;

        let angle: f32 = self.rng.gen_range(0.0..TAU);
        let start = self.center
            + Vec3::new(angle.sin(), angle.cos(), 0.0) * SPAWN_RADIUS
            + Vec3::new(0.0, 0.0, SPAWN_ALTITUDE);
        let heading = (self.center - start).normalize_to(1.0)?;
        let fuel = self
            .rng
            .gen_range(MIN_SPAWN_FUEL..aircraft_type.fuel_capacity);

        Ok(Aircraft::new(
            aircraft_type,
            flight_number,
            start,
            heading,
            fuel,
        ))
    }

    pub fn create_random_aircraft(&mut self) -> Result<Aircraft, FactoryError> {
        let model = AircraftModel::ALL[self.rng.gen_range(0..AircraftModel::ALL.len())];
        self.create_aircraft(model)
    }

    fn next_flight_number(&mut self) -> Result<String, FactoryError> {
        if self.used_flight_numbers.len() >= FLIGHT_NUMBER_SPACE {
            return Err(FactoryError::FlightNumbersExhausted(FLIGHT_NUMBER_SPACE));
        }
        loop {
            let airline = AIRLINES[self.rng.gen_range(0..AIRLINES.len())];
            let suffix = self.rng.gen_range(MIN_FLIGHT_SUFFIX..=MAX_FLIGHT_SUFFIX);
            let flight_number = format!("{airline}{suffix}");
            if self.used_flight_numbers.insert(flight_number.clone()) {
                return Ok(flight_number);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spawn_on_circle_heading_inbound() {
        let mut factory = AircraftFactory::new(11, Vec3::ZERO);
        for _ in 0..20 {
            let aircraft = factory.create_random_aircraft().unwrap();
            let pos = aircraft.position();
            assert_relative_eq!(pos.truncate().length(), SPAWN_RADIUS, epsilon = 1e-4);
            assert_relative_eq!(pos.z, SPAWN_ALTITUDE);
            // heading points back at the center
            assert!(aircraft.velocity().dot(-pos) > 0.0);
            assert!(aircraft.velocity().length() <= aircraft.max_speed() + 1e-6);
        }
    }

    #[test]
    fn test_fuel_in_spawn_range() {
        let mut factory = AircraftFactory::new(5, Vec3::ZERO);
        for _ in 0..50 {
            let aircraft = factory.create_aircraft(AircraftModel::B707).unwrap();
            assert!(aircraft.fuel() >= MIN_SPAWN_FUEL);
            assert!(aircraft.fuel() < aircraft.fuel_capacity());
        }
    }

    #[test]
    fn test_flight_numbers_unique_and_well_formed() {
        let mut factory = AircraftFactory::new(99, Vec3::ZERO);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let aircraft = factory.create_random_aircraft().unwrap();
            let number = aircraft.flight_number().to_string();
            let (airline, suffix) = number.split_at(2);
            assert!(AIRLINES.contains(&airline));
            let suffix: u32 = suffix.parse().unwrap();
            assert!((MIN_FLIGHT_SUFFIX..=MAX_FLIGHT_SUFFIX).contains(&suffix));
            assert!(seen.insert(number));
        }
        assert_eq!(factory.issued_count(), 500);
    }

    #[test]
    fn test_same_seed_same_aircraft() {
        let mut a = AircraftFactory::new(7, Vec3::ZERO);
        let mut b = AircraftFactory::new(7, Vec3::ZERO);
        for _ in 0..10 {
            let x = a.create_random_aircraft().unwrap();
            let y = b.create_random_aircraft().unwrap();
            assert_eq!(x.flight_number(), y.flight_number());
            assert_eq!(x.position(), y.position());
            assert_eq!(x.fuel(), y.fuel());
        }
    }
}
