//! Model-specific performance profiles.

use serde::{Deserialize, Serialize};

use towersim_core::constants::MAX_FUEL;
use towersim_core::enums::AircraftModel;

/// Performance envelope of an aircraft model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftType {
    pub model: AircraftModel,
    /// Speed cap while grounded (units/s).
    pub max_ground_speed: f32,
    /// Speed cap while airborne (units/s).
    pub max_air_speed: f32,
    /// Largest velocity change per tick.
    pub max_accel: f32,
    /// Tank capacity.
    pub fuel_capacity: f32,
}

/// Get the performance profile for a given model.
pub fn get_type(model: AircraftModel) -> AircraftType {
    match model {
        AircraftModel::L1011 => AircraftType {
            model,
            max_ground_speed: 0.7,
            max_air_speed: 0.7,
            max_accel: 0.5,
            fuel_capacity: MAX_FUEL,
        },
        AircraftModel::B707 => AircraftType {
            model,
            max_ground_speed: 0.7,
            max_air_speed: 0.7,
            max_accel: 0.5,
            fuel_capacity: MAX_FUEL,
        },
        AircraftModel::Concorde => AircraftType {
            model,
            max_ground_speed: 0.9,
            max_air_speed: 0.9,
            max_accel: 0.5,
            fuel_capacity: MAX_FUEL,
        },
    }
}
