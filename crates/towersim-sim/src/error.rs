//! Errors raised by the simulation crate.

use thiserror::Error;

use towersim_core::error::GeometryError;

/// Aircraft creation failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactoryError {
    #[error("all {0} flight numbers are taken")]
    FlightNumbersExhausted(usize),
    #[error("cannot compute an inbound heading: {0}")]
    Heading(#[from] GeometryError),
}

/// Failures loading a `SimConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid simulation configuration: {0}")]
    ValidationError(String),
}
