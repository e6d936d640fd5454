//! Simulation constants and tuning parameters.
//!
//! Distances are in airport units: the single runway is one unit long and
//! the terminals sit within half a unit of the airport origin.

/// Default simulation tick rate (Hz).
pub const TICK_RATE: u32 = 16;

/// Seconds per tick at the default tick rate and 1x time scale.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Navigation ---

/// Distance under which a waypoint counts as reached. Also the altitude
/// under which an aircraft counts as grounded.
pub const DISTANCE_THRESHOLD: f32 = 0.05;

/// Airborne speed under which an aircraft starts sinking.
pub const SPEED_THRESHOLD: f32 = 0.05;

/// Altitude lost per tick per unit of speed under `SPEED_THRESHOLD`.
pub const SINK_FACTOR: f32 = 0.1;

// --- Terminals ---

/// Number of service ticks an aircraft spends at a terminal.
pub const SERVICE_CYCLES: u32 = 40;

// --- Fuel ---

/// Fuel burnt by every aircraft on every tick, including at the gate.
pub const FUEL_BURN_PER_TICK: f32 = 0.5;

/// Tank capacity of the built-in aircraft types.
pub const MAX_FUEL: f32 = 3000.0;

/// Lower bound of the random fuel level a new aircraft arrives with.
pub const MIN_SPAWN_FUEL: f32 = 150.0;

/// Fraction of capacity under which an aircraft is low on fuel
/// (400 units of a 3000-unit tank).
pub const LOW_FUEL_FRACTION: f32 = 400.0 / 3000.0;

/// Largest fuel order a single truck delivers.
pub const MAX_TRUCK_LOAD: f32 = 5000.0;

/// Ticks between two fuel orders.
pub const FUEL_ORDER_INTERVAL_TICKS: u32 = 100;

// --- Tower ---

/// Aircraft farther than this from the airport never get a terminal.
pub const CAPTURE_RADIUS: f32 = 5.0;

/// Half the side of the square holding pattern.
pub const HOLDING_PATTERN_HALF_SIZE: f32 = 1.5;

/// Altitude of the holding pattern.
pub const HOLDING_PATTERN_ALTITUDE: f32 = 0.5;

// --- Routes ---

/// Altitude of the approach fix before the runway and of the climb-out fix after it.
pub const APPROACH_ALTITUDE: f32 = 0.7;

/// Radius of the circle on which departing aircraft leave the airspace.
pub const DEPARTURE_RADIUS: f32 = 6.0;

/// Altitude at which departing aircraft leave the airspace.
pub const DEPARTURE_ALTITUDE: f32 = 2.0;

// --- Spawning ---

/// Radius of the circle on which new aircraft appear.
pub const SPAWN_RADIUS: f32 = 3.0;

/// Altitude at which new aircraft appear.
pub const SPAWN_ALTITUDE: f32 = 2.0;

/// Airline codes used as flight number prefixes.
pub const AIRLINES: [&str; 8] = ["AF", "LH", "EY", "DL", "KL", "BA", "AY", "SK"];

/// Smallest flight number suffix.
pub const MIN_FLIGHT_SUFFIX: u32 = 1000;

/// Largest flight number suffix.
pub const MAX_FLIGHT_SUFFIX: u32 = 9999;

// --- Simulation control ---

/// Lowest accepted time scale.
pub const MIN_TIME_SCALE: f32 = 0.1;

/// Highest accepted time scale.
pub const MAX_TIME_SCALE: f32 = 10.0;
