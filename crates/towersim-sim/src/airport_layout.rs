//! Airport geometry and the routes derived from it.
//!
//! All positions are relative to the airport origin; the route builders
//! take the airport position as `offset`.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use towersim_core::constants::{APPROACH_ALTITUDE, DEPARTURE_ALTITUDE, DEPARTURE_RADIUS};
use towersim_core::geometry::Point3D;
use towersim_core::waypoint::{Waypoint, WaypointQueue};

use crate::terminal::Terminal;

/// A runway parallel to the x-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Runway {
    pub start: Point3D,
    pub end: Point3D,
}

impl Runway {
    pub fn new(start: Point3D, length: f32) -> Self {
        Self {
            start,
            end: start + Vec3::new(length, 0.0, 0.0),
        }
    }

    pub fn middle(&self) -> Point3D {
        (self.start + self.end) * 0.5
    }

    /// Half the runway as a vector from start to end.
    pub fn half_length(&self) -> Point3D {
        (self.end - self.start) * 0.5
    }
}

/// Static layout of an airport type.
#[derive(Debug, Clone)]
pub struct AirportLayout {
    /// Taxiway junction between the runway and the apron.
    crossing: Point3D,
    /// Apron entry for every terminal but the first.
    gateway: Point3D,
    terminal_positions: Vec<Point3D>,
    runways: Vec<Runway>,
}

impl AirportLayout {
    pub fn new(
        crossing: Point3D,
        gateway: Point3D,
        terminal_positions: Vec<Point3D>,
        runways: Vec<Runway>,
    ) -> Self {
        Self {
            crossing,
            gateway,
            terminal_positions,
            runways,
        }
    }

    /// Single runway, three terminals.
    pub fn one_lane() -> Self {
        Self::new(
            Vec3::new(-0.1, -0.3, 0.0),
            Vec3::new(-0.6, 0.3, 0.0),
            vec![
                Vec3::new(0.3, 0.0, 0.0),
                Vec3::new(-0.3, 0.3, 0.0),
                Vec3::new(0.0, 0.55, 0.0),
            ],
            vec![Runway::new(Vec3::new(-0.5, -0.75, 0.0), 1.0)],
        )
    }

    pub fn terminal_count(&self) -> usize {
        self.terminal_positions.len()
    }

    pub fn runways(&self) -> &[Runway] {
        &self.runways
    }

    pub fn create_terminals(&self, offset: Point3D) -> Vec<Terminal> {
        self.terminal_positions
            .iter()
            .map(|&pos| Terminal::new(offset + pos))
            .collect()
    }

    /// Approach: fix before the runway, touchdown at mid-runway, roll out to
    /// the end, taxi to the terminal.
    pub fn air_to_terminal(
        &self,
        offset: Point3D,
        runway_num: usize,
        terminal_num: usize,
    ) -> WaypointQueue {
        let runway = &self.runways[runway_num];

        let before_in_air = Waypoint::air(
            offset + runway.start - runway.half_length() + Vec3::new(0.0, 0.0, APPROACH_ALTITUDE),
        );
        let runway_middle = Waypoint::ground(offset + runway.middle());
        let runway_end = Waypoint::ground(offset + runway.end);
        let crossing = Waypoint::ground(offset + self.crossing);

        let mut result: WaypointQueue = [before_in_air, runway_middle, runway_end, crossing].into();
        if terminal_num != 0 {
            result.push_back(Waypoint::ground(offset + self.gateway));
        }
        result.push_back(Waypoint::terminal(
            offset + self.terminal_positions[terminal_num],
        ));
        result
    }

    /// Departure: taxi to the runway start, lift off past its end, then
    /// climb out toward a random point on the departure circle.
    pub fn terminal_to_air(
        &self,
        offset: Point3D,
        runway_num: usize,
        terminal_num: usize,
        rng: &mut impl Rng,
    ) -> WaypointQueue {
        let runway = &self.runways[runway_num];
        let angle: f32 = rng.gen_range(0.0..TAU);

        let crossing = Waypoint::ground(offset + self.crossing);
        let runway_start = Waypoint::ground(offset + runway.start);
        let runway_middle = Waypoint::ground(offset + runway.middle());
        let later_in_air = Waypoint::air(
            offset + runway.end + runway.half_length() + Vec3::new(0.0, 0.0, APPROACH_ALTITUDE),
        );
        let randomly_high = Waypoint::air(
            offset
                + Vec3::new(angle.sin(), angle.cos(), 0.0) * DEPARTURE_RADIUS
                + Vec3::new(0.0, 0.0, DEPARTURE_ALTITUDE),
        );

        let mut result: WaypointQueue =
            [crossing, runway_start, runway_middle, later_in_air, randomly_high].into();
        if terminal_num != 0 {
            result.push_front(Waypoint::ground(offset + self.gateway));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use towersim_core::enums::WaypointKind;

    #[test]
    fn test_approach_ends_at_terminal() {
        let layout = AirportLayout::one_lane();
        for terminal in 0..layout.terminal_count() {
            let path = layout.air_to_terminal(Vec3::ZERO, 0, terminal);
            assert_eq!(path.front().unwrap().kind(), WaypointKind::Air);
            let last = path.back().unwrap();
            assert!(last.is_at_terminal());
            assert_eq!(last.position(), layout.terminal_positions[terminal]);
            assert_eq!(path.len(), if terminal == 0 { 5 } else { 6 });
        }
    }

    #[test]
    fn test_round_trip_starts_near_terminal_and_ends_airborne() {
        let layout = AirportLayout::one_lane();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let offset = Vec3::new(1.0, -2.0, 0.0);

        for terminal in 0..layout.terminal_count() {
            let inbound = layout.air_to_terminal(offset, 0, terminal);
            let gate = inbound.back().unwrap().position();

            let outbound = layout.terminal_to_air(offset, 0, terminal, &mut rng);
            let first = outbound.front().unwrap();
            assert!(first.is_on_ground());
            assert!(first.position().distance(gate) < 0.7);

            let last = outbound.back().unwrap();
            assert_eq!(last.kind(), WaypointKind::Air);
            assert!(last.position().z > 0.0);
            let horizontal = (last.position() - offset).truncate().length();
            assert!((horizontal - DEPARTURE_RADIUS).abs() < 1e-4);
        }
    }

    #[test]
    fn test_gateway_only_for_later_terminals() {
        let layout = AirportLayout::one_lane();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let first = layout.terminal_to_air(Vec3::ZERO, 0, 0, &mut rng);
        let second = layout.terminal_to_air(Vec3::ZERO, 0, 1, &mut rng);
        assert_eq!(first.len() + 1, second.len());
        assert_eq!(second.front().unwrap().position(), layout.gateway);
    }

    #[test]
    fn test_create_terminals_applies_offset() {
        let layout = AirportLayout::one_lane();
        let offset = Vec3::new(2.0, 0.0, 0.0);
        let terminals = layout.create_terminals(offset);
        assert_eq!(terminals.len(), 3);
        assert_eq!(terminals[0].position(), Vec3::new(2.3, 0.0, 0.0));
    }
}
