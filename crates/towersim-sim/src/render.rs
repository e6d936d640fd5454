//! Render boundary: where each object appears on the drawing plane.

use towersim_core::geometry::{project_2d, z_order, Point3D};
use towersim_core::state::RenderData;

use crate::aircraft::Aircraft;
use crate::airport::Airport;
use crate::terminal::Terminal;

/// Draw order of the airport ground texture.
pub const AIRPORT_Z: f32 = 1.0;

/// Anything a renderer can place.
pub trait Drawable {
    /// Position in simulation space.
    fn world_position(&self) -> Point3D;

    fn render_data(&self) -> RenderData {
        let position = self.world_position();
        RenderData {
            screen: project_2d(position),
            z: z_order(position),
        }
    }
}

impl Drawable for Aircraft {
    fn world_position(&self) -> Point3D {
        self.position()
    }
}

impl Drawable for Terminal {
    fn world_position(&self) -> Point3D {
        self.position()
    }
}

impl Drawable for Airport {
    fn world_position(&self) -> Point3D {
        self.position()
    }

    fn render_data(&self) -> RenderData {
        RenderData {
            screen: project_2d(self.position()),
            z: AIRPORT_Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    use crate::airport_layout::AirportLayout;

    #[test]
    fn test_terminal_projection_and_order() {
        let terminal = Terminal::new(Vec3::new(1.0, 0.0, 0.0));
        let data = terminal.render_data();
        assert_eq!(data.screen, Vec2::new(0.5, 0.5));
        assert_eq!(data.z, 1.0);
    }

    #[test]
    fn test_airport_has_fixed_layer() {
        let airport = Airport::new(AirportLayout::one_lane(), Vec3::new(3.0, 3.0, 0.0), 0);
        assert_eq!(airport.render_data().z, AIRPORT_Z);
        assert_eq!(airport.render_data().screen, Vec2::new(0.0, 3.0));
    }
}
