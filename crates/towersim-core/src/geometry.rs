//! Fixed-dimension vector helpers.
//!
//! Simulation space is 3D and tied to the airport: the runway is parallel to
//! the x-axis, z points to the sky and y is perpendicular to both. The
//! renderer works on a 2D isometric projection of that space.

use glam::{Vec2, Vec3};

use crate::error::GeometryError;

/// A position (or direction) in simulation space.
pub type Point3D = Vec3;

/// A position on the projected drawing plane.
pub type Point2D = Vec2;

/// Length-controlling operations shared by all point dimensions.
pub trait PointExt: Copy {
    /// Rescale to `target_len`. Fails on a zero-length vector.
    fn normalize_to(self, target_len: f32) -> Result<Self, GeometryError>;

    /// Shrink to `max_len` if longer; never increases the magnitude.
    fn cap_length(self, max_len: f32) -> Self;
}

macro_rules! impl_point_ext {
    ($($ty:ty),*) => {
        $(
            impl PointExt for $ty {
                fn normalize_to(self, target_len: f32) -> Result<Self, GeometryError> {
                    let current_len = self.length();
                    if current_len == 0.0 {
                        return Err(GeometryError::ZeroLength);
                    }
                    Ok(self * (target_len / current_len))
                }

                fn cap_length(self, max_len: f32) -> Self {
                    debug_assert!(max_len > 0.0, "cap_length needs a positive bound");
                    let current_len = self.length();
                    if current_len > max_len {
                        self * (max_len / current_len)
                    } else {
                        self
                    }
                }
            }
        )*
    };
}

impl_point_ext!(Vec2, Vec3);

/// Project a simulation-space point onto the drawing plane.
///
/// {1,0,0} -> {.5,.5}, {0,1,0} -> {-.5,.5}, {0,0,1} -> {0,1}
pub fn project_2d(p: Point3D) -> Point2D {
    Vec2::new(0.5 * p.x - 0.5 * p.y, 0.5 * p.x + 0.5 * p.y + p.z)
}

/// Draw order of a simulation-space point (larger is drawn later).
pub fn z_order(p: Point3D) -> f32 {
    p.x + p.y
}
