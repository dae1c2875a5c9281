//! The per-corner record that flows through shading and rasterization.

use crate::colors::{Rgb, WHITE};
use crate::math::{Vec2, Vec3};

/// A triangle corner with every attribute the pipeline interpolates.
///
/// After vertex shading `coordinate` is in screen space: `x`/`y` are pixel
/// positions and `z` is only used for depth testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub coordinate: Vec3,
    pub normal: Vec3,
    pub color: Rgb,
    pub texture_coordinate: Vec2,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            coordinate: Vec3::ZERO,
            normal: Vec3::ZERO,
            color: WHITE,
            texture_coordinate: Vec2::ZERO,
        }
    }
}

impl Vertex {
    pub fn new(coordinate: Vec3, normal: Vec3, color: Rgb, texture_coordinate: Vec2) -> Self {
        Self {
            coordinate,
            normal,
            color,
            texture_coordinate,
        }
    }

    /// A vertex that only carries a position and a color.
    pub fn colored(x: f32, y: f32, z: f32, color: Rgb) -> Self {
        Self {
            coordinate: Vec3::new(x, y, z),
            color,
            ..Self::default()
        }
    }

    /// Interpolates all four attributes with the same parameter.
    pub fn lerp(&self, other: &Vertex, t: f32) -> Vertex {
        Vertex {
            coordinate: self.coordinate.lerp(other.coordinate, t),
            normal: self.normal.lerp(other.normal, t),
            color: self.color.lerp(other.color, t),
            texture_coordinate: self.texture_coordinate.lerp(other.texture_coordinate, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLUE, RED};
    use approx::assert_relative_eq;

    fn pair() -> (Vertex, Vertex) {
        let a = Vertex::new(
            Vec3::new(10.3, 20.7, 5.0),
            Vec3::new(0.0, 0.6, 0.8),
            RED,
            Vec2::new(0.1, 0.9),
        );
        let b = Vertex::new(
            Vec3::new(-3.0, 91.1, 12.5),
            Vec3::new(1.0, 0.0, 0.0),
            BLUE,
            Vec2::new(0.75, 0.25),
        );
        (a, b)
    }

    #[test]
    fn lerp_boundary_laws() {
        let (a, b) = pair();
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn lerp_moves_every_field_together() {
        let (a, b) = pair();
        let mid = a.lerp(&b, 0.5);
        assert_relative_eq!(mid.coordinate, Vec3::new(3.65, 55.9, 8.75), epsilon = 1e-4);
        assert_relative_eq!(mid.normal, Vec3::new(0.5, 0.3, 0.4), epsilon = 1e-6);
        assert_eq!(mid.color, Rgb::new(128, 0, 128));
        assert_relative_eq!(mid.texture_coordinate, Vec2::new(0.425, 0.575), epsilon = 1e-6);
    }
}
