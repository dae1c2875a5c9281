//! Placement of an object in the world.
//!
//! Provides a [`Transform`] value with a fluent API for managing position,
//! rotation (Euler angles) and scale. Interactive code keeps one of these per
//! object, updates it from input, and converts it with
//! [`Transform::to_transform3d`] when building the next frame.

use crate::math::{Transform3D, Vec3};

/// A 3D transform with position, rotation (Euler angles), and scale.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(5.0, 2.0, 0.0)
///     .rotate_y(0.1)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3, // radians: x=pitch, y=yaw, z=roll
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Pitch.
    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    /// Yaw.
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    /// Roll.
    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotation.z += angle;
        self
    }

    /// Turns a mouse drag of `(dx, dy)` pixels into yaw and pitch.
    pub fn drag(&mut self, dx: f32, dy: f32, radians_per_pixel: f32) -> &mut Self {
        self.rotate_y(dx * radians_per_pixel)
            .rotate_x(dy * radians_per_pixel)
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    /// The affine map for this placement.
    ///
    /// Applied to a point in order: scale, roll, yaw, pitch, translation.
    pub fn to_transform3d(&self) -> Transform3D {
        Transform3D::scaling(self.scale.x, self.scale.y, self.scale.z)
            .concat(&Transform3D::rotation_z(self.rotation.z))
            .concat(&Transform3D::rotation_y(self.rotation.y))
            .concat(&Transform3D::rotation_x(self.rotation.x))
            .concat(&Transform3D::translation(
                self.position.x,
                self.position.y,
                self.position.z,
            ))
    }
}
