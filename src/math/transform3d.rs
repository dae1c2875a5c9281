//! Affine 3D transform stored as a 4x4 coefficient grid.
//!
//! # Convention
//! - Points are **column vectors** on the right: `M * p`
//! - Translation is stored in the **last column**
//! - Row 3 carries the homogeneous term; its last entry (`dm`) weights the
//!   translation column when the transform is applied, and no divide happens
//!
//! ```text
//! | sx ax bx tx |
//! | ay sy by ty |
//! | az bz sz tz |
//! | am bm cm dm |
//! ```
//!
//! [`Transform3D::multiply`] is the plain matrix product, so `a.multiply(&b)`
//! applies `b` first. [`Transform3D::concat`] reads in application order:
//! `model.concat(&view)` applies `model`, then `view`.

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};

use super::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    data: [[f32; 4]; 4],
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Self { data }
    }

    pub const fn identity() -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Self::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation about the X axis (looking down +X).
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Full 4x4 matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Transform3D) -> Transform3D {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Transform3D::new(result)
    }

    /// Composes in application order: the result applies `self`, then `next`.
    pub fn concat(&self, next: &Transform3D) -> Transform3D {
        next.multiply(self)
    }

    /// Applies the transform to a point, weighting translation by `dm`.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        let m = &self.data;
        let dm = m[3][3];
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + dm * m[0][3],
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + dm * m[1][3],
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + dm * m[2][3],
        )
    }

    /// Returns a new transform that additionally translates after `self`.
    pub fn translate(&self, x: f32, y: f32, z: f32) -> Self {
        self.concat(&Self::translation(x, y, z))
    }

    /// Returns a new transform that additionally scales about the world origin.
    pub fn scale(&self, x: f32, y: f32, z: f32) -> Self {
        self.concat(&Self::scaling(x, y, z))
    }

    /// Rotates about the point the transform maps the model origin to, so a
    /// placed object spins in place instead of orbiting the world origin.
    pub fn rotate_x_around_origin(&self, angle: f32) -> Self {
        self.rotate_around_origin(&Self::rotation_x(angle))
    }

    pub fn rotate_y_around_origin(&self, angle: f32) -> Self {
        self.rotate_around_origin(&Self::rotation_y(angle))
    }

    pub fn rotate_z_around_origin(&self, angle: f32) -> Self {
        self.rotate_around_origin(&Self::rotation_z(angle))
    }

    fn rotate_around_origin(&self, rotation: &Transform3D) -> Self {
        let pivot = self.apply(Vec3::ZERO);
        self.translate(-pivot.x, -pivot.y, -pivot.z)
            .concat(rotation)
            .translate(pivot.x, pivot.y, pivot.z)
    }

    /// Same transform with the translation column zeroed.
    pub fn without_translation(&self) -> Self {
        let mut data = self.data;
        data[0][3] = 0.0;
        data[1][3] = 0.0;
        data[2][3] = 0.0;
        Self::new(data)
    }

    /// The homogeneous scale term, normally 1.
    #[inline]
    pub fn dm(&self) -> f32 {
        self.data[3][3]
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

/// Matrix product, same as [`Transform3D::multiply`].
impl Mul<Transform3D> for Transform3D {
    type Output = Transform3D;

    fn mul(self, rhs: Transform3D) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl AbsDiffEq for Transform3D {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Transform3D {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_is_multiplicative_identity() {
        let t = Transform3D::rotation_y(0.3).translate(1.0, 2.0, 3.0);
        assert_eq!(Transform3D::identity().multiply(&t), t);
        assert_eq!(t.multiply(&Transform3D::identity()), t);
    }

    #[test]
    fn translation_moves_points() {
        let t = Transform3D::translation(10.0, -5.0, 2.0);
        assert_eq!(t.apply(Vec3::new(1.0, 1.0, 1.0)), Vec3::new(11.0, -4.0, 3.0));
    }

    #[test]
    fn dm_weights_translation() {
        let mut t = Transform3D::translation(10.0, 20.0, 30.0);
        t.set(3, 3, 0.5);
        assert_eq!(t.dm(), 0.5);
        assert_eq!(t.apply(Vec3::ZERO), Vec3::new(5.0, 10.0, 15.0));
    }

    #[test]
    fn rotation_z_quarter_turn() {
        let p = Transform3D::rotation_z(FRAC_PI_2).apply(Vec3::RIGHT);
        assert_abs_diff_eq!(p, Vec3::UP, epsilon = 1e-6);
    }

    #[test]
    fn rotation_x_quarter_turn() {
        let p = Transform3D::rotation_x(FRAC_PI_2).apply(Vec3::UP);
        assert_abs_diff_eq!(p, Vec3::FORWARD, epsilon = 1e-6);
    }

    #[test]
    fn concat_applies_in_order() {
        // Scale then translate: the translation is not scaled.
        let t = Transform3D::scaling(2.0, 2.0, 2.0).concat(&Transform3D::translation(1.0, 0.0, 0.0));
        assert_eq!(t.apply(Vec3::new(1.0, 1.0, 1.0)), Vec3::new(3.0, 2.0, 2.0));

        // Translate then scale: the translation is scaled.
        let t = Transform3D::translation(1.0, 0.0, 0.0).concat(&Transform3D::scaling(2.0, 2.0, 2.0));
        assert_eq!(t.apply(Vec3::new(1.0, 1.0, 1.0)), Vec3::new(4.0, 2.0, 2.0));
    }

    #[test]
    fn multiply_is_associative() {
        let a = Transform3D::scaling(2.0, 3.0, 0.5).concat(&Transform3D::rotation_x(0.7));
        let b = Transform3D::rotation_y(-1.1).translate(4.0, -2.0, 9.0);
        let c = Transform3D::rotation_z(2.4).scale(1.5, 1.5, 1.5);

        let left = a.multiply(&b).multiply(&c);
        let right = a.multiply(&b.multiply(&c));
        assert_relative_eq!(left, right, epsilon = 1e-4, max_relative = 1e-5);
    }

    #[test]
    fn rotate_around_origin_keeps_pivot_fixed() {
        let placed = Transform3D::translation(100.0, 50.0, 0.0);
        let rotated = placed.rotate_y_around_origin(0.8);
        assert_abs_diff_eq!(rotated.apply(Vec3::ZERO), Vec3::new(100.0, 50.0, 0.0), epsilon = 1e-4);

        let expected = Transform3D::rotation_y(0.8)
            .concat(&placed)
            .apply(Vec3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(rotated.apply(Vec3::new(1.0, 2.0, 3.0)), expected, epsilon = 1e-4);
    }

    #[test]
    fn without_translation_keeps_linear_part() {
        let t = Transform3D::scaling(2.0, 2.0, 2.0).translate(5.0, 5.0, 5.0);
        let n = t.without_translation();
        assert_eq!(n.apply(Vec3::ONE), Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(n.dm(), 1.0);
    }
}
