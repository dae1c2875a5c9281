//! Depth-exaggerating pseudo-perspective.
//!
//! This is not a projective divide. Points are pushed toward (or away from)
//! the view origin in x/y proportionally to their depth, which gives a cheap
//! illusion of perspective while keeping every attribute linear in screen
//! space. `z` is left untouched and only feeds the depth buffer.

use crate::math::{Transform3D, Vec3};

/// Offsets `position.x`/`position.y` toward the view origin by
/// `position.z * amount` times their distance to it.
///
/// ```text
/// view_point = view * (0, 0, 0)
/// x' = x + z * (view_point.x - x) * amount
/// y' = y + z * (view_point.y - y) * amount
/// ```
pub fn apply_perspective(position: Vec3, view: &Transform3D, amount: f32) -> Vec3 {
    let view_point = view.apply(Vec3::ZERO);
    let dx = view_point.x - position.x;
    let dy = view_point.y - position.y;
    Vec3::new(
        position.x + position.z * dx * amount,
        position.y + position.z * dy * amount,
        position.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_on_view_axis_is_unchanged() {
        let view = Transform3D::translation(100.0, 100.0, 0.0);
        let p = apply_perspective(Vec3::new(100.0, 100.0, 10.0), &view, 0.01);
        assert_eq!(p, Vec3::new(100.0, 100.0, 10.0));
    }

    #[test]
    fn points_are_pulled_toward_view_origin_by_depth() {
        let view = Transform3D::translation(100.0, 100.0, 0.0);
        let p = apply_perspective(Vec3::new(50.0, 50.0, 10.0), &view, 0.01);
        assert_relative_eq!(p, Vec3::new(55.0, 55.0, 10.0), epsilon = 1e-4);
    }

    #[test]
    fn zero_amount_is_identity() {
        let view = Transform3D::translation(400.0, 300.0, 100.0);
        let p = Vec3::new(12.0, -40.0, 250.0);
        assert_eq!(apply_perspective(p, &view, 0.0), p);
    }

    #[test]
    fn negative_depth_pushes_away() {
        let view = Transform3D::translation(0.0, 0.0, 0.0);
        let p = apply_perspective(Vec3::new(10.0, -10.0, -5.0), &view, 0.1);
        assert_relative_eq!(p, Vec3::new(15.0, -15.0, -5.0), epsilon = 1e-5);
    }
}
