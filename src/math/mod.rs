//! Vector and transform types used throughout the pipeline.

pub mod transform3d;
pub mod vec2;
pub mod vec3;

pub use transform3d::Transform3D;
pub use vec2::Vec2;
pub use vec3::Vec3;

/// Linear interpolation between two scalars.
///
/// Written as `a * (1 - t) + b * t` so that `t == 0` yields exactly `a`
/// and `t == 1` yields exactly `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}
