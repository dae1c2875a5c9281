//! Lighting types for the renderer.

use crate::colors::Rgb;
use crate::math::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel. The direction does not need to be
/// normalized; it is normalized whenever the light is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub intensity: Rgb,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, intensity: Rgb) -> Self {
        DirectionalLight {
            direction,
            intensity,
        }
    }

    /// Light added to a surface with the given (shaded) normal.
    ///
    /// Returns `None` when the surface faces away from the light, otherwise the
    /// intensity scaled by the cosine between the normal and the direction.
    pub fn illuminate(&self, normal: Vec3) -> Option<Rgb> {
        let dot = normal.dot(self.direction.normalize());
        (dot > 0.0).then(|| self.intensity.scale(dot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;

    #[test]
    fn test_direct_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 5.0), WHITE);
        assert_eq!(light.illuminate(Vec3::FORWARD), Some(WHITE));
    }

    #[test]
    fn test_no_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0), WHITE);
        assert_eq!(light.illuminate(-Vec3::FORWARD), None);
        // Perpendicular surfaces receive nothing either.
        assert_eq!(light.illuminate(Vec3::UP), None);
    }

    #[test]
    fn test_angled_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, 1.0, 0.0), Rgb::new(200, 100, 0));
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        // cos(45) ≈ 0.707
        assert_eq!(light.illuminate(normal), Some(Rgb::new(141, 71, 0)));
    }
}
