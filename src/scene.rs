//! Scene description threaded through the shading pipeline.

use crate::colors::Rgb;
use crate::light::DirectionalLight;
use crate::math::{Transform3D, Vec3};
use crate::projection::apply_perspective;

/// Everything the vertex shaders need to know about the world.
///
/// A plain value: build it once per frame (or keep it across frames) and
/// pass it by reference into each render call. There is no other hidden
/// render state.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub view: Transform3D,
    pub perspective_amount: f32,
    pub ambient_light: Rgb,
    pub directional_lights: Vec<DirectionalLight>,
}

impl Scene {
    pub fn new(view: Transform3D, perspective_amount: f32, ambient_light: Rgb) -> Self {
        Self {
            view,
            perspective_amount,
            ambient_light,
            directional_lights: Vec::new(),
        }
    }

    /// Builder-style light registration; lights are evaluated in insertion order.
    pub fn with_light(mut self, light: DirectionalLight) -> Self {
        self.directional_lights.push(light);
        self
    }

    /// Applies this scene's pseudo-perspective to a view-space position.
    pub fn project(&self, position: Vec3) -> Vec3 {
        apply_perspective(position, &self.view, self.perspective_amount)
    }

    /// Ambient light plus every directional light facing `normal`, clamped.
    pub fn light_at(&self, normal: Vec3) -> Rgb {
        self.directional_lights
            .iter()
            .filter_map(|light| light.illuminate(normal))
            .fold(self.ambient_light, |color, contribution| color + contribution)
    }
}
