//! Vertex and fragment shading.
//!
//! The rasterizer only moves interpolated [`Vertex`] values around; what a
//! corner looks like after transformation and lighting is decided by the
//! [`VertexShader`], and the final color of each pixel by a
//! [`FragmentShader`].
//!
//! # Pipeline per corner
//!
//! 1. Transform the coordinate by `model_transform` followed by the view.
//! 2. Transform the normal by the same map with translation removed, then
//!    normalize and negate it.
//! 3. Apply the scene's pseudo-perspective to the coordinate.
//! 4. Light it: ambient plus every directional light facing the lighting
//!    normal. Gouraud lights with the per-corner normal, flat with the face
//!    normal shared by all three corners.

use crate::colors::Rgb;
use crate::math::{Transform3D, Vec3};
use crate::scene::Scene;
use crate::texture::{Filter, Texture};
use crate::vertex::Vertex;

/// Which normal the vertex shader lights with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Per-corner lighting interpolated across the face.
    #[default]
    Gouraud,
    /// One lighting value per face, from the untransformed face normal.
    Flat,
}

impl std::fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShadingMode::Gouraud => write!(f, "Gouraud"),
            ShadingMode::Flat => write!(f, "Flat"),
        }
    }
}

/// Unit normal of a triangle: `unit((c - a) x (b - a))`.
///
/// Degenerate triangles yield the zero vector, which no light illuminates.
pub fn face_normal([a, b, c]: [Vec3; 3]) -> Vec3 {
    let normal = (c - a).cross(b - a);
    let length = normal.magnitude();
    if length > 0.0 {
        normal / length
    } else {
        Vec3::ZERO
    }
}

/// True when a shaded (screen-space) triangle faces away from the camera,
/// i.e. its face normal points against `Vec3::FORWARD`.
pub fn is_back_facing(triangle: &[Vertex; 3]) -> bool {
    let normal = face_normal(triangle.map(|v| v.coordinate));
    normal.dot(Vec3::FORWARD) < 0.0
}

/// Transforms, projects and lights model-space corners for one object.
///
/// Built once per object and frame; the combined transforms are computed up
/// front so shading a corner is a couple of matrix applies.
#[derive(Debug, Clone)]
pub struct VertexShader<'a> {
    mode: ShadingMode,
    transform: Transform3D,
    normal_transform: Transform3D,
    scene: &'a Scene,
}

impl<'a> VertexShader<'a> {
    pub fn new(mode: ShadingMode, model_transform: &Transform3D, scene: &'a Scene) -> Self {
        let transform = model_transform.concat(&scene.view);
        Self {
            mode,
            normal_transform: transform.without_translation(),
            transform,
            scene,
        }
    }

    pub fn mode(&self) -> ShadingMode {
        self.mode
    }

    /// Shades a single corner. `face_normal` is only read in flat mode.
    pub fn shade(&self, vertex: &Vertex, face_normal: Vec3) -> Vertex {
        let coordinate = self.scene.project(self.transform.apply(vertex.coordinate));
        let normal = -self.normal_transform.apply(vertex.normal).normalize();
        let lighting_normal = match self.mode {
            ShadingMode::Gouraud => normal,
            ShadingMode::Flat => face_normal,
        };

        Vertex {
            coordinate,
            normal,
            color: self.scene.light_at(lighting_normal),
            texture_coordinate: vertex.texture_coordinate,
        }
    }

    /// Shades the three corners of a model-space triangle.
    pub fn shade_triangle(&self, triangle: &[Vertex; 3]) -> [Vertex; 3] {
        let normal = face_normal(triangle.map(|v| v.coordinate));
        triangle.map(|v| self.shade(&v, normal))
    }
}

/// Computes the color of one covered pixel from its interpolated vertex.
pub trait FragmentShader {
    fn shade(&self, fragment: &Vertex) -> Rgb;
}

impl<F> FragmentShader for F
where
    F: Fn(&Vertex) -> Rgb,
{
    #[inline]
    fn shade(&self, fragment: &Vertex) -> Rgb {
        self(fragment)
    }
}

/// Writes the interpolated vertex color unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexColorShader;

impl FragmentShader for VertexColorShader {
    #[inline]
    fn shade(&self, fragment: &Vertex) -> Rgb {
        fragment.color
    }
}

/// A solid surface color modulated by the interpolated light.
#[derive(Debug, Clone, Copy)]
pub struct LitColorShader {
    pub color: Rgb,
}

impl LitColorShader {
    pub fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl FragmentShader for LitColorShader {
    #[inline]
    fn shade(&self, fragment: &Vertex) -> Rgb {
        fragment.color.multiply(self.color)
    }
}

/// Texture sampled at the interpolated coordinate, modulated by the
/// interpolated light.
#[derive(Debug, Clone, Copy)]
pub struct TextureLitShader<'a> {
    texture: &'a Texture,
    filter: Filter,
}

impl<'a> TextureLitShader<'a> {
    pub fn new(texture: &'a Texture, filter: Filter) -> Self {
        Self { texture, filter }
    }
}

impl FragmentShader for TextureLitShader<'_> {
    #[inline]
    fn shade(&self, fragment: &Vertex) -> Rgb {
        let uv = fragment.texture_coordinate;
        let texel = self.texture.sample_with(uv.x, uv.y, self.filter);
        fragment.color.multiply(texel)
    }
}
