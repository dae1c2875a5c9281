//! Core rendering engine.
//!
//! The [`Engine`] owns the framebuffer and runs the render pass: vertex
//! shading, back-face culling, scan conversion with depth testing, and an
//! optional wireframe overlay. Everything that describes the world (view,
//! lights, object transforms, materials) is passed in per call.

use crate::colors::{self, Rgb};
use crate::math::Transform3D;
use crate::model::Model;
use crate::render::shader::{is_back_facing, FragmentShader, VertexShader};
use crate::render::{
    FrameBuffer, LitColorShader, ScanlineRasterizer, ShadingMode, TextureLitShader,
};
use crate::scene::Scene;
use crate::texture::{Filter, Texture};
use crate::vertex::Vertex;

/// Surface description used to pick the fragment shader.
#[derive(Debug, Clone, Copy)]
pub struct Material<'a> {
    /// Surface color, modulated by light when there is no texture.
    pub color: Rgb,
    pub texture: Option<&'a Texture>,
    pub filter: Filter,
}

impl Default for Material<'_> {
    fn default() -> Self {
        Self {
            color: colors::WHITE,
            texture: None,
            filter: Filter::default(),
        }
    }
}

impl<'a> Material<'a> {
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn textured(texture: &'a Texture) -> Self {
        Self {
            texture: Some(texture),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }
}

/// Counters for one [`Engine::draw_model`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Faces submitted.
    pub faces: usize,
    /// Faces dropped by back-face culling.
    pub culled: usize,
    /// Faces handed to the rasterizer.
    pub rasterized: usize,
}

pub struct Engine {
    framebuffer: FrameBuffer,
    rasterizer: ScanlineRasterizer,
    shading_mode: ShadingMode,
    pub backface_culling: bool,
    /// Edge color drawn over every rasterized face, if any.
    pub wireframe: Option<Rgb>,
    pub clear_color: Rgb,
}

impl Engine {
    /// Creates an engine rendering into a depth-tested framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_framebuffer(FrameBuffer::new(width, height))
    }

    /// Creates an engine whose framebuffer has no depth buffer; faces are
    /// painted in submission order.
    pub fn without_depth(width: u32, height: u32) -> Self {
        Self::with_framebuffer(FrameBuffer::without_depth(width, height))
    }

    fn with_framebuffer(framebuffer: FrameBuffer) -> Self {
        Self {
            framebuffer,
            rasterizer: ScanlineRasterizer::new(),
            shading_mode: ShadingMode::default(),
            backface_culling: true,
            wireframe: None,
            clear_color: colors::BACKGROUND,
        }
    }

    pub fn set_shading_mode(&mut self, mode: ShadingMode) {
        self.shading_mode = mode;
    }

    pub fn shading_mode(&self) -> ShadingMode {
        self.shading_mode
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    /// Reallocates the framebuffer, keeping whether it has a depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.framebuffer = if self.framebuffer.has_depth() {
            FrameBuffer::new(width, height)
        } else {
            FrameBuffer::without_depth(width, height)
        };
        self.framebuffer.clear(self.clear_color);
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.framebuffer
    }

    /// Starts a new frame: clear color everywhere and no recorded depth.
    pub fn clear(&mut self) {
        self.framebuffer.clear(self.clear_color);
    }

    /// Rasterizes an already shaded screen-space triangle with `shader`.
    pub fn rasterize<S>(&mut self, triangle: &[Vertex; 3], shader: &S)
    where
        S: FragmentShader + ?Sized,
    {
        self.rasterizer
            .draw_triangle(triangle, shader, &mut self.framebuffer);
    }

    /// Shades and draws one model-space triangle.
    ///
    /// Returns `false` when the triangle was culled as back-facing.
    pub fn draw_triangle(
        &mut self,
        triangle: &[Vertex; 3],
        model_transform: &Transform3D,
        scene: &Scene,
        material: &Material,
    ) -> bool {
        let shader = VertexShader::new(self.shading_mode, model_transform, scene);
        self.render_face(&shader, triangle, material)
    }

    /// Draws every face of `model` in order.
    pub fn draw_model(
        &mut self,
        model: &Model,
        model_transform: &Transform3D,
        scene: &Scene,
        material: &Material,
    ) -> FrameStats {
        let shader = VertexShader::new(self.shading_mode, model_transform, scene);
        let mut stats = FrameStats::default();

        for face in model.faces() {
            stats.faces += 1;
            let triangle = model.triangle(face, material.color);
            if self.render_face(&shader, &triangle, material) {
                stats.rasterized += 1;
            } else {
                stats.culled += 1;
            }
        }

        log::debug!(
            "Rendered {} faces ({} culled, {} rasterized)",
            stats.faces,
            stats.culled,
            stats.rasterized
        );
        stats
    }

    fn render_face(
        &mut self,
        shader: &VertexShader,
        triangle: &[Vertex; 3],
        material: &Material,
    ) -> bool {
        let shaded = shader.shade_triangle(triangle);
        if self.backface_culling && is_back_facing(&shaded) {
            return false;
        }

        match material.texture {
            Some(texture) => {
                self.rasterize(&shaded, &TextureLitShader::new(texture, material.filter))
            }
            None => self.rasterize(&shaded, &LitColorShader::new(material.color)),
        }

        if let Some(color) = self.wireframe {
            self.draw_wireframe(&shaded, color);
        }
        true
    }

    fn draw_wireframe(&mut self, triangle: &[Vertex; 3], color: Rgb) {
        let points = triangle.map(|v| {
            (
                v.coordinate.x.round() as i32,
                v.coordinate.y.round() as i32,
            )
        });
        for (i, &(x0, y0)) in points.iter().enumerate() {
            let (x1, y1) = points[(i + 1) % 3];
            self.framebuffer.draw_line(x0, y0, x1, y1, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, RED, WHITE};
    use crate::light::DirectionalLight;
    use crate::math::{Vec2, Vec3};

    fn unlit_scene() -> Scene {
        Scene::new(Transform3D::identity(), 0.0, WHITE)
    }

    fn corner(x: f32, y: f32) -> Vertex {
        Vertex::new(Vec3::new(x, y, 0.0), Vec3::FORWARD, WHITE, Vec2::ZERO)
    }

    fn engine(width: u32, height: u32) -> Engine {
        let mut engine = Engine::new(width, height);
        engine.clear_color = BLACK;
        engine.clear();
        engine
    }

    #[test]
    fn front_facing_triangle_is_drawn_with_material() {
        let mut engine = engine(20, 20);
        let triangle = [corner(2.0, 2.0), corner(2.0, 15.0), corner(15.0, 2.0)];
        let drawn = engine.draw_triangle(
            &triangle,
            &Transform3D::identity(),
            &unlit_scene(),
            &Material::solid(RED),
        );
        assert!(drawn);
        assert_eq!(engine.framebuffer().get_pixel(4, 4), Some(RED));
    }

    #[test]
    fn back_facing_triangle_is_culled_unless_disabled() {
        let mut engine = engine(20, 20);
        let triangle = [corner(2.0, 2.0), corner(15.0, 2.0), corner(2.0, 15.0)];
        let scene = unlit_scene();
        let material = Material::solid(RED);

        assert!(!engine.draw_triangle(&triangle, &Transform3D::identity(), &scene, &material));
        assert_eq!(engine.framebuffer().get_pixel(4, 4), Some(BLACK));

        engine.backface_culling = false;
        assert!(engine.draw_triangle(&triangle, &Transform3D::identity(), &scene, &material));
        assert_eq!(engine.framebuffer().get_pixel(4, 4), Some(RED));
    }

    #[test]
    fn texture_is_modulated_by_light() {
        let mut engine = engine(20, 20);
        let texture = Texture::solid(1, 1, Rgb::new(200, 100, 50)).unwrap();
        let scene = Scene::new(Transform3D::identity(), 0.0, Rgb::new(128, 128, 128));
        let triangle = [corner(2.0, 2.0), corner(2.0, 15.0), corner(15.0, 2.0)];
        engine.draw_triangle(
            &triangle,
            &Transform3D::identity(),
            &scene,
            &Material::textured(&texture),
        );
        assert_eq!(engine.framebuffer().get_pixel(4, 4), Some(Rgb::new(100, 50, 25)));
    }

    #[test]
    fn wireframe_overlays_edges() {
        let mut engine = engine(20, 20);
        engine.wireframe = Some(WHITE);
        let triangle = [corner(2.0, 2.0), corner(2.0, 15.0), corner(15.0, 2.0)];
        engine.draw_triangle(
            &triangle,
            &Transform3D::identity(),
            &unlit_scene(),
            &Material::solid(RED),
        );
        assert_eq!(engine.framebuffer().get_pixel(2, 8), Some(WHITE));
        assert_eq!(engine.framebuffer().get_pixel(8, 2), Some(WHITE));
        assert_eq!(engine.framebuffer().get_pixel(4, 4), Some(RED));
    }

    #[test]
    fn draw_model_counts_culled_faces() {
        let mut engine = engine(100, 100);
        let scene = Scene::new(Transform3D::translation(50.0, 50.0, 100.0), 0.0, BLACK)
            .with_light(DirectionalLight::new(Vec3::FORWARD, WHITE));
        let fit = Transform3D::scaling(20.0, -20.0, -20.0).rotate_y_around_origin(0.4);
        let stats = engine.draw_model(&Model::cube(), &fit, &scene, &Material::default());

        assert_eq!(stats.faces, 12);
        assert_eq!(stats.culled + stats.rasterized, 12);
        assert!(stats.culled >= 4);
        assert!(stats.rasterized >= 4);
        assert_ne!(engine.framebuffer().get_pixel(50, 50), Some(BLACK));
    }

    #[test]
    fn resize_keeps_depth_mode() {
        let mut engine = Engine::without_depth(4, 4);
        engine.resize(8, 2);
        assert_eq!((engine.width(), engine.height()), (8, 2));
        assert!(!engine.framebuffer().has_depth());
    }
}
