//! A CPU scanline rasterizer with Gouraud/flat lighting, texturing and
//! depth buffering.
//!
//! SDL2 is used only by the viewer to put the finished framebuffer on
//! screen. All rendering happens on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use scanshade::prelude::*;
//!
//! let scene = Scene::new(Transform3D::translation(400.0, 300.0, 100.0), 0.0005, colors::BLACK)
//!     .with_light(DirectionalLight::new(Vec3::FORWARD, colors::WHITE));
//! let mut engine = Engine::new(800, 600);
//! engine.clear();
//! engine.draw_model(&Model::cube(), &Transform3D::scaling(100.0, -100.0, -100.0), &scene, &Material::default());
//! engine.framebuffer().save("cube.png")?;
//! ```

pub mod colors;
pub mod engine;
pub mod light;
pub mod math;
pub mod model;
pub mod projection;
pub mod render;
pub mod scene;
pub mod texture;
pub mod transform;
pub mod vertex;
pub mod window;

pub use engine::{Engine, FrameStats, Material};
pub use model::{LoadError, Model};
pub use render::{FrameBuffer, ShadingMode};
pub use scene::Scene;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use scanshade::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colors::{self, Rgb};

    // Engine
    pub use crate::engine::{Engine, FrameStats, Material};

    // Scene
    pub use crate::light::DirectionalLight;
    pub use crate::scene::Scene;

    // Assets
    pub use crate::model::{Face, Model};
    pub use crate::texture::{Filter, Texture};

    // Placement
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::{Transform3D, Vec2, Vec3};

    // Rendering
    pub use crate::render::{
        FragmentShader, FrameBuffer, LitColorShader, ScanlineRasterizer, ShadingMode,
        TextureLitShader, VertexColorShader,
    };
    pub use crate::vertex::Vertex;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::shader::{face_normal, is_back_facing, VertexShader};
    pub use crate::render::{FrameBuffer, ScanlineRasterizer, VertexColorShader};
}
