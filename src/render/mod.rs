//! Rendering pipeline internals: pixel storage, shading and scan conversion.

pub mod framebuffer;
pub mod rasterizer;
pub mod shader;

pub use framebuffer::FrameBuffer;
pub use rasterizer::ScanlineRasterizer;
pub use shader::{
    FragmentShader, LitColorShader, ShadingMode, TextureLitShader, VertexColorShader,
    VertexShader,
};
