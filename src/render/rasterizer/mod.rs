//! Triangle rasterization.
//!
//! [`ScanlineRasterizer`] turns shaded screen-space triangles into pixels:
//! it decomposes each triangle into flat-top/flat-bottom halves, walks their
//! rows, and hands every covered interpolated [`Vertex`](crate::vertex::Vertex)
//! to a [`FragmentShader`](crate::render::shader::FragmentShader) after the
//! depth test.

mod scanline;

pub use scanline::ScanlineRasterizer;
