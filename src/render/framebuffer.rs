//! Color and depth storage the rasterizer writes into.
//!
//! Pixels are packed ARGB8888 `u32`s stored row by row from the top-left
//! corner, so the byte stride of a row is `width * 4`. The optional depth
//! buffer has the same dimensions and holds `f32::INFINITY` wherever no
//! depth has been recorded since the last clear.

use std::path::Path;

use crate::colors::{self, Rgb};

/// Depth value meaning "nothing drawn here yet".
pub const NO_DEPTH: f32 = f32::INFINITY;

pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Option<Vec<f32>>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Creates a framebuffer with a depth buffer, cleared to the background color.
    pub fn new(width: u32, height: u32) -> Self {
        let mut buffer = Self::without_depth(width, height);
        buffer.depth_buffer = Some(vec![NO_DEPTH; buffer.color_buffer.len()]);
        buffer
    }

    /// Creates a framebuffer without depth testing: later writes always win.
    pub fn without_depth(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND.to_argb(); size],
            depth_buffer: None,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row of [`FrameBuffer::argb_bytes`].
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    pub fn has_depth(&self) -> bool {
        self.depth_buffer.is_some()
    }

    /// Fills every pixel with `color` and forgets all recorded depths.
    pub fn clear(&mut self, color: Rgb) {
        self.color_buffer.fill(color.to_argb());
        if let Some(depth) = self.depth_buffer.as_mut() {
            depth.fill(NO_DEPTH);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Writes a pixel without depth testing. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(index) = self.index(x, y) {
            self.color_buffer[index] = color.to_argb();
        }
    }

    /// Depth test for a candidate fragment at (x, y).
    ///
    /// Fails when the pixel is out of bounds or when a depth is recorded and
    /// `depth` is greater (farther). On success `depth` becomes the recorded
    /// value. Without a depth buffer every in-bounds fragment passes.
    #[inline]
    pub fn test_and_set_depth(&mut self, x: i32, y: i32, depth: f32) -> bool {
        let Some(index) = self.index(x, y) else {
            return false;
        };
        match self.depth_buffer.as_mut() {
            Some(buffer) => {
                if depth > buffer[index] {
                    return false;
                }
                buffer[index] = depth;
                true
            }
            None => true,
        }
    }

    /// The color at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y)
            .map(|index| Rgb::from_argb(self.color_buffer[index]))
    }

    /// The depth recorded at (x, y); `None` when nothing has been drawn there,
    /// when out of bounds, or when there is no depth buffer.
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        let index = self.index(x, y)?;
        let depth = self.depth_buffer.as_ref()?[index];
        (depth != NO_DEPTH).then_some(depth)
    }

    /// Packed ARGB8888 pixels, row-major from the top-left.
    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// The pixel buffer as native-endian bytes, ready to upload to an
    /// ARGB8888 streaming texture.
    pub fn argb_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8, and the
        // byte slice covers exactly the same allocation.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            let color = Rgb::from_argb(self.color_buffer[(y * self.width + x) as usize]);
            image::Rgb([color.r, color.g, color.b])
        })
    }

    /// Saves the pixels to an image file; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let path = path.as_ref();
        self.to_rgb_image().save(path)?;
        log::info!(
            "Saved {}x{} frame to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }

    /// Draws a line with Bresenham's algorithm, ignoring depth.
    ///
    /// The error term tracks the distance between the ideal line and the
    /// current pixel; each step advances along x, y, or both depending on
    /// which way the accumulated error leans.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };

        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }
}
