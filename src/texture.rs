use std::fmt;
use std::path::Path;

use crate::colors::Rgb;

/// Texture filtering used when sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Point sampling: the texel containing the coordinate.
    #[default]
    Nearest,
    /// Blend of the four nearest texels.
    Bilinear,
}

#[derive(Debug)]
pub enum TextureError {
    Image(image::ImageError),
    /// Pixel count does not match `width * height`, or a dimension is zero.
    Dimensions {
        width: u32,
        height: u32,
        pixels: usize,
    },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Image(e) => write!(f, "Image error: {}", e),
            TextureError::Dimensions {
                width,
                height,
                pixels,
            } => write!(
                f,
                "Invalid texture dimensions {}x{} for {} pixels",
                width, height, pixels
            ),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Image(e) => Some(e),
            TextureError::Dimensions { .. } => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::Image(e)
    }
}

/// Represents a 2D texture for texture mapping.
///
/// Texels are stored row by row starting at the top-left corner. `(u, v)` of
/// `(0, 0)` addresses the top-left texel and `(1, 1)` the bottom-right one.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    data: Vec<Rgb>,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn new(width: u32, height: u32, data: Vec<Rgb>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 || data.len() != (width as usize) * (height as usize) {
            return Err(TextureError::Dimensions {
                width,
                height,
                pixels: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A texture filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgb) -> Result<Self, TextureError> {
        Self::new(width, height, vec![color; (width as usize) * (height as usize)])
    }

    pub fn from_image(image: &image::RgbImage) -> Result<Self, TextureError> {
        let (width, height) = image.dimensions();
        let data = image
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                Rgb::new(r, g, b)
            })
            .collect();
        Self::new(width, height, data)
    }

    /// Load a texture from an image file (BMP, PNG, JPG, ...).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgb8();
        let texture = Self::from_image(&image)?;
        log::info!(
            "Loaded texture {} ({}x{})",
            path.display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// Coordinates outside [0, 1] are saturated to the border texel rather
    /// than wrapped.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> Rgb {
        // Float-to-int casts saturate (NaN becomes 0), so the clamp below
        // always yields an in-range index.
        let x = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1);
        let y = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1);
        self.texel(x as u32, y as u32)
    }

    /// Bilinear sample with half-texel offset; border texels are repeated.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> Rgb {
        let fx = (u * self.width as f32 - 0.5).clamp(0.0, (self.width - 1) as f32);
        let fy = (v * self.height as f32 - 0.5).clamp(0.0, (self.height - 1) as f32);
        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let top = self.texel(x0, y0).lerp(self.texel(x1, y0), tx);
        let bottom = self.texel(x0, y1).lerp(self.texel(x1, y1), tx);
        top.lerp(bottom, ty)
    }

    pub fn sample_with(&self, u: f32, v: f32, filter: Filter) -> Rgb {
        match filter {
            Filter::Nearest => self.sample(u, v),
            Filter::Bilinear => self.sample_bilinear(u, v),
        }
    }

    #[inline]
    fn texel(&self, x: u32, y: u32) -> Rgb {
        self.data[(y * self.width + x) as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
