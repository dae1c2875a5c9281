//! 24-bit RGB color and the packed ARGB8888 format used by the framebuffer.

use std::ops::{Add, Mul};

/// A color with three 8-bit channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);

/// Default clear color for the viewer.
pub const BACKGROUND: Rgb = Rgb::new(0x1E, 0x1E, 0x1E);

#[inline]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation between two colors, exact at `t == 0` and `t == 1`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let channel = |a: u8, b: u8| to_channel(crate::math::lerp(a as f32, b as f32, t));
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    /// Scales every channel, clamping to the representable range.
    pub fn scale(self, factor: f32) -> Rgb {
        Rgb::new(
            to_channel(self.r as f32 * factor),
            to_channel(self.g as f32 * factor),
            to_channel(self.b as f32 * factor),
        )
    }

    /// Channel-wise multiplication with `other` normalized to [0, 1].
    ///
    /// Used to combine light intensity with surface (texture) color.
    pub fn multiply(self, other: Rgb) -> Rgb {
        let channel = |a: u8, b: u8| to_channel(a as f32 * (b as f32 / 255.0));
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    /// Packs into ARGB8888 with opaque alpha.
    #[inline]
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Unpacks from ARGB8888, ignoring alpha.
    #[inline]
    pub fn from_argb(argb: u32) -> Rgb {
        Rgb::new((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }
}

/// Saturating channel-wise addition, used to accumulate light.
impl Add<Rgb> for Rgb {
    type Output = Rgb;

    fn add(self, rhs: Rgb) -> Self::Output {
        Rgb::new(
            self.r.saturating_add(rhs.r),
            self.g.saturating_add(rhs.g),
            self.b.saturating_add(rhs.b),
        )
    }
}

impl Mul<f32> for Rgb {
    type Output = Rgb;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}
