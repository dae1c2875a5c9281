//! Scanline-based triangle rasterization.
//!
//! Triangles are scan-converted one horizontal row at a time after being
//! decomposed into flat-top and flat-bottom pieces:
//!
//! ```text
//!        top                  top
//!        /\                   /\
//!       /  \                 /  \
//!      /    \       =>  mid /----\ split
//!  mid \     \              \     \
//!       \     \              \     \
//!        \_____\              \_____\
//!           bottom               bottom
//!
//!   General triangle      Flat-bottom (upper) + Flat-top (lower)
//! ```
//!
//! The split vertex is a full [`Vertex::lerp`] between `top` and `bottom`
//! with its `y` pinned to the middle vertex, so both halves are flat by
//! construction and the decomposition never recurses more than once.
//!
//! # Flat fill
//!
//! Every attribute is interpolated by plain linear interpolation: first
//! along the two legs from the anchor (one step per pixel row), then across
//! the row between the two leg points (one step per pixel column). This is
//! not perspective-correct.
//!
//! # Pixel snapping
//!
//! All decisions are taken on rounded coordinates: vertices are ordered by
//! `(round(y), round(x))`, flatness compares rounded rows, and each
//! interpolated vertex is written to the pixel its rounded position falls
//! in.

use crate::render::framebuffer::FrameBuffer;
use crate::render::shader::FragmentShader;
use crate::vertex::Vertex;

/// Extra steps kept on each side when clipping loops to the screen, covering
/// the rounding drift between a step index and the pixel it lands on.
const CLIP_MARGIN: i64 = 2;

/// Bound on snapped coordinates so step arithmetic stays far from `i64`
/// overflow. Anything beyond it is off-screen anyway.
const COORD_LIMIT: f32 = i32::MAX as f32;

#[inline]
fn snap(value: f32) -> i64 {
    value.round().clamp(-COORD_LIMIT, COORD_LIMIT) as i64
}

#[inline]
fn row(v: &Vertex) -> i64 {
    snap(v.coordinate.y)
}

#[inline]
fn column(v: &Vertex) -> i64 {
    snap(v.coordinate.x)
}

/// Steps `s` in `first..=last` whose pixel `origin + direction * s` can land
/// inside `0..limit`.
fn visible_steps(
    origin: i64,
    direction: i64,
    first: i64,
    last: i64,
    limit: i64,
) -> std::ops::RangeInclusive<i64> {
    let (low, high) = if direction >= 0 {
        (-CLIP_MARGIN - origin, limit - 1 + CLIP_MARGIN - origin)
    } else {
        (origin - (limit - 1 + CLIP_MARGIN), origin + CLIP_MARGIN)
    };
    low.max(first)..=high.min(last)
}

/// Scanline triangle rasterizer with per-pixel depth testing.
///
/// Stateless: the target buffer and the fragment shader are passed per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Rasterizes a screen-space triangle into `buffer`.
    ///
    /// Vertex order does not matter. Triangles entirely outside the buffer,
    /// or with any non-finite `x`/`y`, are discarded before any other work.
    pub fn draw_triangle<S>(&self, triangle: &[Vertex; 3], shader: &S, buffer: &mut FrameBuffer)
    where
        S: FragmentShader + ?Sized,
    {
        if !Self::overlaps(triangle, buffer) {
            return;
        }

        let mut sorted = *triangle;
        sorted.sort_by(|a, b| {
            (row(a), column(a))
                .cmp(&(row(b), column(b)))
                .then(a.coordinate.y.total_cmp(&b.coordinate.y))
                .then(a.coordinate.x.total_cmp(&b.coordinate.x))
        });
        let [top, mid, bottom] = sorted;

        if row(&top) == row(&mid) {
            // Flat top: anchored at the bottom vertex.
            self.fill_flat(&bottom, &top, &mid, shader, buffer);
        } else if row(&mid) == row(&bottom) {
            // Flat bottom: anchored at the top vertex.
            self.fill_flat(&top, &mid, &bottom, shader, buffer);
        } else {
            let height = bottom.coordinate.y - top.coordinate.y;
            let t = (mid.coordinate.y - top.coordinate.y) / height;
            if !t.is_finite() {
                return;
            }

            let mut split = top.lerp(&bottom, t);
            split.coordinate.y = mid.coordinate.y;

            self.draw_triangle(&[split, mid, top], shader, buffer);
            self.draw_triangle(&[split, mid, bottom], shader, buffer);
        }
    }

    /// Cheap rejection of triangles that cannot touch any pixel.
    fn overlaps(triangle: &[Vertex; 3], buffer: &FrameBuffer) -> bool {
        if triangle
            .iter()
            .any(|v| !v.coordinate.x.is_finite() || !v.coordinate.y.is_finite())
        {
            return false;
        }

        let xs = triangle.map(|v| v.coordinate.x.round());
        let ys = triangle.map(|v| v.coordinate.y.round());
        let left = xs[0].min(xs[1]).min(xs[2]);
        let right = xs[0].max(xs[1]).max(xs[2]);
        let top = ys[0].min(ys[1]).min(ys[2]);
        let bottom = ys[0].max(ys[1]).max(ys[2]);

        !(right < 0.0
            || bottom < 0.0
            || left >= buffer.width() as f32
            || top >= buffer.height() as f32)
    }

    /// Fills a triangle whose two legs share a pixel row.
    ///
    /// Rows are walked from the anchor toward the legs; the anchor itself is
    /// the first pixel written.
    fn fill_flat<S>(
        &self,
        anchor: &Vertex,
        left_leg: &Vertex,
        right_leg: &Vertex,
        shader: &S,
        buffer: &mut FrameBuffer,
    ) where
        S: FragmentShader + ?Sized,
    {
        let height = (row(anchor) - row(left_leg)).abs();
        let direction = if row(left_leg) >= row(anchor) { 1 } else { -1 };

        Self::plot(anchor, shader, buffer);

        let rows = visible_steps(row(anchor), direction, 1, height, buffer.height() as i64);
        for y_step in rows {
            let t = y_step as f32 / height as f32;
            let mut left = anchor.lerp(left_leg, t);
            let mut right = anchor.lerp(right_leg, t);

            let (left_row, right_row) = (row(&left), row(&right));
            if left_row.max(right_row) < 0 || left_row.min(right_row) >= buffer.height() as i64 {
                continue;
            }

            let mut width = column(&right) - column(&left);
            if width < 0 {
                std::mem::swap(&mut left, &mut right);
                width = -width;
            }
            if width == 0 {
                continue;
            }

            let columns = visible_steps(column(&left), 1, 0, width, buffer.width() as i64);
            for x_step in columns {
                let tx = x_step as f32 / width as f32;
                Self::plot(&left.lerp(&right, tx), shader, buffer);
            }
        }
    }

    /// Depth-tests and shades one interpolated vertex.
    #[inline]
    fn plot<S>(vertex: &Vertex, shader: &S, buffer: &mut FrameBuffer)
    where
        S: FragmentShader + ?Sized,
    {
        let x = vertex.coordinate.x.round() as i32;
        let y = vertex.coordinate.y.round() as i32;
        if buffer.test_and_set_depth(x, y, vertex.coordinate.z) {
            buffer.set_pixel(x, y, shader.shade(vertex));
        }
    }
}
