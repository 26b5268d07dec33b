//! The render target.
//!
//! One RGB pixel plane plus three parallel planes of the same extent:
//!
//! ```text
//! pixels   Rgb    final color
//! z        i16    depth of the last winning write, higher-or-equal wins
//! height   i16    elevation (pixels) of the last winning write, for shadows
//! shadow   bool   already darkened by a shadow this pass
//! ```
//!
//! Every per-pixel access goes through [`Canvas::index`], the only place that
//! turns signed screen coordinates into a buffer offset. Out-of-canvas
//! coordinates yield `None` and the caller skips that pixel.

use isomap_shared::{Point, Rgb};

/// Z-buffer value of a pixel nothing has been drawn to.
pub const Z_EMPTY: i16 = i16::MIN;

/// Height-buffer value of a pixel nothing has been drawn to.
pub const HEIGHT_EMPTY: i16 = i16::MIN;

/// Mutable view of one canvas position across all planes.
#[derive(Debug)]
pub struct CellMut<'a> {
    /// Color.
    pub pixel: &'a mut Rgb,
    /// Depth.
    pub z: &'a mut i16,
    /// Elevation of the winning write.
    pub height: &'a mut i16,
    /// Shadow mask bit.
    pub shadow: &'a mut bool,
}

/// Pixel buffer with depth, height and shadow planes.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    z: Vec<i16>,
    heights: Vec<i16>,
    shadows: Vec<bool>,
}

impl Canvas {
    /// Creates a black canvas with every plane at its empty sentinel.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; len],
            z: vec![Z_EMPTY; len],
            heights: vec![HEIGHT_EMPTY; len],
            shadows: vec![false; len],
        }
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns every plane to its initial state.
    pub fn reset(&mut self) {
        self.pixels.fill(Rgb::BLACK);
        self.z.fill(Z_EMPTY);
        self.heights.fill(HEIGHT_EMPTY);
        self.shadows.fill(false);
    }

    /// Buffer offset of `(x, y)`, or `None` outside the canvas.
    #[inline]
    #[must_use]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Mutable access to all planes at `p`.
    #[inline]
    pub fn cell_mut(&mut self, p: Point) -> Option<CellMut<'_>> {
        let i = self.index(p.x, p.y)?;
        Some(CellMut {
            pixel: &mut self.pixels[i],
            z: &mut self.z[i],
            height: &mut self.heights[i],
            shadow: &mut self.shadows[i],
        })
    }

    /// Color at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Depth at `(x, y)`.
    #[must_use]
    pub fn z_at(&self, x: i32, y: i32) -> Option<i16> {
        self.index(x, y).map(|i| self.z[i])
    }

    /// Stored elevation at `(x, y)`.
    #[must_use]
    pub fn height_at(&self, x: i32, y: i32) -> Option<i16> {
        self.index(x, y).map(|i| self.heights[i])
    }

    /// Shadow mask bit at `(x, y)`.
    #[must_use]
    pub fn is_shadowed(&self, x: i32, y: i32) -> Option<bool> {
        self.index(x, y).map(|i| self.shadows[i])
    }

    /// Sets a pixel color directly, bypassing depth. For backgrounds and
    /// test setup.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Color plane, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Color plane as packed RGB bytes, 3 per pixel.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
