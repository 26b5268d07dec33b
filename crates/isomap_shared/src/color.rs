//! Paletted color.
//!
//! Every sprite pixel is an 8-bit palette index. Index 0 is always
//! transparent and never reaches the canvas; the palette only turns the
//! remaining 255 indices into RGB triples.

use bytemuck::{Pod, Zeroable};

/// Number of entries in a palette.
pub const PALETTE_SIZE: usize = 256;

/// A packed RGB triple, 3 bytes, no padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black, also the cleared canvas color.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a color.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey level with all three channels set to `v`.
    #[inline]
    #[must_use]
    pub const fn grey(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Applies `f` to each channel.
    #[inline]
    #[must_use]
    pub fn map(self, mut f: impl FnMut(u8) -> u8) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Combines two colors channel by channel.
    #[inline]
    #[must_use]
    pub fn zip(self, other: Self, mut f: impl FnMut(u8, u8) -> u8) -> Self {
        Self::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }
}

/// A 256-entry color table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    name: String,
    colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Creates a palette from a full color table.
    #[must_use]
    pub fn new(name: impl Into<String>, colors: [Rgb; PALETTE_SIZE]) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Creates a palette from raw 6-bit VGA triples (768 bytes), the layout
    /// shipped by the game. Missing trailing entries stay black.
    #[must_use]
    pub fn from_vga(name: impl Into<String>, data: &[u8]) -> Self {
        let mut colors = [Rgb::BLACK; PALETTE_SIZE];
        for (color, chunk) in colors.iter_mut().zip(data.chunks_exact(3)) {
            // 6-bit to 8-bit
            *color = Rgb::new(chunk[0] << 2, chunk[1] << 2, chunk[2] << 2);
        }
        Self::new(name, colors)
    }

    /// Palette name, usually the file it came from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a palette index.
    #[inline]
    #[must_use]
    pub const fn color(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    /// Replaces one entry.
    pub fn set(&mut self, index: u8, color: Rgb) {
        self.colors[index as usize] = color;
    }
}
