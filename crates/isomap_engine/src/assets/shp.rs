//! Sprite (SHP) assets.
//!
//! A sprite file is a frame table sharing one nominal canvas size. Each frame
//! stores only its opaque bounding box, positioned by `(x, y)` inside that
//! canvas. For shadow-casting objects the second half of the table holds the
//! shadow silhouettes of the first half.

/// One decoded frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShpImage {
    /// Left edge inside the file canvas.
    pub x: i32,
    /// Top edge inside the file canvas.
    pub y: i32,
    /// Frame width.
    pub width: i32,
    /// Frame height.
    pub height: i32,
    /// Row-major palette indices.
    pub pixels: Vec<u8>,
}

impl ShpImage {
    /// Creates a frame.
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32, pixels: Vec<u8>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            pixels,
        }
    }

    /// Pixel data, or `None` when the frame is empty or its length does not
    /// match `width * height`.
    #[must_use]
    pub fn pixel_data(&self) -> Option<&[u8]> {
        if self.width <= 0 || self.height <= 0 {
            return None;
        }
        let expected = self.width as usize * self.height as usize;
        (self.pixels.len() == expected).then_some(self.pixels.as_slice())
    }
}

/// A decoded sprite file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShpFile {
    /// File name, used in logs.
    pub name: String,
    /// Nominal canvas width shared by all frames.
    pub width: i32,
    /// Nominal canvas height shared by all frames.
    pub height: i32,
    /// Frame table.
    pub images: Vec<ShpImage>,
}

impl ShpFile {
    /// Creates a sprite file.
    #[must_use]
    pub fn new(name: impl Into<String>, width: i32, height: i32, images: Vec<ShpImage>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            images,
        }
    }

    /// Number of frames.
    #[inline]
    #[must_use]
    pub fn num_images(&self) -> usize {
        self.images.len()
    }

    /// Frame by index.
    #[must_use]
    pub fn image(&self, index: usize) -> Option<&ShpImage> {
        self.images.get(index)
    }
}
