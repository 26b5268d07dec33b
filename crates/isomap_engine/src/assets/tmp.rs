//! Tile (TMP) assets: one image per sub-tile of a tile set entry.

/// One decoded sub-tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileImage {
    /// Horizontal offset from the cell's projected position.
    pub x: i32,
    /// Vertical offset from the cell's projected position.
    pub y: i32,
    /// Image width.
    pub width: i32,
    /// Image height.
    pub height: i32,
    /// Row-major palette indices.
    pub pixels: Vec<u8>,
}

impl TileImage {
    /// Pixel data, or `None` when malformed.
    #[must_use]
    pub fn pixel_data(&self) -> Option<&[u8]> {
        if self.width <= 0 || self.height <= 0 {
            return None;
        }
        let expected = self.width as usize * self.height as usize;
        (self.pixels.len() == expected).then_some(self.pixels.as_slice())
    }
}

/// A decoded tile file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TmpFile {
    /// File name, used in logs.
    pub name: String,
    /// Sub-tile images.
    pub images: Vec<TileImage>,
}

impl TmpFile {
    /// Sub-tile image, falling back to the first one when `sub_tile` does not
    /// exist in this file.
    #[must_use]
    pub fn image(&self, sub_tile: usize) -> Option<&TileImage> {
        self.images.get(sub_tile).or_else(|| self.images.first())
    }
}
