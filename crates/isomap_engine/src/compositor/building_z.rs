//! Building-Z: the depth correction map for building sprites.
//!
//! The game ships one greyscale frame whose pixel values say how far "into"
//! the screen each point of a building footprint lies. Upright building
//! pixels take their depth from it instead of from the sprite height, which
//! lets units walk correctly in front of and behind building silhouettes.

use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::assets::{AssetCache, ShpImage};

/// Candidate file names, tried in order. Yuri's Revenge ships `.sha`.
pub const BUILDING_Z_FILES: [&str; 2] = ["buildngz.shp", "buildngz.sha"];

/// Lazily loaded, process-wide Building-Z frame.
///
/// Loaded at most once; read-only afterwards and safe to share between
/// renders behind an `Arc`.
#[derive(Debug)]
pub struct BuildingZ {
    assets: Option<AssetCache>,
    image: OnceLock<Option<ShpImage>>,
}

impl BuildingZ {
    /// Loads from `assets` on first use.
    #[must_use]
    pub fn new(assets: AssetCache) -> Self {
        Self {
            assets: Some(assets),
            image: OnceLock::new(),
        }
    }

    /// Uses an already decoded frame.
    #[must_use]
    pub fn from_image(image: ShpImage) -> Self {
        Self {
            assets: None,
            image: OnceLock::from(Some(image)),
        }
    }

    /// A map that never corrects anything.
    #[must_use]
    pub fn missing() -> Self {
        Self {
            assets: None,
            image: OnceLock::from(None),
        }
    }

    /// The correction frame, loading it if needed.
    pub fn image(&self) -> Option<&ShpImage> {
        self.image.get_or_init(|| self.load()).as_ref()
    }

    fn load(&self) -> Option<ShpImage> {
        let assets = self.assets.as_ref()?;
        for name in BUILDING_Z_FILES {
            if let Some(image) = assets.shp(name).and_then(|shp| shp.image(0).cloned()) {
                debug!("Building-Z loaded from {}", name);
                return Some(image);
            }
        }
        warn!("No Building-Z asset found, building depth falls back to sprite height");
        None
    }

    /// Depth correction for pixel `(x, y)` of a building frame, or `None`
    /// when no map is available or the position falls outside it.
    pub fn sample(&self, x: i32, y: i32, shp_height: i32, foundation_width: i32, tile_height: i32) -> Option<u8> {
        let image = self.image()?;
        let data = image.pixel_data()?;
        let (zx, zy) = sample_position(image.width, image.height, x, y, shp_height, foundation_width, tile_height);
        if zx < 0 || zx >= image.width || zy >= image.height {
            return None;
        }
        data.get((zy * image.width + zx) as usize).copied()
    }
}

/// Position inside the Building-Z map for sprite pixel `(x, y)`.
///
/// `x` is centered on the map and shifted by the foundation width; `y` is
/// aligned so the bottom of the sprite meets the bottom of the map. Sprites
/// taller than the map would index above it; those rows read row 1.
#[must_use]
pub const fn sample_position(
    z_width: i32,
    z_height: i32,
    x: i32,
    y: i32,
    shp_height: i32,
    foundation_width: i32,
    tile_height: i32,
) -> (i32, i32) {
    let zx = x + z_width / 2 + foundation_width * tile_height / 2;
    let mut zy = y + z_height - shp_height;
    if zy < 0 {
        zy = 1;
    }
    (zx, zy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{MemoryAssets, ShpFile};

    fn gradient(width: i32, height: i32) -> ShpImage {
        let pixels = (0..width * height).map(|i| (i / width) as u8).collect();
        ShpImage::new(0, 0, width, height, pixels)
    }

    #[test]
    fn test_row_never_negative() {
        for shp_height in [0, 10, 100, 1000] {
            for y in 0..50 {
                let (_, zy) = sample_position(40, 20, 0, y, shp_height, 2, 30);
                assert!(zy >= 0, "row {zy} for sprite height {shp_height}");
            }
        }
        assert_eq!(sample_position(40, 20, 0, 0, 100, 0, 30), (20, 1));
    }

    #[test]
    fn test_sample_alignment() {
        let z = BuildingZ::from_image(gradient(40, 20));
        // bottom row of a 20-high sprite reads the bottom row of the map
        assert_eq!(z.sample(0, 19, 20, 0, 30), Some(19));
        // a 10-high sprite starts halfway down
        assert_eq!(z.sample(0, 0, 10, 0, 30), Some(10));
        // too tall: clamped to row 1
        assert_eq!(z.sample(0, 0, 500, 0, 30), Some(1));
        // pushed off the right edge by the foundation
        assert_eq!(z.sample(0, 0, 20, 3, 30), None);
    }

    #[test]
    fn test_missing_map() {
        assert_eq!(BuildingZ::missing().sample(0, 0, 1, 1, 30), None);
    }

    #[test]
    fn test_loads_sha_fallback() {
        let assets = MemoryAssets::new().with_shp(ShpFile::new("BUILDNGZ.SHA", 4, 2, vec![gradient(4, 2)]));
        let z = BuildingZ::new(AssetCache::new(assets));
        assert_eq!(z.image().map(|i| i.width), Some(4));
        // second call is served from the cell
        assert!(z.image().is_some());
    }
}
