//! Decoded sprite and tile assets, and where they come from.
//!
//! Decoding the game's archive formats is out of scope; everything here works
//! on already-decoded frames of palette indices.

mod cache;
mod shp;
mod tmp;

pub use cache::{AssetCache, AssetSource, MemoryAssets};
pub use shp::{ShpFile, ShpImage};
pub use tmp::{TileImage, TmpFile};
