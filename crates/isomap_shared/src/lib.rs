//! # ISOMAP Shared
//!
//! Common value types used by every layer of the renderer.
//!
//! ## CRITICAL RULE
//!
//! This crate holds plain data only. Anything that reads rules, opens assets
//! or touches a canvas belongs in `isomap_engine`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod geometry;
pub mod types;

pub use color::{Palette, Rgb, PALETTE_SIZE};
pub use geometry::{Point, Rect, Size};
pub use types::{CollectionType, EngineType, LightingType, PaletteType, TheaterType};
