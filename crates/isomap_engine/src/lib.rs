//! # ISOMAP Engine
//!
//! Software compositor for isometric strategy-game maps.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        LOAD (once)                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  rules/art sections → ObjectCollection → Drawable + props    │
//! │        defaults → rules → image lookup → fix-ups → overrides │
//! ├──────────────────────────────────────────────────────────────┤
//! │                      RENDER (one pass)                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  sorted objects → Drawable → FrameDecider → Compositor       │
//! │                                   ↓                          │
//! │              Canvas: pixels + z + height + shadow            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## RULES
//!
//! - One writer per canvas; the caller sorts objects back to front
//! - Configuration errors surface at load time
//! - Drawing never fails: missing images and bad frames are skipped

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod assets;
pub mod canvas;
pub mod collection;
pub mod compositor;
pub mod config;
pub mod defaults;
pub mod drawable;
pub mod error;
pub mod frame;
pub mod object;
pub mod overlay;
pub mod props;
pub mod render;
pub mod rules;
pub mod theater;

pub use assets::{AssetCache, AssetSource, MemoryAssets, ShpFile, ShpImage, TileImage, TmpFile};
pub use canvas::{Canvas, HEIGHT_EMPTY, Z_EMPTY};
pub use collection::{LoadContext, ObjectCollection, TileSet};
pub use compositor::{BuildingZ, Compositor, SpriteShape, Translucency};
pub use config::{ObjectOverride, RenderConfig};
pub use drawable::{Drawable, DrawableAsset, DrawableKind};
pub use error::{EngineError, EngineResult};
pub use frame::{DecidedFrame, FrameDecider, ReadySequence};
pub use object::{DrawableId, GameObject, ObjectState, TileCoord};
pub use props::{DrawProperties, OffsetHack};
pub use render::{render, RenderStats, Scene};
pub use rules::{IniFile, IniSection};
