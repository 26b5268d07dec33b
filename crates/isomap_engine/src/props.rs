//! Resolved draw parameters of a drawable.

use std::sync::Arc;

use isomap_shared::{LightingType, Palette, PaletteType, Point};

use crate::frame::FrameDecider;
use crate::object::GameObject;

/// Elevation levels between a high bridge's deck and the ground below it.
pub const BRIDGE_LEVELS: i32 = 4;

/// Per-object offset corrections for sprites whose art is not anchored the
/// way the rasterizer expects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OffsetHack {
    /// No correction.
    #[default]
    None,
    /// RA2 high bridge deck: nudged up one pixel.
    Ra2Bridge,
    /// RA2 high bridge shadow: cast onto the ground under the deck.
    Ra2BridgeShadow,
    /// TS high bridge deck.
    TsBridge,
    /// TS high bridge shadow: cast onto the ground under the deck.
    TsBridgeShadow,
}

impl OffsetHack {
    /// Extra pixel offset.
    #[must_use]
    pub const fn offset(self, tile_height: i32) -> Point {
        let drop = BRIDGE_LEVELS * tile_height / 2;
        match self {
            Self::None | Self::TsBridge => Point::ZERO,
            Self::Ra2Bridge => Point::new(0, -1),
            Self::Ra2BridgeShadow => Point::new(0, drop - 1),
            Self::TsBridgeShadow => Point::new(0, drop),
        }
    }
}

/// Rendering parameters resolved once from rules and art.
///
/// Owned by exactly one drawable. Cloning a drawable clones this too; the
/// palette override is shared read-only.
#[derive(Clone, Debug, Default)]
pub struct DrawProperties {
    /// Palette selection mode.
    pub palette_type: PaletteType,
    /// Palette file when `palette_type` is `Custom`.
    pub custom_palette_name: Option<String>,
    /// Lighting mode.
    pub lighting_type: LightingType,
    /// Pixel offset applied to primary and shadow draws.
    pub offset: Point,
    /// Extra correction for the primary draw.
    pub offset_hack: OffsetHack,
    /// Extra correction for the shadow draw.
    pub shadow_offset_hack: OffsetHack,
    /// Frame selection strategy.
    pub frame_decider: FrameDecider,
    /// Added to every depth value this drawable writes.
    pub z_adjust: i32,
    /// Palette used instead of the object's own.
    pub palette_override: Option<Arc<Palette>>,
    /// Casts a shadow.
    pub has_shadow: bool,
    /// Drawn translucent, without shadow.
    pub cloakable: bool,
    /// Translucency percentage of the primary draw.
    pub translucency: u8,
}

impl DrawProperties {
    /// Offset of the primary draw.
    #[must_use]
    pub fn primary_offset(&self, tile_height: i32) -> Point {
        self.offset + self.offset_hack.offset(tile_height)
    }

    /// Offset of the shadow draw.
    #[must_use]
    pub fn shadow_offset(&self, tile_height: i32) -> Point {
        self.offset + self.shadow_offset_hack.offset(tile_height)
    }

    /// The palette to draw `obj` with.
    #[must_use]
    pub fn palette<'a>(&'a self, obj: &'a GameObject) -> &'a Palette {
        self.palette_override.as_deref().unwrap_or(&obj.palette)
    }
}
