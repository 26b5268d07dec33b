//! Category defaults, applied to a drawable before its rules are read.
//!
//! Rules and art sections only mention what differs from the engine's
//! per-category behaviour; these hooks supply that behaviour.

use isomap_shared::{CollectionType, EngineType, LightingType, PaletteType, Point};

use crate::frame::FrameDecider;

/// Palette a category is drawn with unless its art says otherwise.
#[must_use]
pub const fn default_palette(collection: CollectionType, engine: EngineType) -> PaletteType {
    match collection {
        CollectionType::Aircraft
        | CollectionType::Building
        | CollectionType::Infantry
        | CollectionType::Vehicle => PaletteType::Unit,
        CollectionType::Overlay => PaletteType::Overlay,
        CollectionType::Smudge => PaletteType::Iso,
        // TS trees share the unit palette, RA2 moved them to the iso one
        CollectionType::Terrain if engine.is_ts_family() => PaletteType::Unit,
        CollectionType::Terrain => PaletteType::Iso,
        CollectionType::Animation => PaletteType::Anim,
    }
}

/// Lighting a category receives unless its rules say otherwise.
#[must_use]
pub const fn default_lighting(collection: CollectionType) -> LightingType {
    match collection {
        CollectionType::Aircraft
        | CollectionType::Building
        | CollectionType::Infantry
        | CollectionType::Vehicle
        | CollectionType::Animation => LightingType::Ambient,
        CollectionType::Overlay | CollectionType::Smudge | CollectionType::Terrain => LightingType::Full,
    }
}

/// Whether a category takes house colors.
#[must_use]
pub const fn default_remappability(collection: CollectionType, _engine: EngineType) -> bool {
    matches!(
        collection,
        CollectionType::Aircraft | CollectionType::Building | CollectionType::Infantry | CollectionType::Vehicle
    )
}

/// Frame decider before any rule-driven refinement.
#[must_use]
pub const fn default_frame_decider(collection: CollectionType) -> FrameDecider {
    match collection {
        CollectionType::Overlay => FrameDecider::OverlayValue,
        _ => FrameDecider::Null,
    }
}

/// Whether art without a `Shadow` key casts a shadow.
#[must_use]
pub const fn shadow_assumption(collection: CollectionType) -> bool {
    matches!(
        collection,
        CollectionType::Aircraft
            | CollectionType::Building
            | CollectionType::Infantry
            | CollectionType::Terrain
            | CollectionType::Vehicle
    )
}

/// Whether rules without a `DrawFlat` key lie on the ground.
#[must_use]
pub const fn flatness_assumption(collection: CollectionType) -> bool {
    matches!(collection, CollectionType::Overlay | CollectionType::Smudge)
}

/// Pixel offset every object of a category starts from.
///
/// Footprint-anchored categories sit at the cell's top corner, the others
/// at its center.
#[must_use]
pub const fn base_offset(collection: CollectionType, tile_width: i32, tile_height: i32) -> Point {
    match collection {
        CollectionType::Building | CollectionType::Overlay | CollectionType::Smudge => Point::new(tile_width / 2, 0),
        CollectionType::Aircraft
        | CollectionType::Infantry
        | CollectionType::Terrain
        | CollectionType::Vehicle
        | CollectionType::Animation => Point::new(tile_width / 2, tile_height / 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_palette_depends_on_engine() {
        assert_eq!(default_palette(CollectionType::Terrain, EngineType::TiberianSun), PaletteType::Unit);
        assert_eq!(default_palette(CollectionType::Terrain, EngineType::YurisRevenge), PaletteType::Iso);
        assert_eq!(default_palette(CollectionType::Overlay, EngineType::RedAlert2), PaletteType::Overlay);
    }

    #[test]
    fn test_assumptions() {
        assert!(shadow_assumption(CollectionType::Building));
        assert!(!shadow_assumption(CollectionType::Overlay));
        assert!(flatness_assumption(CollectionType::Smudge));
        assert!(!flatness_assumption(CollectionType::Vehicle));
        assert!(default_remappability(CollectionType::Infantry, EngineType::RedAlert2));
        assert!(!default_remappability(CollectionType::Terrain, EngineType::RedAlert2));
    }

    #[test]
    fn test_base_offsets() {
        assert_eq!(base_offset(CollectionType::Building, 60, 30), Point::new(30, 0));
        assert_eq!(base_offset(CollectionType::Infantry, 60, 30), Point::new(30, 15));
        assert_eq!(default_frame_decider(CollectionType::Overlay), FrameDecider::OverlayValue);
        assert_eq!(default_lighting(CollectionType::Smudge), LightingType::Full);
    }
}
