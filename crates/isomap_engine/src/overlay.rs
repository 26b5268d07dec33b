//! Special overlay kinds, recognised by overlay index or name.
//!
//! Overlay types are numbered by their position in `[OverlayTypes]`, and the
//! engines hard-code some ranges: resource fields grow in stages driven by
//! the overlay value, bridges are drawn lifted above the water.

use isomap_shared::EngineType;

/// Resource kind of an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayTibType {
    /// Not a resource overlay.
    NotSpecial,
    /// TS green tiberium.
    Riparius,
    /// TS blue tiberium.
    Cruentus,
    /// Third tiberium strain.
    Vinifera,
    /// Fourth tiberium strain.
    Aboreus,
    /// RA2 ore.
    Ore,
    /// RA2 gems.
    Gems,
}

impl OverlayTibType {
    /// True unless [`OverlayTibType::NotSpecial`].
    #[must_use]
    pub const fn is_special(self) -> bool {
        !matches!(self, Self::NotSpecial)
    }
}

/// Resource kind of overlay `index` on `engine`.
#[must_use]
pub const fn tib_type(index: usize, engine: EngineType) -> OverlayTibType {
    let ra2 = !engine.is_ts_family();
    match index {
        102..=121 if ra2 => OverlayTibType::Ore,
        102..=121 => OverlayTibType::Riparius,
        27..=38 if ra2 => OverlayTibType::Gems,
        27..=38 => OverlayTibType::Cruentus,
        127..=146 => OverlayTibType::Vinifera,
        147..=166 => OverlayTibType::Aboreus,
        _ => OverlayTibType::NotSpecial,
    }
}

/// High bridge pieces, both directions.
#[must_use]
pub const fn is_high_bridge(index: usize) -> bool {
    matches!(index, 24 | 25 | 237 | 238)
}

/// Tiberian Sun elevated rail bridges.
#[must_use]
pub const fn is_ts_rail_bridge(index: usize) -> bool {
    matches!(index, 59 | 60)
}

/// Low bridges are only recognisable by name.
#[must_use]
pub fn is_low_bridge(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    upper.contains("LOBRDG") || upper.contains("LOBRDB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tib_ranges() {
        assert_eq!(tib_type(102, EngineType::TiberianSun), OverlayTibType::Riparius);
        assert_eq!(tib_type(121, EngineType::RedAlert2), OverlayTibType::Ore);
        assert_eq!(tib_type(30, EngineType::YurisRevenge), OverlayTibType::Gems);
        assert_eq!(tib_type(30, EngineType::Firestorm), OverlayTibType::Cruentus);
        assert_eq!(tib_type(150, EngineType::Firestorm), OverlayTibType::Aboreus);
        assert_eq!(tib_type(122, EngineType::RedAlert2), OverlayTibType::NotSpecial);
        assert!(!tib_type(0, EngineType::RedAlert2).is_special());
    }

    #[test]
    fn test_bridges() {
        assert!(is_high_bridge(24));
        assert!(is_high_bridge(238));
        assert!(!is_high_bridge(59));
        assert!(is_ts_rail_bridge(60));
        assert!(is_low_bridge("lobrdg01"));
        assert!(is_low_bridge("LOBRDB05"));
        assert!(!is_low_bridge("BRIDGE1"));
    }
}
