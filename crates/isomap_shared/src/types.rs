//! Enumerations shared by the rules layer and the renderer.

use serde::{Deserialize, Serialize};

/// Game engine revision. Ordered: later engines compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineType {
    /// Tiberian Sun
    #[serde(alias = "ts")]
    TiberianSun,
    /// Tiberian Sun: Firestorm
    #[serde(alias = "fs")]
    Firestorm,
    /// Red Alert 2
    #[serde(alias = "ra2")]
    RedAlert2,
    /// Red Alert 2: Yuri's Revenge
    #[serde(alias = "yr")]
    YurisRevenge,
}

impl EngineType {
    /// Width in pixels of one isometric cell.
    #[must_use]
    pub const fn tile_width(self) -> i32 {
        match self {
            Self::TiberianSun | Self::Firestorm => 48,
            Self::RedAlert2 | Self::YurisRevenge => 60,
        }
    }

    /// Height in pixels of one isometric cell.
    #[must_use]
    pub const fn tile_height(self) -> i32 {
        self.tile_width() / 2
    }

    /// True for the Tiberian Sun family.
    #[must_use]
    pub const fn is_ts_family(self) -> bool {
        matches!(self, Self::TiberianSun | Self::Firestorm)
    }
}

/// Object category. Selects the drawable variant and its defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionType {
    /// Aircraft
    Aircraft,
    /// Buildings
    Building,
    /// Infantry
    Infantry,
    /// Overlay (walls, ore, bridges...)
    Overlay,
    /// Smudges (craters, scorch marks)
    Smudge,
    /// Terrain objects (trees, rocks)
    Terrain,
    /// Vehicles
    Vehicle,
    /// Animations
    Animation,
}

impl CollectionType {
    /// Every category, in load order.
    pub const ALL: [Self; 8] = [
        Self::Aircraft,
        Self::Building,
        Self::Infantry,
        Self::Overlay,
        Self::Smudge,
        Self::Terrain,
        Self::Vehicle,
        Self::Animation,
    ];
}

/// Climate variant of the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TheaterType {
    /// Temperate
    Temperate,
    /// Snow / arctic
    Snow,
    /// Urban
    Urban,
    /// New urban (Yuri's Revenge)
    NewUrban,
    /// Desert (Yuri's Revenge)
    Desert,
    /// Lunar (Yuri's Revenge)
    Lunar,
}

impl TheaterType {
    /// Character substituted into the second letter of new-theater filenames.
    #[must_use]
    pub const fn new_theater_char(self) -> char {
        match self {
            Self::Temperate => 'T',
            Self::Snow => 'A',
            Self::Urban => 'U',
            Self::NewUrban => 'N',
            Self::Desert => 'D',
            Self::Lunar => 'L',
        }
    }

    /// File extension of theater-specific images, including the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Temperate => ".tem",
            Self::Snow => ".sno",
            Self::Urban => ".urb",
            Self::NewUrban => ".ubn",
            Self::Desert => ".des",
            Self::Lunar => ".lun",
        }
    }
}

/// Which palette a sprite is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteType {
    /// Sentinel: keep whatever the object already resolved to.
    #[default]
    Default,
    /// Isometric (terrain) palette
    Iso,
    /// Unit palette
    Unit,
    /// Overlay palette
    Overlay,
    /// Animation palette
    Anim,
    /// A named palette file
    Custom,
}

/// How map lighting is applied to a sprite's palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingType {
    /// Sentinel: keep whatever the object already resolved to.
    #[default]
    Default,
    /// No special lighting (default for ore/gems)
    None,
    /// Global map lighting only
    Global,
    /// Global plus z-level adjustments
    Level,
    /// Level plus the ambient color of lamps
    Ambient,
    /// Full lighting, including lamp tints
    Full,
}
