//! Placed map objects, as the compositor sees them.
//!
//! The map grid owns the real objects; this is the read-only view the
//! renderer needs: where the object sits, which palette it uses, which
//! drawable resolves it and the bits of state frame deciders look at.

use std::sync::Arc;

use isomap_shared::{CollectionType, Palette, Point};

/// A cell in both map (`rx`, `ry`) and screen-diamond (`dx`, `dy`) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Map x.
    pub rx: i32,
    /// Map y.
    pub ry: i32,
    /// Diamond-grid column (half-cell units).
    pub dx: i32,
    /// Diamond-grid row (half-cell units).
    pub dy: i32,
    /// Elevation level.
    pub z: i32,
}

impl TileCoord {
    /// Creates a cell from map coordinates and elevation. The diamond
    /// position follows the isometric layout of a map `full_width` cells wide.
    #[must_use]
    pub const fn from_map(rx: i32, ry: i32, z: i32, full_width: i32) -> Self {
        Self {
            rx,
            ry,
            dx: rx - ry + full_width - 1,
            dy: rx + ry - full_width - 1,
            z,
        }
    }

    /// Screen position of the cell's top corner, elevation included.
    #[inline]
    #[must_use]
    pub const fn project(&self, tile_width: i32, tile_height: i32) -> Point {
        Point::new(
            self.dx * tile_width / 2,
            (self.dy - self.z) * tile_height / 2,
        )
    }

    /// Depth of the cell's diamond, in pixels.
    #[inline]
    #[must_use]
    pub const fn depth(&self, tile_height: i32) -> i32 {
        (self.rx + self.ry) * tile_height / 2
    }
}

/// Which drawable renders an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawableId {
    /// Entry `index` of the collection of that category.
    Object {
        /// Owning collection.
        collection: CollectionType,
        /// Index inside the collection.
        index: usize,
    },
    /// Tile set entry `index`.
    Tile {
        /// Index inside the tile set.
        index: usize,
    },
}

/// State frame deciders and drawables care about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ObjectState {
    /// Nothing beyond position.
    #[default]
    Plain,
    /// Overlay with its data byte (tiberium stage, wall connections...).
    Overlay {
        /// Overlay data value.
        value: u8,
    },
    /// Unit, infantry, aircraft or building owned by a house.
    Unit {
        /// Facing, 0-255 clockwise from north.
        direction: u8,
        /// Standing on a high bridge.
        on_bridge: bool,
    },
    /// Terrain tile.
    Tile {
        /// Sub-tile index inside the tile set entry.
        sub_tile: usize,
    },
}

/// A placed object.
#[derive(Clone, Debug)]
pub struct GameObject {
    /// Cell the object is placed on.
    pub tile: TileCoord,
    /// Top cell of the object's footprint.
    pub top_tile: TileCoord,
    /// Bottom cell of the object's footprint; drives depth.
    pub bottom_tile: TileCoord,
    /// Palette the object resolved to.
    pub palette: Arc<Palette>,
    /// Drawable back-reference.
    pub drawable: DrawableId,
    /// Deciders' view of the object.
    pub state: ObjectState,
}

impl GameObject {
    /// Creates a single-cell object.
    #[must_use]
    pub fn new(tile: TileCoord, palette: Arc<Palette>, drawable: DrawableId) -> Self {
        Self {
            tile,
            top_tile: tile,
            bottom_tile: tile,
            palette,
            drawable,
            state: ObjectState::Plain,
        }
    }

    /// Builder-style state setter.
    #[must_use]
    pub fn with_state(mut self, state: ObjectState) -> Self {
        self.state = state;
        self
    }

    /// Builder-style footprint setter.
    #[must_use]
    pub fn with_footprint(mut self, top: TileCoord, bottom: TileCoord) -> Self {
        self.top_tile = top;
        self.bottom_tile = bottom;
        self
    }

    /// Overlay data value, if this is an overlay.
    #[must_use]
    pub const fn overlay_value(&self) -> Option<u8> {
        match self.state {
            ObjectState::Overlay { value } => Some(value),
            _ => None,
        }
    }

    /// True for units standing on a bridge.
    #[must_use]
    pub const fn on_bridge(&self) -> bool {
        matches!(self.state, ObjectState::Unit { on_bridge: true, .. })
    }
}
