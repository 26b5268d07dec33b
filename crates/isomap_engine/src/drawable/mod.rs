//! Drawables: one resolved visual descriptor per rules section.
//!
//! A drawable is built once per distinct object name when its collection
//! loads, resolved from rules and art ([`Drawable::load_from_rules`]), and
//! then shared by every placement of that object on the map.
//!
//! ```text
//! Sprite     infantry, overlay, smudge: a plain SHP
//! Unit       vehicles, aircraft: SHP, or nothing for voxel units
//! Building   SHP with Building-Z depth and a foundation
//! Terrain    trees, rocks
//! Animation  looping SHP, possibly translucent
//! Alpha      multiplicative light mask, usually a sub-drawable
//! Tile       one terrain tile set entry (TMP)
//! ```

mod resolve;

use std::borrow::Cow;
use std::sync::Arc;

use isomap_shared::{CollectionType, Point, Rect, Size};
use tracing::trace;

use crate::assets::{ShpFile, TmpFile};
use crate::canvas::Canvas;
use crate::compositor::{Compositor, SpriteShape};
use crate::frame::ReadySequence;
use crate::object::GameObject;
use crate::props::{DrawProperties, BRIDGE_LEVELS};
use crate::rules::IniSection;

/// Drawable variant, selected by category at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawableKind {
    /// Plain sprite.
    Sprite,
    /// Vehicle or aircraft.
    Unit,
    /// Building.
    Building,
    /// Terrain object.
    Terrain,
    /// Animation.
    Animation,
    /// Alpha light mask.
    Alpha,
    /// Terrain tile.
    Tile,
}

impl DrawableKind {
    /// The variant objects of `collection` use.
    #[must_use]
    pub const fn for_collection(collection: CollectionType) -> Self {
        match collection {
            CollectionType::Aircraft | CollectionType::Vehicle => Self::Unit,
            CollectionType::Building => Self::Building,
            CollectionType::Infantry | CollectionType::Overlay | CollectionType::Smudge => Self::Sprite,
            CollectionType::Terrain => Self::Terrain,
            CollectionType::Animation => Self::Animation,
        }
    }
}

/// The decoded image a drawable renders.
#[derive(Clone, Debug, Default)]
pub enum DrawableAsset {
    /// Not found, or a voxel model; draws nothing.
    #[default]
    Missing,
    /// A sprite file.
    Shp(Arc<ShpFile>),
    /// A tile set file.
    Tmp(Arc<TmpFile>),
}

/// A resolved visual descriptor.
///
/// `Clone` copies the properties, so a clone can be adjusted per instance
/// without touching the shared original.
#[derive(Clone, Debug)]
pub struct Drawable {
    /// Rules section name.
    pub name: String,
    /// Position in the owning collection.
    pub index: usize,
    /// Owning collection.
    pub collection: CollectionType,
    /// Variant.
    pub kind: DrawableKind,
    /// Rules section.
    pub rules: IniSection,
    /// Art section.
    pub art: IniSection,
    /// Resolved render parameters.
    pub props: DrawProperties,
    /// Nested drawables, drawn after this one.
    pub sub_drawables: Vec<Drawable>,
    /// Backing image.
    pub asset: DrawableAsset,
    /// Image base name.
    pub image: String,
    /// Voxel model, not a sprite.
    pub is_voxel: bool,
    /// Image file carries the theater extension.
    pub theater_extension: bool,
    /// Image file name encodes the theater in its second letter.
    pub new_theater: bool,
    /// Takes house colors.
    pub is_remapable: bool,
    /// Never drawn (rubble).
    pub invisible_in_game: bool,
    /// Footprint in cells.
    pub foundation: Size,
    /// Wall overlay.
    pub is_wall: bool,
    /// Gate overlay.
    pub is_gate: bool,
    /// Destroyed-bridge rubble.
    pub is_rubble: bool,
    /// Veins overlay.
    pub is_veins: bool,
    /// Veinhole monster.
    pub is_veinhole_monster: bool,
    /// Levels the shadow is cast from, above the object's cell.
    pub tile_elevation: i32,
    /// Lies on the ground.
    pub flat: bool,
    /// Upright part of a building; depth from the Building-Z map.
    pub is_building_part: bool,
    /// Number of facings.
    pub facings: i32,
    /// First standing frame.
    pub start_stand_frame: i32,
    /// Standing frames per facing.
    pub standing_frames: i32,
    /// First walking frame.
    pub start_walk_frame: i32,
    /// Walking frames per facing.
    pub walk_frames: i32,
    /// Ready animation of infantry.
    pub ready: ReadySequence,
}

impl Drawable {
    /// An unresolved drawable for `rules` / `art`.
    #[must_use]
    pub fn new(collection: CollectionType, index: usize, rules: IniSection, art: IniSection) -> Self {
        Self {
            name: rules.name().to_string(),
            index,
            collection,
            kind: DrawableKind::for_collection(collection),
            image: art.name().to_string(),
            rules,
            art,
            props: DrawProperties::default(),
            sub_drawables: Vec::new(),
            asset: DrawableAsset::Missing,
            is_voxel: false,
            theater_extension: false,
            new_theater: false,
            is_remapable: false,
            invisible_in_game: false,
            foundation: Size::ONE,
            is_wall: false,
            is_gate: false,
            is_rubble: false,
            is_veins: false,
            is_veinhole_monster: false,
            tile_elevation: 0,
            flat: false,
            is_building_part: false,
            facings: 8,
            start_stand_frame: 0,
            standing_frames: 0,
            start_walk_frame: 0,
            walk_frames: 0,
            ready: ReadySequence::default(),
        }
    }

    /// An alpha mask drawn from `shp`.
    #[must_use]
    pub fn alpha(collection: CollectionType, shp: Arc<ShpFile>) -> Self {
        let name = shp.name.clone();
        let mut drawable = Self::new(collection, 0, IniSection::new(name.as_str()), IniSection::new(name.as_str()));
        drawable.kind = DrawableKind::Alpha;
        drawable.flat = true;
        drawable.asset = DrawableAsset::Shp(shp);
        drawable
    }

    /// Tile set entry `index`.
    #[must_use]
    pub fn tile(index: usize, name: &str, tmp: Option<Arc<TmpFile>>) -> Self {
        let mut drawable = Self::new(CollectionType::Terrain, index, IniSection::new(name), IniSection::new(name));
        drawable.kind = DrawableKind::Tile;
        drawable.flat = true;
        drawable.asset = tmp.map_or(DrawableAsset::Missing, DrawableAsset::Tmp);
        drawable
    }

    /// True when there is an image to draw.
    #[must_use]
    pub const fn has_asset(&self) -> bool {
        !matches!(self.asset, DrawableAsset::Missing)
    }

    /// Geometry flags the compositor needs.
    #[must_use]
    pub const fn shape(&self) -> SpriteShape {
        SpriteShape {
            flat: self.flat,
            building_part: self.is_building_part,
            foundation_width: self.foundation.width,
            tile_elevation: self.tile_elevation,
        }
    }

    /// Properties for drawing `obj`; infantry on a bridge stand higher.
    fn instance_props(&self, obj: &GameObject, tile_height: i32) -> Cow<'_, DrawProperties> {
        if self.collection == CollectionType::Infantry && obj.on_bridge() {
            let mut props = self.props.clone();
            props.offset += Point::new(0, -BRIDGE_LEVELS * tile_height / 2);
            Cow::Owned(props)
        } else {
            Cow::Borrowed(&self.props)
        }
    }

    /// Draws `obj`: shadow (when `with_shadow`), then the sprite, then
    /// every sub-drawable.
    pub fn draw(&self, obj: &GameObject, canvas: &mut Canvas, compositor: &mut Compositor, with_shadow: bool) {
        if self.invisible_in_game {
            return;
        }
        match &self.asset {
            DrawableAsset::Missing => trace!("{} has no image, skipped", self.name),
            DrawableAsset::Tmp(tmp) => compositor.draw_tile(obj, tmp, canvas),
            DrawableAsset::Shp(shp) if self.kind == DrawableKind::Alpha => {
                compositor.draw_alpha(obj, shp, &self.props, canvas);
            }
            DrawableAsset::Shp(shp) => self.draw_sprite(obj, shp, canvas, compositor, with_shadow),
        }
        for sub in &self.sub_drawables {
            sub.draw(obj, canvas, compositor, false);
        }
    }

    fn draw_sprite(
        &self,
        obj: &GameObject,
        shp: &ShpFile,
        canvas: &mut Canvas,
        compositor: &mut Compositor,
        with_shadow: bool,
    ) {
        let props = self.instance_props(obj, compositor.tile_height());
        // shadow and sprite must agree on a random frame
        let Some(frame) = compositor.decide_frame(obj, shp, &props) else {
            trace!("{}: frame out of range", self.name);
            return;
        };
        let shape = self.shape();
        if with_shadow && props.has_shadow && !props.cloakable {
            compositor.draw_shadow_frame(obj, shp, frame, shape, &props, canvas);
        }
        let translucency = if props.cloakable { 50 } else { props.translucency };
        compositor.draw_frame(obj, shp, frame, shape, &props, canvas, translucency);
    }

    /// Casts only the shadow of `obj`.
    pub fn draw_shadow(&self, obj: &GameObject, canvas: &mut Canvas, compositor: &mut Compositor) {
        if self.invisible_in_game || !self.props.has_shadow || self.props.cloakable {
            return;
        }
        if let DrawableAsset::Shp(shp) = &self.asset {
            if self.kind != DrawableKind::Alpha {
                let props = self.instance_props(obj, compositor.tile_height());
                compositor.draw_shadow(obj, shp, self.shape(), &props, canvas);
            }
        }
    }

    /// Screen rectangle `obj` covers, or [`Rect::EMPTY`] when nothing would
    /// be drawn. Does not consume randomness, so the rectangle matches the
    /// next draw of `obj`.
    #[must_use]
    pub fn bounds(&self, obj: &GameObject, compositor: &Compositor) -> Rect {
        if self.invisible_in_game {
            return Rect::EMPTY;
        }
        match &self.asset {
            DrawableAsset::Missing => Rect::EMPTY,
            DrawableAsset::Tmp(tmp) => compositor.tile_bounds(obj, tmp),
            DrawableAsset::Shp(shp) if self.kind == DrawableKind::Alpha => compositor
                .peek_frame(obj, shp, &self.props)
                .map_or(Rect::EMPTY, |frame| compositor.alpha_bounds(obj, shp, frame, &self.props)),
            DrawableAsset::Shp(shp) => {
                let props = self.instance_props(obj, compositor.tile_height());
                compositor.bounds(obj, shp, &props)
            }
        }
    }
}
