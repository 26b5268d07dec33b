//! Collections: every drawable of one category, resolved at load time.
//!
//! Loading a collection runs, per object name:
//!
//! 1. category defaults (palette, lighting, remapping, frame decider, offset)
//! 2. rules and art resolution
//! 3. image lookup
//! 4. category fix-ups (special overlays, infantry facing)
//! 5. config overrides, highest priority first
//!
//! After loading, collections are read-only.

use std::collections::HashMap;

use isomap_shared::{CollectionType, EngineType, LightingType, PaletteType, Size};
use tracing::{debug, info, trace};

use crate::assets::AssetCache;
use crate::config::RenderConfig;
use crate::defaults;
use crate::drawable::Drawable;
use crate::frame::FrameDecider;
use crate::overlay;
use crate::props::{OffsetHack, BRIDGE_LEVELS};
use crate::rules::IniFile;

/// Everything resolution reads from.
#[derive(Clone, Copy, Debug)]
pub struct LoadContext<'a> {
    /// Render configuration.
    pub config: &'a RenderConfig,
    /// Asset lookup.
    pub assets: &'a AssetCache,
    /// Rules file.
    pub rules: &'a IniFile,
    /// Art file.
    pub art: &'a IniFile,
}

/// The resolved drawables of one category, indexed like the rules list.
#[derive(Clone, Debug)]
pub struct ObjectCollection {
    collection: CollectionType,
    drawables: Vec<Drawable>,
    by_name: HashMap<String, usize>,
}

impl ObjectCollection {
    /// Resolves `names` (the category's rules list, in order).
    pub fn load<'n>(
        collection: CollectionType,
        ctx: &LoadContext<'_>,
        names: impl IntoIterator<Item = &'n str>,
    ) -> Self {
        let mut drawables = Vec::new();
        let mut by_name = HashMap::new();
        for name in names.into_iter().filter(|n| !n.is_empty()) {
            trace!("Loading object {:?}.{}", collection, name);
            let index = drawables.len();
            by_name.entry(name.to_ascii_uppercase()).or_insert(index);
            drawables.push(load_drawable(collection, index, name, ctx));
        }
        let missing = drawables.iter().filter(|d| !d.has_asset()).count();
        info!(
            "Loaded {} {:?} objects ({} without image)",
            drawables.len(),
            collection,
            missing
        );
        Self {
            collection,
            drawables,
            by_name,
        }
    }

    /// Category of this collection.
    #[must_use]
    pub const fn collection_type(&self) -> CollectionType {
        self.collection
    }

    /// Number of drawables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// True when nothing was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Drawable at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Drawable> {
        self.drawables.get(index)
    }

    /// Drawable named `name`, case-insensitive.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Drawable> {
        self.by_name
            .get(&name.to_ascii_uppercase())
            .and_then(|&i| self.drawables.get(i))
    }

    /// Index of the drawable named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(&name.to_ascii_uppercase()).copied()
    }

    /// All drawables, in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Drawable> {
        self.drawables.iter()
    }
}

fn load_drawable(collection: CollectionType, index: usize, name: &str, ctx: &LoadContext<'_>) -> Drawable {
    let rules = ctx.rules.get_or_create_section(name);
    let art_name = rules.read_string_or("Image", name).to_string();
    let art = ctx.art.get_or_create_section(&art_name);

    let mut drawable = Drawable::new(collection, index, rules, art);
    apply_defaults(&mut drawable, ctx.config);
    drawable.load_from_rules(ctx);
    drawable.load_asset(ctx);

    match collection {
        CollectionType::Overlay => apply_overlay_specials(&mut drawable, ctx.config.engine),
        CollectionType::Infantry => {
            drawable.props.frame_decider = FrameDecider::Infantry {
                ready: drawable.ready,
                random_facing: ctx.config.random_infantry_facing,
            };
        }
        _ => {}
    }

    apply_overrides(&mut drawable, ctx.config);
    drawable
}

fn apply_defaults(drawable: &mut Drawable, config: &RenderConfig) {
    let collection = drawable.collection;
    drawable.props.palette_type = defaults::default_palette(collection, config.engine);
    drawable.props.lighting_type = defaults::default_lighting(collection);
    drawable.is_remapable = defaults::default_remappability(collection, config.engine);
    drawable.props.frame_decider = defaults::default_frame_decider(collection);
    drawable.props.offset = defaults::base_offset(collection, config.tile_width(), config.tile_height());
}

/// Resource fields and bridges, recognised by overlay index.
fn apply_overlay_specials(drawable: &mut Drawable, engine: EngineType) {
    let tib = overlay::tib_type(drawable.index, engine);
    let props = &mut drawable.props;
    if engine.is_ts_family() {
        if tib.is_special() {
            props.frame_decider = FrameDecider::OverlayValue;
            props.palette_type = PaletteType::Unit;
            props.lighting_type = LightingType::None;
            drawable.is_remapable = true;
        } else if overlay::is_high_bridge(drawable.index) || overlay::is_ts_rail_bridge(drawable.index) {
            props.offset_hack = OffsetHack::TsBridge;
            props.shadow_offset_hack = OffsetHack::TsBridgeShadow;
            drawable.tile_elevation = BRIDGE_LEVELS;
        }
    } else if tib.is_special() {
        props.frame_decider = FrameDecider::OverlayValue;
        props.palette_type = PaletteType::Overlay;
        props.lighting_type = LightingType::None;
    } else if overlay::is_high_bridge(drawable.index) {
        props.offset_hack = OffsetHack::Ra2Bridge;
        props.shadow_offset_hack = OffsetHack::Ra2BridgeShadow;
        drawable.tile_elevation = BRIDGE_LEVELS;
        // a wider footprint sorts the bridge after what it spans
        drawable.foundation = Size::new(3, 1);
    }
}

fn apply_overrides(drawable: &mut Drawable, config: &RenderConfig) {
    for rule in config.matching_overrides(drawable.collection, &drawable.name) {
        let spec = &rule.spec;
        debug!("Object {} receives overrides from regex {}", drawable.name, spec.object_regex);
        if spec.lighting != LightingType::Default {
            drawable.props.lighting_type = spec.lighting;
        }
        if spec.palette != PaletteType::Default {
            drawable.props.palette_type = spec.palette;
            drawable.props.custom_palette_name = spec.custom_palette.clone();
        }
    }
}

/// Terrain tile set entries, one drawable per tile file.
#[derive(Clone, Debug, Default)]
pub struct TileSet {
    drawables: Vec<Drawable>,
}

impl TileSet {
    /// Opens every file in `filenames`; entry indices follow the order given.
    pub fn load<'n>(assets: &AssetCache, filenames: impl IntoIterator<Item = &'n str>) -> Self {
        let drawables = filenames
            .into_iter()
            .enumerate()
            .map(|(index, name)| Drawable::tile(index, name, assets.tmp(name)))
            .collect::<Vec<_>>();
        debug!("Loaded {} tile set entries", drawables.len());
        Self { drawables }
    }

    /// Entry `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Drawable> {
        self.drawables.get(index)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// True when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}
