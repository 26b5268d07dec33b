//! Rules and art resolution of a drawable.

use std::sync::Arc;

use isomap_shared::{CollectionType, EngineType, LightingType, PaletteType, Size};
use tracing::{debug, warn};

use super::{Drawable, DrawableAsset, DrawableKind};
use crate::assets::ShpFile;
use crate::collection::LoadContext;
use crate::defaults;
use crate::frame::{FrameDecider, ReadySequence};
use crate::overlay;
use crate::theater::apply_new_theater_if_needed;

/// Translucency of art flagged `Translucent=yes`.
const TRANSLUCENT_PERCENT: u8 = 50;

impl Drawable {
    /// Resolves everything rules and art say about this object.
    ///
    /// Call once, after the category defaults are in place.
    pub fn load_from_rules(&mut self, ctx: &LoadContext<'_>) {
        self.load_from_art_essential(ctx.config.engine);
        self.load_from_rules_full(ctx);
        self.load_kind_specifics();
    }

    /// Just what is needed to find the image file.
    pub fn load_from_art_essential(&mut self, engine: EngineType) {
        self.image = self.art.read_string_or("Image", self.art.name()).to_string();
        self.is_voxel = self.art.read_bool("Voxel");
        self.theater_extension = self.art.read_bool("Theater");
        self.new_theater = engine >= EngineType::RedAlert2 || self.art.read_bool("NewTheater");
    }

    fn load_from_rules_full(&mut self, ctx: &LoadContext<'_>) {
        let engine = ctx.config.engine;
        let th = ctx.config.tile_height();

        // house colors on sprites only exist in TS
        if !self.art.read_string("Remapable").is_empty() && engine.is_ts_family() {
            self.is_remapable = self.art.read_bool("Remapable");
        }

        if !self.rules.read_string("NoUseTileLandType").is_empty() {
            self.props.palette_type = PaletteType::Iso;
            self.props.lighting_type = LightingType::Full;
        }
        if self.art.read_bool("TerrainPalette") {
            self.props.palette_type = PaletteType::Iso;
            self.is_remapable = false;
        } else if self.art.read_bool("AnimPalette") {
            self.props.palette_type = PaletteType::Anim;
            self.props.lighting_type = LightingType::None;
            self.is_remapable = false;
        } else if !self.art.read_string("Palette").is_empty() {
            self.props.palette_type = PaletteType::Custom;
            self.props.custom_palette_name = Some(self.art.read_string("Palette").to_string());
        }

        self.load_alpha_image(ctx);

        self.props.has_shadow = self
            .art
            .read_bool_or("Shadow", defaults::shadow_assumption(self.collection))
            && !self.rules.read_bool("NoShadow");
        self.props.cloakable = self.rules.read_bool("Cloakable");
        self.flat = self
            .rules
            .read_bool_or("DrawFlat", defaults::flatness_assumption(self.collection))
            || self.rules.read_bool("Flat");

        if self.rules.read_bool("Gate") {
            self.is_gate = true;
            self.flat = false;
            self.is_building_part = true;
            self.props.palette_type = PaletteType::Unit;
            self.props.frame_decider = FrameDecider::OverlayValue;
        }

        if self.rules.read_bool("Wall") {
            self.is_wall = true;
            self.flat = false;
            self.is_building_part = true;
            // RA2 walls sit a little lower
            if engine >= EngineType::RedAlert2 {
                self.props.offset.y += 3;
            }
            self.props.palette_type = PaletteType::Unit;
            self.props.lighting_type = LightingType::Ambient;
            self.props.frame_decider = FrameDecider::OverlayValue;
        }

        if self.rules.read_bool("IsRubble") {
            self.is_rubble = true;
            self.invisible_in_game = true;
        }
        if self.rules.read_bool("IsVeins") {
            self.is_veins = true;
            self.flat = true;
            self.props.lighting_type = LightingType::None;
            self.props.palette_type = PaletteType::Unit;
            self.props.offset.y = -1;
        }
        if self.rules.read_bool("IsVeinholeMonster") {
            self.is_veinhole_monster = true;
            self.props.offset.y = -49;
            self.props.lighting_type = LightingType::None;
            self.props.palette_type = PaletteType::Unit;
        }

        let land = self.rules.read_string("Land");
        if land.eq_ignore_ascii_case("Rock") {
            self.props.offset.y += th / 2;
        } else if land.eq_ignore_ascii_case("Road") {
            self.props.offset.y += th / 2;
            // low bridges would vanish under the water tiles otherwise
            if overlay::is_low_bridge(&self.name) {
                self.props.z_adjust += th;
            }
        } else if land.eq_ignore_ascii_case("Railroad") {
            self.props.offset.y = if engine.is_ts_family() { 11 } else { 14 };
            self.props.lighting_type = LightingType::Full;
            self.props.palette_type = PaletteType::Iso;
        }

        if self.rules.read_bool("SpawnsTiberium") {
            self.props.offset.y = -1;
            self.props.lighting_type = LightingType::None;
            self.props.palette_type = PaletteType::Unit;
        }

        self.facings = self.art.read_int_or("Facings", 8);
        self.start_stand_frame = self.art.read_int_or("StartStandFrame", 0);
        self.standing_frames = self.art.read_int_or("StandingFrames", 0);
        self.start_walk_frame = self.art.read_int_or("StartWalkFrame", 0);
        self.walk_frames = self.art.read_int_or("WalkFrames", 0);

        self.props.offset.x += self.art.read_int_or("XDrawOffset", 0);
        self.props.offset.y += self.art.read_int_or("YDrawOffset", 0);

        let sequence = self.art.read_string("Sequence");
        if !sequence.is_empty() {
            let section = ctx.art.get_or_create_section(sequence);
            match ReadySequence::parse(section.read_string("Ready")) {
                Some(ready) => self.ready = ready,
                None => debug!("{}: ignoring ready sequence of {}", self.name, section.name()),
            }
        }
    }

    fn load_alpha_image(&mut self, ctx: &LoadContext<'_>) {
        let alpha = self.rules.read_string("AlphaImage");
        if alpha.is_empty() {
            return;
        }
        let file = format!("{alpha}.shp");
        if !ctx.assets.exists(&file) {
            return;
        }
        match ctx.assets.shp(&file) {
            Some(shp) => self.sub_drawables.push(Drawable::alpha(self.collection, shp)),
            None => warn!("{}: alpha image {} exists but could not be opened", self.name, file),
        }
    }

    /// Steps only one variant needs.
    fn load_kind_specifics(&mut self) {
        match self.kind {
            DrawableKind::Building => {
                self.is_building_part = true;
                self.foundation = self.parse_foundation();
            }
            DrawableKind::Animation => {
                self.props.frame_decider = FrameDecider::Fixed(self.art.read_int_or("LoopStart", 0));
                self.props.translucency = if self.art.read_bool("Translucent") {
                    TRANSLUCENT_PERCENT
                } else {
                    self.art.read_int_or("Translucency", 0).clamp(0, 100) as u8
                };
            }
            DrawableKind::Terrain => {
                if self.art.read_bool("IsAnimated") {
                    self.props.frame_decider = FrameDecider::Random;
                }
            }
            DrawableKind::Sprite if self.collection == CollectionType::Smudge => {
                self.foundation = Size::new(self.rules.read_int_or("Width", 1), self.rules.read_int_or("Height", 1));
            }
            _ => {}
        }
    }

    /// Building foundation from art: `WxH`, or `Custom` with explicit
    /// `Foundation.X` / `Foundation.Y`.
    fn parse_foundation(&self) -> Size {
        let foundation = self.art.read_string_or("Foundation", "1x1");
        if foundation.eq_ignore_ascii_case("Custom") {
            return Size::new(
                self.art.read_int_or("Foundation.X", 1),
                self.art.read_int_or("Foundation.Y", 1),
            );
        }
        let mut parts = foundation.split(['x', 'X']).map(|p| p.trim().parse::<i32>());
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(width)), Some(Ok(height)), None) => Size::new(width, height),
            _ => {
                debug!("{}: bad foundation {:?}", self.name, foundation);
                Size::ONE
            }
        }
    }

    /// Image file name, theater extension and new-theater letter applied.
    #[must_use]
    pub fn filename(&self, ctx: &LoadContext<'_>) -> String {
        let mut filename = self.image.clone();
        if self.theater_extension {
            filename.push_str(ctx.config.theater.extension());
        } else {
            filename.push_str(".shp");
        }
        if self.new_theater {
            filename = apply_new_theater_if_needed(
                ctx.config.engine,
                ctx.config.theater,
                ctx.assets,
                self.art.name(),
                &filename,
            );
        }
        filename
    }

    /// Opens the image, unless this is a voxel model.
    pub fn load_asset(&mut self, ctx: &LoadContext<'_>) {
        if self.is_voxel {
            debug!("{} is a voxel model, no sprite", self.name);
            self.asset = DrawableAsset::Missing;
            return;
        }
        let filename = self.filename(ctx);
        self.asset = ctx
            .assets
            .shp(&filename)
            .map_or(DrawableAsset::Missing, DrawableAsset::Shp);
    }

    /// Sprite file, if one was found.
    #[must_use]
    pub fn shp(&self) -> Option<&Arc<ShpFile>> {
        match &self.asset {
            DrawableAsset::Shp(shp) => Some(shp),
            _ => None,
        }
    }
}
