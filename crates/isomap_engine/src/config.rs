//! # Render Configuration
//!
//! Loaded once at startup from TOML. Holds the engine revision, the active
//! theater and the per-object overrides a mod can apply on top of the rules.
//!
//! ```toml
//! engine = "yuris_revenge"
//! theater = "urban"
//! seed = 42
//!
//! [[overrides]]
//! priority = 10
//! collections = ["overlay"]
//! theaters = ["urban", "temperate"]
//! object_regex = "^LOBRDG"
//! lighting = "full"
//! palette = "custom"
//! custom_palette = "lobrdg.pal"
//! ```

use std::path::Path;

use isomap_shared::{CollectionType, EngineType, LightingType, PaletteType, TheaterType};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// One configuration override, matched against loaded drawables.
#[derive(Clone, Debug, Deserialize)]
pub struct ObjectOverride {
    /// Higher priorities are applied first.
    #[serde(default)]
    pub priority: i32,
    /// Categories this override applies to. Empty means all.
    #[serde(default)]
    pub collections: Vec<CollectionType>,
    /// Theaters this override applies to. Empty means all.
    #[serde(default)]
    pub theaters: Vec<TheaterType>,
    /// Case-insensitive regex matched against the object name.
    pub object_regex: String,
    /// Replacement lighting, `default` leaves the object alone.
    #[serde(default)]
    pub lighting: LightingType,
    /// Replacement palette, `default` leaves the object alone.
    #[serde(default)]
    pub palette: PaletteType,
    /// Palette file used when `palette = "custom"`.
    #[serde(default)]
    pub custom_palette: Option<String>,
}

/// An override with its regex compiled.
#[derive(Clone, Debug)]
pub struct OverrideRule {
    /// The source override.
    pub spec: ObjectOverride,
    matcher: Regex,
}

impl OverrideRule {
    /// Compiles an override.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRegex`] if the pattern does not compile.
    pub fn compile(spec: ObjectOverride) -> EngineResult<Self> {
        let matcher = RegexBuilder::new(&spec.object_regex)
            .case_insensitive(true)
            .build()
            .map_err(|source| EngineError::InvalidRegex {
                pattern: spec.object_regex.clone(),
                source,
            })?;
        Ok(Self { spec, matcher })
    }

    /// Returns true if this override targets the given object.
    #[must_use]
    pub fn matches(&self, collection: CollectionType, theater: TheaterType, name: &str) -> bool {
        (self.spec.collections.is_empty() || self.spec.collections.contains(&collection))
            && (self.spec.theaters.is_empty() || self.spec.theaters.contains(&theater))
            && self.matcher.is_match(name)
    }
}

fn default_seed() -> u64 {
    0x15_0C_A1
}

/// Top-level render configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct RenderConfig {
    /// Engine revision the rules belong to.
    pub engine: EngineType,
    /// Active theater.
    pub theater: TheaterType,
    /// Overrides the engine's cell width.
    #[serde(default)]
    pub tile_width: Option<i32>,
    /// Overrides the engine's cell height.
    #[serde(default)]
    pub tile_height: Option<i32>,
    /// Seed for every random frame decision.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Draw infantry with a random facing instead of their map direction.
    #[serde(default)]
    pub random_infantry_facing: bool,
    /// Paint building parts with their depth correction instead of color.
    #[serde(default)]
    pub visualize_building_z: bool,
    /// Object overrides, in file order.
    #[serde(default)]
    pub overrides: Vec<ObjectOverride>,
    #[serde(skip)]
    rules: Vec<OverrideRule>,
}

impl RenderConfig {
    /// Creates a config with engine defaults and no overrides.
    #[must_use]
    pub fn new(engine: EngineType, theater: TheaterType) -> Self {
        Self {
            engine,
            theater,
            tile_width: None,
            tile_height: None,
            seed: default_seed(),
            random_infantry_facing: false,
            visualize_building_z: false,
            overrides: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML, a bad regex or bad dimensions.
    pub fn from_toml_str(source: &str) -> EngineResult<Self> {
        let mut config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigIo`] if the file cannot be read, plus
    /// everything [`RenderConfig::from_toml_str`] can return.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading render config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Adds an override and recompiles.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRegex`] if the pattern does not compile.
    pub fn with_override(mut self, ovr: ObjectOverride) -> EngineResult<Self> {
        self.overrides.push(ovr);
        self.validate()?;
        Ok(self)
    }

    /// Checks dimensions and compiles every override regex.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive tile dimensions or a bad regex.
    pub fn validate(&mut self) -> EngineResult<()> {
        if self.tile_width() <= 0 || self.tile_height() <= 0 {
            return Err(EngineError::InvalidConfig(format!(
                "tile dimensions must be positive, got {}x{}",
                self.tile_width(),
                self.tile_height()
            )));
        }
        self.rules = self
            .overrides
            .iter()
            .cloned()
            .map(OverrideRule::compile)
            .collect::<EngineResult<_>>()?;
        Ok(())
    }

    /// Cell width in pixels.
    #[must_use]
    pub fn tile_width(&self) -> i32 {
        self.tile_width.unwrap_or_else(|| self.engine.tile_width())
    }

    /// Cell height in pixels.
    #[must_use]
    pub fn tile_height(&self) -> i32 {
        self.tile_height.unwrap_or_else(|| self.engine.tile_height())
    }

    /// Overrides matching an object, highest priority first.
    #[must_use]
    pub fn matching_overrides(&self, collection: CollectionType, name: &str) -> Vec<&OverrideRule> {
        let mut matched: Vec<&OverrideRule> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(collection, self.theater, name))
            .collect();
        // stable: equal priorities keep file order
        matched.sort_by(|a, b| b.spec.priority.cmp(&a.spec.priority));
        matched
    }
}
