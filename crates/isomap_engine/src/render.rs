//! The render pass: every object, in caller order, onto one canvas.

use std::collections::HashMap;
use std::time::Instant;

use isomap_shared::{CollectionType, Rect};
use tracing::{debug, info, info_span};

use crate::canvas::Canvas;
use crate::collection::{LoadContext, ObjectCollection, TileSet};
use crate::compositor::Compositor;
use crate::drawable::Drawable;
use crate::object::{DrawableId, GameObject};

/// Statistics of one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// Objects handed to their drawable.
    pub objects_drawn: u32,
    /// Objects whose drawable has no image.
    pub objects_without_image: u32,
    /// Objects whose drawable id resolved to nothing.
    pub objects_skipped: u32,
    /// Wall time of the pass in milliseconds.
    pub elapsed_ms: f32,
}

impl RenderStats {
    /// Objects seen by the pass.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.objects_drawn + self.objects_skipped
    }

    /// Throughput of the pass.
    #[must_use]
    pub fn objects_per_second(&self) -> f32 {
        if self.elapsed_ms > 0.0 {
            self.total() as f32 * 1000.0 / self.elapsed_ms
        } else {
            0.0
        }
    }
}

/// Everything objects can refer to: one collection per category plus the
/// tile set.
#[derive(Debug, Default)]
pub struct Scene {
    collections: HashMap<CollectionType, ObjectCollection>,
    tiles: TileSet,
}

impl Scene {
    /// An empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads one collection per `(category, names)` pair.
    pub fn load<'n, I>(ctx: &LoadContext<'_>, lists: impl IntoIterator<Item = (CollectionType, I)>) -> Self
    where
        I: IntoIterator<Item = &'n str>,
    {
        let mut scene = Self::new();
        for (collection, names) in lists {
            scene.insert_collection(ObjectCollection::load(collection, ctx, names));
        }
        scene
    }

    /// Adds or replaces the collection of its category.
    pub fn insert_collection(&mut self, collection: ObjectCollection) {
        self.collections.insert(collection.collection_type(), collection);
    }

    /// Replaces the tile set.
    pub fn set_tiles(&mut self, tiles: TileSet) {
        self.tiles = tiles;
    }

    /// Collection of a category.
    #[must_use]
    pub fn collection(&self, collection: CollectionType) -> Option<&ObjectCollection> {
        self.collections.get(&collection)
    }

    /// Resolves a drawable back-reference.
    #[must_use]
    pub fn drawable(&self, id: DrawableId) -> Option<&Drawable> {
        match id {
            DrawableId::Object { collection, index } => self.collections.get(&collection)?.get(index),
            DrawableId::Tile { index } => self.tiles.get(index),
        }
    }

    /// Screen rectangle of `obj`, or [`Rect::EMPTY`].
    #[must_use]
    pub fn bounds(&self, obj: &GameObject, compositor: &Compositor) -> Rect {
        self.drawable(obj.drawable)
            .map_or(Rect::EMPTY, |d| d.bounds(obj, compositor))
    }
}

/// Draws `objects`, already in back-to-front order, onto `canvas`.
///
/// Each object casts its shadow, then draws itself, then its sub-drawables.
/// Objects with no drawable are counted and skipped.
pub fn render(compositor: &mut Compositor, scene: &Scene, objects: &[GameObject], canvas: &mut Canvas) -> RenderStats {
    let span = info_span!("render", objects = objects.len(), width = canvas.width(), height = canvas.height());
    let _guard = span.enter();
    let start = Instant::now();

    let mut stats = RenderStats::default();
    for obj in objects {
        let Some(drawable) = scene.drawable(obj.drawable) else {
            debug!("No drawable for {:?}", obj.drawable);
            stats.objects_skipped += 1;
            continue;
        };
        if !drawable.has_asset() {
            stats.objects_without_image += 1;
        }
        drawable.draw(obj, canvas, compositor, true);
        stats.objects_drawn += 1;
    }

    stats.elapsed_ms = start.elapsed().as_secs_f32() * 1000.0;
    info!(
        "Rendered {} objects ({} skipped) in {:.1} ms",
        stats.objects_drawn, stats.objects_skipped, stats.elapsed_ms
    );
    stats
}
