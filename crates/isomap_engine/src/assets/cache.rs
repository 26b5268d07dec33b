//! Named asset lookup and the shared open-once cache.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::{ShpFile, TmpFile};

/// Resolves asset names to decoded files.
///
/// Implemented by the virtual file system; names are case-insensitive.
pub trait AssetSource: Send + Sync {
    /// Returns true if an asset of that name exists.
    fn exists(&self, name: &str) -> bool;
    /// Opens a sprite file.
    fn open_shp(&self, name: &str) -> Option<ShpFile>;
    /// Opens a tile file.
    fn open_tmp(&self, name: &str) -> Option<TmpFile>;
}

/// In-memory asset store.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    shp: HashMap<String, ShpFile>,
    tmp: HashMap<String, TmpFile>,
}

impl MemoryAssets {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sprite file under its own name.
    pub fn insert_shp(&mut self, shp: ShpFile) {
        self.shp.insert(shp.name.to_ascii_lowercase(), shp);
    }

    /// Adds a tile file under its own name.
    pub fn insert_tmp(&mut self, tmp: TmpFile) {
        self.tmp.insert(tmp.name.to_ascii_lowercase(), tmp);
    }

    /// Builder-style [`MemoryAssets::insert_shp`].
    #[must_use]
    pub fn with_shp(mut self, shp: ShpFile) -> Self {
        self.insert_shp(shp);
        self
    }
}

impl AssetSource for MemoryAssets {
    fn exists(&self, name: &str) -> bool {
        let key = name.to_ascii_lowercase();
        self.shp.contains_key(&key) || self.tmp.contains_key(&key)
    }

    fn open_shp(&self, name: &str) -> Option<ShpFile> {
        self.shp.get(&name.to_ascii_lowercase()).cloned()
    }

    fn open_tmp(&self, name: &str) -> Option<TmpFile> {
        self.tmp.get(&name.to_ascii_lowercase()).cloned()
    }
}

type Slot<T> = Option<Arc<T>>;

/// Thread-safe wrapper that opens every name at most once.
///
/// Negative lookups are cached too, so a missing asset referenced by
/// thousands of map objects costs one file-system lookup.
#[derive(Clone)]
pub struct AssetCache {
    source: Arc<dyn AssetSource>,
    shp: Arc<RwLock<HashMap<String, Slot<ShpFile>>>>,
    tmp: Arc<RwLock<HashMap<String, Slot<TmpFile>>>>,
}

impl fmt::Debug for AssetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetCache")
            .field("shp_entries", &self.shp.read().len())
            .field("tmp_entries", &self.tmp.read().len())
            .finish_non_exhaustive()
    }
}

impl AssetCache {
    /// Wraps a source.
    #[must_use]
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            shp: Arc::default(),
            tmp: Arc::default(),
        }
    }

    /// Returns true if the source has the named asset.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.source.exists(name)
    }

    /// Opens (or returns the cached) sprite file.
    #[must_use]
    pub fn shp(&self, name: &str) -> Option<Arc<ShpFile>> {
        let key = name.to_ascii_lowercase();
        if let Some(slot) = self.shp.read().get(&key) {
            return slot.clone();
        }
        let opened = self.source.open_shp(name).map(Arc::new);
        if opened.is_none() {
            debug!("Sprite {} not found", name);
        }
        self.shp.write().entry(key).or_insert(opened).clone()
    }

    /// Opens (or returns the cached) tile file.
    #[must_use]
    pub fn tmp(&self, name: &str) -> Option<Arc<TmpFile>> {
        let key = name.to_ascii_lowercase();
        if let Some(slot) = self.tmp.read().get(&key) {
            return slot.clone();
        }
        let opened = self.source.open_tmp(name).map(Arc::new);
        if opened.is_none() {
            debug!("Tile file {} not found", name);
        }
        self.tmp.write().entry(key).or_insert(opened).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        inner: MemoryAssets,
        opens: Arc<AtomicUsize>,
    }

    impl AssetSource for CountingSource {
        fn exists(&self, name: &str) -> bool {
            self.inner.exists(name)
        }

        fn open_shp(&self, name: &str) -> Option<ShpFile> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            self.inner.open_shp(name)
        }

        fn open_tmp(&self, name: &str) -> Option<TmpFile> {
            self.inner.open_tmp(name)
        }
    }

    #[test]
    fn test_memory_assets_case_insensitive() {
        let assets = MemoryAssets::new().with_shp(ShpFile::new("GUTOWR.shp", 1, 1, Vec::new()));
        assert!(assets.exists("gutowr.SHP"));
        assert!(assets.open_shp("GuToWr.shp").is_some());
        assert!(!assets.exists("gatowr.shp"));
    }

    #[test]
    fn test_cache_opens_once() {
        let opens = Arc::new(AtomicUsize::new(0));
        let cache = AssetCache::new(CountingSource {
            inner: MemoryAssets::new().with_shp(ShpFile::new("tree01.tem", 1, 1, Vec::new())),
            opens: Arc::clone(&opens),
        });

        let a = cache.shp("TREE01.tem").expect("present");
        let b = cache.shp("tree01.tem").expect("present");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(cache.shp("missing.shp").is_none());
        assert!(cache.shp("missing.shp").is_none());
        assert_eq!(opens.load(Ordering::SeqCst), 2);
    }
}
