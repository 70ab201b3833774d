use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;

use crate::fingerprint::CacheKey;

/// Counters for a [`RenderCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Renders stored after a miss.
    pub renders: u64,
    pub len: usize,
    pub capacity: usize,
}

/// Bounded least-recently-used store of finished renders, keyed by [`CacheKey`].
///
/// The lock is only held for the map operation itself; callers render outside it.
pub struct RenderCache {
    entries: Mutex<LruCache<CacheKey, Arc<image::RgbImage>>>,
    capacity: NonZeroUsize,
    hits: AtomicU64,
    misses: AtomicU64,
    renders: AtomicU64,
}

impl RenderCache {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            renders: AtomicU64::new(0),
        }
    }

    /// Look up a render and mark it most recently used.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<image::RgbImage>> {
        let found = self.entries.lock().get(key).cloned();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Store a render, evicting the least recently used entry when full.
    pub fn insert(&self, key: CacheKey, image: Arc<image::RgbImage>) {
        let evicted = self.entries.lock().push(key, image);
        self.renders.fetch_add(1, Ordering::Relaxed);
        match evicted {
            Some((old, _)) if old != key => {
                tracing::debug!(evicted = %old.to_hex(), "render cache full");
            }
            _ => {}
        }
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            renders: self.renders.load(Ordering::Relaxed),
            len: self.len(),
            capacity: self.capacity(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cache.rs"]
mod tests;
