//! Bounded LRU cache of resolved styles, keyed by styler cache key.
//!
//! Features whose visual parameters resolve identically share one
//! [`Style`]. The cache is owned by the rendering integration and passed
//! into style resolution; it is safe to share across threads.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};
use workbench_common::{WorkbenchError, WorkbenchResult};

use crate::config::StyleCacheConfig;
use crate::style::Style;

/// Hit/miss counters of a [`StyleCache`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

pub struct StyleCache {
    cache: Mutex<LruCache<String, Arc<Style>>>,
    capacity: NonZeroUsize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl StyleCache {
    /// Create a cache holding at most `capacity` styles.
    pub fn new(capacity: usize) -> WorkbenchResult<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| WorkbenchError::out_of_range("style cache capacity must be > 0"))?;

        Ok(Self {
            cache: Mutex::new(LruCache::new(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        })
    }

    pub fn from_config(config: &StyleCacheConfig) -> WorkbenchResult<Self> {
        Self::new(config.capacity)
    }

    /// Return the cached style for `key`, building it with `create` on a miss.
    ///
    /// `create` runs without the lock held. If two callers miss on the same
    /// key at once, both build and the later insert wins; the styles are
    /// equal, so either result is valid.
    pub fn get_or_insert_with<F>(&self, key: &str, create: F) -> Arc<Style>
    where
        F: FnOnce() -> Style,
    {
        if let Some(style) = self.cache.lock().get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "Style cache hit");
            return Arc::clone(style);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "Style cache miss");

        let style = Arc::new(create());
        let evicted = self
            .cache
            .lock()
            .push(key.to_string(), Arc::clone(&style));

        if let Some((evicted_key, _)) = evicted {
            if evicted_key != key {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(key = %evicted_key, "Style cache eviction");
            }
        }

        style
    }

    /// Look up a style without inserting.
    pub fn get(&self, key: &str) -> Option<Arc<Style>> {
        self.cache.lock().get(key).cloned()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Drop all cached styles and reset the counters.
    pub fn clear(&self) {
        self.cache.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

impl std::fmt::Debug for StyleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workbench_common::{ErrorKind, BLACK};

    fn filled() -> Style {
        Style {
            fill: Some(BLACK),
            ..Style::default()
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            StyleCache::new(0).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_hit_returns_shared_style() {
        let cache = StyleCache::new(4).unwrap();
        let a = cache.get_or_insert_with("k", filled);
        let b = cache.get_or_insert_with("k", || panic!("must not rebuild on hit"));

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                evictions: 0
            }
        );
        assert_eq!(cache.stats().hit_rate(), 50.0);
    }

    #[test]
    fn test_eviction_is_bounded() {
        let cache = StyleCache::new(2).unwrap();
        for key in ["a", "b", "c"] {
            cache.get_or_insert_with(key, Style::default);
        }

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_clear() {
        let cache = StyleCache::new(2).unwrap();
        cache.get_or_insert_with("a", Style::default);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
