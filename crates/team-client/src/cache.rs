//! Hierarchy cache keyed by viewer and leg using moka
//!
//! Holds the wrapped tree for each (viewer, leg) pair so switching tabs back
//! and forth does not refetch.

use crate::config::ClientConfig;
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use team_hierarchy::{HierarchyNode, Leg, Viewer};

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache (approximate)
    pub entry_count: u64,
}

/// Cache key: whose tree, which leg
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HierarchyKey {
    /// Viewer identifier
    pub viewer_id: String,
    /// Leg tab
    pub leg: Leg,
}

impl HierarchyKey {
    /// Key for a viewer's leg
    #[must_use]
    pub fn new(viewer: &Viewer, leg: Leg) -> Self {
        Self {
            viewer_id: viewer.id.clone(),
            leg,
        }
    }
}

/// Cache of wrapped hierarchies
///
/// Provides:
/// - Bounded capacity with LRU-style eviction
/// - Optional time-based expiration (TTL)
/// - Per-viewer invalidation across all legs
#[derive(Debug, Clone)]
pub struct HierarchyCache {
    inner: Cache<HierarchyKey, Arc<HierarchyNode>>,
}

impl HierarchyCache {
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create cache with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Create cache sized by config
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        match config.cache_ttl() {
            Some(ttl) => Self::with_ttl(config.cache_capacity, ttl),
            None => Self::new(config.cache_capacity),
        }
    }

    /// Insert tree
    #[inline]
    pub async fn insert(&self, key: HierarchyKey, tree: Arc<HierarchyNode>) {
        self.inner.insert(key, tree).await;
    }

    /// Get tree
    #[inline]
    pub async fn get(&self, key: &HierarchyKey) -> Option<Arc<HierarchyNode>> {
        self.inner.get(key).await
    }

    /// Get cached tree or fetch and insert it
    ///
    /// Failures are returned to the caller and nothing is cached.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `fetch`.
    pub async fn get_or_fetch<E, F, Fut>(&self, key: HierarchyKey, fetch: F) -> Result<Arc<HierarchyNode>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<HierarchyNode, E>>,
    {
        if let Some(cached) = self.get(&key).await {
            return Ok(cached);
        }

        let tree = Arc::new(fetch().await?);
        self.insert(key, Arc::clone(&tree)).await;
        Ok(tree)
    }

    /// Invalidate one entry
    #[inline]
    pub async fn invalidate(&self, key: &HierarchyKey) {
        self.inner.invalidate(key).await;
    }

    /// Invalidate every leg cached for a viewer
    pub async fn invalidate_viewer(&self, viewer_id: &str) {
        for leg in Leg::TABS {
            let key = HierarchyKey {
                viewer_id: viewer_id.to_string(),
                leg,
            };
            self.inner.invalidate(&key).await;
        }
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Check if cache holds a tree for key
    #[inline]
    pub async fn contains(&self, key: &HierarchyKey) -> bool {
        self.inner.get(key).await.is_some()
    }

    /// Get cache statistics
    #[inline]
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

impl Default for HierarchyCache {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use team_test_utils::{john_jane_tree, sample_viewer};

    #[tokio::test]
    async fn insert_and_get() {
        let cache = HierarchyCache::new(16);
        let key = HierarchyKey::new(&sample_viewer(), Leg::A);

        cache.insert(key.clone(), Arc::new(john_jane_tree())).await;

        let cached = cache.get(&key).await.unwrap();
        assert_eq!(cached.child.len(), 2);
        assert!(!cache.contains(&HierarchyKey::new(&sample_viewer(), Leg::B)).await);
    }

    #[tokio::test]
    async fn get_or_fetch_runs_fetch_once() {
        let cache = HierarchyCache::new(16);
        let key = HierarchyKey::new(&sample_viewer(), Leg::All);
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        for _ in 0..3 {
            let tree = cache
                .get_or_fetch::<(), _, _>(key.clone(), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(john_jane_tree())
                })
                .await
                .unwrap();
            assert!(tree.is_root);
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let cache = HierarchyCache::new(16);
        let key = HierarchyKey::new(&sample_viewer(), Leg::B);

        let result = cache.get_or_fetch(key.clone(), || async { Err("boom") }).await;
        assert_eq!(result.unwrap_err(), "boom");
        assert!(!cache.contains(&key).await);
    }

    #[tokio::test]
    async fn invalidate_viewer_drops_every_leg() {
        let cache = HierarchyCache::new(16);
        let viewer = sample_viewer();
        for leg in Leg::TABS {
            cache.insert(HierarchyKey::new(&viewer, leg), Arc::new(john_jane_tree())).await;
        }
        let other = HierarchyKey {
            viewer_id: "other".to_string(),
            leg: Leg::A,
        };
        cache.insert(other.clone(), Arc::new(john_jane_tree())).await;

        cache.invalidate_viewer(&viewer.id).await;

        for leg in Leg::TABS {
            assert!(!cache.contains(&HierarchyKey::new(&viewer, leg)).await);
        }
        assert!(cache.contains(&other).await);
    }

    #[tokio::test]
    async fn invalidate_all_clears() {
        let cache = HierarchyCache::default();
        let key = HierarchyKey::new(&sample_viewer(), Leg::A);
        cache.insert(key.clone(), Arc::new(john_jane_tree())).await;

        cache.invalidate_all();
        assert!(!cache.contains(&key).await);
    }
}
