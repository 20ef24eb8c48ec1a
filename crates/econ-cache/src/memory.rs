//! In-memory cache implementation.

use async_trait::async_trait;
use econ_core::{CacheEntry, CacheKey, Result, Series, SeriesCache};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Process-local series cache.
///
/// Entries live in a `RwLock`-protected `HashMap` and are lost when the cache
/// is dropped. Expiry is lazy: a stale entry stays in the map until it is
/// overwritten, swept by [`SeriesCache::invalidate_stale`], or cleared. There
/// is no size bound.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeriesCache for InMemoryCache {
    #[instrument(skip(self), fields(key = %key))]
    async fn get(&self, key: &CacheKey, ttl: Duration) -> Result<Option<CacheEntry>> {
        let cache = self.entries.read().await;
        match cache.get(key) {
            Some(entry) if entry.is_fresh(ttl) => {
                debug!("Cache hit for series request");
                Ok(Some(entry.clone()))
            }
            Some(entry) => {
                debug!(age_ms = entry.age().as_millis() as u64, "Cache entry expired");
                Ok(None)
            }
            None => {
                debug!("Cache miss for series request");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, result), fields(key = %key, count = result.len()))]
    async fn put(&self, key: CacheKey, result: Vec<Series>) -> Result<()> {
        let mut cache = self.entries.write().await;
        cache.insert(key, CacheEntry::new(result));
        debug!("Cached series result");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut cache = self.entries.write().await;
        let before = cache.len();
        cache.retain(|_, entry| entry.is_fresh(ttl));
        let removed = before - cache.len();

        if removed > 0 {
            debug!("Invalidated {} stale cache entries", removed);
        }

        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use econ_core::SeriesId;

    fn key(ids: &[&str]) -> CacheKey {
        let ids: Vec<SeriesId> = ids.iter().map(|s| SeriesId::new(*s)).collect();
        CacheKey::new(&ids, Some(2023), Some(2024))
    }

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_memory_cache_roundtrip() {
        let cache = InMemoryCache::new();
        let k = key(&["CUUR0000SA0"]);

        // Initially no data
        assert!(cache.get(&k, TTL).await.unwrap().is_none());
        assert!(cache.is_empty().await.unwrap());

        cache
            .put(k.clone(), vec![Series::new("CUUR0000SA0", Vec::new())])
            .await
            .unwrap();

        let entry = cache.get(&k, TTL).await.unwrap().unwrap();
        assert_eq!(entry.result.len(), 1);
        assert_eq!(entry.result[0].series_id, SeriesId::new("CUUR0000SA0"));
        assert_eq!(cache.len().await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_cache_put_overwrites() {
        let cache = InMemoryCache::new();
        let k = key(&["A"]);

        cache.put(k.clone(), vec![Series::new("A", Vec::new())]).await.unwrap();
        cache
            .put(
                k.clone(),
                vec![Series::new("A", Vec::new()), Series::new("A", Vec::new())],
            )
            .await
            .unwrap();

        let entry = cache.get(&k, TTL).await.unwrap().unwrap();
        assert_eq!(entry.result.len(), 2);
        assert_eq!(cache.len().await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_cache_lazy_expiry() {
        let cache = InMemoryCache::new();
        let k = key(&["A"]);
        cache.put(k.clone(), Vec::new()).await.unwrap();

        tokio::time::advance(TTL + Duration::from_millis(1)).await;

        // Stale entries read as absent but are not swept
        assert!(cache.get(&k, TTL).await.unwrap().is_none());
        assert_eq!(cache.len().await.unwrap(), 1);

        // A longer TTL still sees the entry
        assert!(cache.get(&k, TTL * 2).await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_memory_cache_invalidate_stale() {
        let cache = InMemoryCache::new();
        cache.put(key(&["OLD"]), Vec::new()).await.unwrap();

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        cache.put(key(&["NEW"]), Vec::new()).await.unwrap();

        let removed = cache.invalidate_stale(TTL).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(cache.len().await.unwrap(), 1);
        assert!(cache.get(&key(&["NEW"]), TTL).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_memory_cache_clear() {
        let cache = InMemoryCache::new();
        cache.put(key(&["A"]), Vec::new()).await.unwrap();
        cache.put(key(&["B"]), Vec::new()).await.unwrap();

        cache.clear().await.unwrap();

        assert_eq!(cache.len().await.unwrap(), 0);
        assert!(cache.get(&key(&["A"]), TTL).await.unwrap().is_none());
    }
}
