//! No-op cache implementation.

use async_trait::async_trait;
use econ_core::{CacheEntry, CacheKey, Result, Series, SeriesCache};
use std::time::Duration;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get` always returns `Ok(None)` and `put` discards its input. Useful for
/// wiring clients that must never cache, or for exercising the miss path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SeriesCache for NoopCache {
    async fn get(&self, _key: &CacheKey, _ttl: Duration) -> Result<Option<CacheEntry>> {
        trace!("NoopCache: get called, returning None");
        Ok(None)
    }

    async fn put(&self, _key: CacheKey, _result: Vec<Series>) -> Result<()> {
        trace!("NoopCache: put called, doing nothing");
        Ok(())
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use econ_core::SeriesId;

    #[tokio::test]
    async fn test_noop_cache_never_stores() {
        let cache = NoopCache::new();
        let key = CacheKey::new(&[SeriesId::new("A")], None, None);

        cache
            .put(key.clone(), vec![Series::new("A", Vec::new())])
            .await
            .unwrap();

        assert!(
            cache
                .get(&key, Duration::from_secs(60))
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(cache.len().await.unwrap(), 0);
        assert_eq!(
            cache.invalidate_stale(Duration::ZERO).await.unwrap(),
            0
        );
        cache.clear().await.unwrap();
    }
}
