//! Cache trait for storing fetched series.
//!
//! This module defines the [`SeriesCache`] trait, the canonical [`CacheKey`]
//! derived from a request, and the [`CacheEntry`] stored under it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

use crate::{
    error::Result,
    types::{Series, SeriesId},
};

/// Canonical signature of a series request.
///
/// Built from the sorted id set and the optional year bounds, so requests for
/// the same ids in a different order map to the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for a request.
    #[must_use]
    pub fn new(ids: &[SeriesId], start_year: Option<i32>, end_year: Option<i32>) -> Self {
        let mut sorted: Vec<&str> = ids.iter().map(SeriesId::as_str).collect();
        sorted.sort_unstable();

        // Ids are opaque, so each one is length-prefixed to keep separators
        // inside an id from aliasing another id set.
        let mut key = String::new();
        for id in sorted {
            key.push_str(&format!("{}:{id},", id.len()));
        }

        let bound = |year: Option<i32>| year.map(|y| y.to_string()).unwrap_or_default();
        Self(format!("{key}|{}|{}", bound(start_year), bound(end_year)))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A complete result set stored under one [`CacheKey`].
///
/// Entries are replaced wholesale and never mutated in place.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    /// The series returned for the request, in request order.
    pub result: Vec<Series>,
    /// Wall-clock time the entry was created.
    pub created_at: DateTime<Utc>,
    stored: Instant,
}

impl CacheEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(result: Vec<Series>) -> Self {
        Self {
            result,
            created_at: Utc::now(),
            stored: Instant::now(),
        }
    }

    /// Age of the entry on the monotonic clock.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.stored.elapsed()
    }

    /// Returns true while the entry's age does not exceed `ttl`.
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() <= ttl
    }
}

/// Trait for caching complete series result sets.
///
/// Implementations only ever hold results of fully successful fetches.
#[async_trait]
pub trait SeriesCache: Send + Sync + fmt::Debug {
    /// Retrieves the entry for `key` if one exists and is no older than `ttl`.
    ///
    /// Stale entries behave as absent; no background sweep is required.
    async fn get(&self, key: &CacheKey, ttl: Duration) -> Result<Option<CacheEntry>>;

    /// Stores `result` under `key`, replacing any existing entry.
    async fn put(&self, key: CacheKey, result: Vec<Series>) -> Result<()>;

    /// Removes entries older than `ttl`.
    ///
    /// Returns the number of entries removed.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;

    /// Number of entries currently held, stale or not.
    async fn len(&self) -> Result<usize>;

    /// Returns true if the cache holds no entries.
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
