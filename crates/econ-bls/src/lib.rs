#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/econ/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Bureau of Labor Statistics (BLS) time-series client.
//!
//! This crate implements a cached, retrying, batch-splitting client for the
//! [BLS public data API](https://www.bls.gov/developers/).
//!
//! # Usage
//!
//! ```rust,ignore
//! use econ_bls::BlsClient;
//! use econ_core::SeriesId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BlsClient::new()?;
//!
//!     let cpi = client
//!         .get_series(&SeriesId::new("CUUR0000SA0"), Some(2020), Some(2024), None)
//!         .await?;
//!
//!     if let Some(series) = cpi {
//!         println!("{} observations", series.data.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

use econ_cache::InMemoryCache;
use econ_core::{
    CacheKey, ClientConfig, ConfigOverrides, DataError, EnvSnapshot, HttpTransport,
    ProviderRequest, Result, Series, SeriesCache, SeriesId,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Retrying exchange with exponential backoff.
pub mod backoff;
/// Request partitioning into provider-legal batches.
pub mod batch;
mod envelope;
/// `reqwest`-backed transport.
pub mod transport;

#[cfg(test)]
mod test_support;

pub use backoff::BackoffFetcher;
pub use batch::{REGISTERED_BATCH_LIMIT, UNREGISTERED_BATCH_LIMIT, batch_limit, split};
pub use transport::ReqwestTransport;

use envelope::{BlsRequestBody, interpret};

/// Cached, retrying, batch-splitting BLS client.
///
/// The environment snapshot and client-level overrides are resolved once when
/// they are set; each call only layers its own overrides on top.
pub struct BlsClient {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<dyn SeriesCache>,
    env: EnvSnapshot,
    overrides: ConfigOverrides,
    resolved: ClientConfig,
}

impl fmt::Debug for BlsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlsClient")
            .field("config", &self.resolved)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl BlsClient {
    /// Creates a client over the real provider with an in-memory cache and the
    /// process environment.
    pub fn new() -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_transport(transport).set_env(EnvSnapshot::from_process()))
    }

    /// Creates a client with a custom transport, an empty in-memory cache and
    /// an empty environment.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            cache: Arc::new(InMemoryCache::new()),
            env: EnvSnapshot::default(),
            overrides: ConfigOverrides::default(),
            resolved: ClientConfig::default(),
        }
    }

    /// Set the cache for this client.
    #[must_use]
    pub fn set_cache(mut self, cache: Arc<dyn SeriesCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Set the environment snapshot configuration is resolved from.
    #[must_use]
    pub fn set_env(mut self, env: EnvSnapshot) -> Self {
        self.env = env;
        self.resolved = ClientConfig::resolve(&self.env, &self.overrides);
        self
    }

    /// Set client-level overrides, applied on top of the environment.
    #[must_use]
    pub fn set_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self.resolved = ClientConfig::resolve(&self.env, &self.overrides);
        self
    }

    /// Resolves the effective configuration, layering `call` overrides last.
    #[must_use]
    pub fn config(&self, call: Option<&ConfigOverrides>) -> ClientConfig {
        match call {
            Some(call) => self.resolved.with_overrides(call),
            None => self.resolved.clone(),
        }
    }

    /// Returns true if a provider credential is configured.
    #[must_use]
    pub fn is_credential_configured(&self) -> bool {
        self.config(None).has_credential()
    }

    /// Drops every cached result.
    pub async fn clear_cache(&self) -> Result<()> {
        self.cache.clear().await
    }

    /// Number of cached result sets, including ones that have expired but not
    /// been overwritten yet.
    pub async fn cache_size(&self) -> Result<usize> {
        self.cache.len().await
    }

    /// Fetches a single series.
    ///
    /// Returns `Ok(None)` when the provider answered successfully but did not
    /// include `id`.
    pub async fn get_series(
        &self,
        id: &SeriesId,
        start_year: Option<i32>,
        end_year: Option<i32>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Option<Series>> {
        let series = self
            .get_multiple_series(std::slice::from_ref(id), start_year, end_year, overrides)
            .await?;

        Ok(series.into_iter().find(|s| &s.series_id == id))
    }

    /// Fetches several series, splitting into batches as needed.
    ///
    /// Batches are sent one at a time in input order and their results are
    /// concatenated in the same order. The combined result is cached only when
    /// every batch succeeded.
    ///
    /// Returns [`DataError::InvalidParameter`] when both bounds are given and
    /// `start_year` is after `end_year`.
    #[instrument(skip(self, ids, overrides), fields(count = ids.len()))]
    pub async fn get_multiple_series(
        &self,
        ids: &[SeriesId],
        start_year: Option<i32>,
        end_year: Option<i32>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Vec<Series>> {
        if let (Some(start), Some(end)) = (start_year, end_year) {
            if start > end {
                return Err(DataError::InvalidParameter(format!(
                    "start year {start} is after end year {end}"
                )));
            }
        }

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let config = self.config(overrides);
        let key = CacheKey::new(ids, start_year, end_year);

        if config.cache_enabled {
            match self.cache.get(&key, config.cache_ttl).await {
                Ok(Some(entry)) => {
                    debug!(key = %key, "Serving series from cache");
                    return Ok(entry.result);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Cache lookup failed, fetching from provider"),
            }
        }

        let fetcher = BackoffFetcher::new(
            self.transport.as_ref(),
            config.max_retries,
            config.retry_base_delay,
        );
        let batches = split(ids, batch_limit(config.has_credential()));
        let mut result = Vec::with_capacity(ids.len());

        for (index, batch) in batches.iter().enumerate() {
            debug!(
                batch = index + 1,
                batches = batches.len(),
                size = batch.len(),
                "Requesting series batch"
            );

            let body = BlsRequestBody::new(
                batch,
                start_year,
                end_year,
                config.credential.as_deref(),
            )
            .to_json()?;
            let request = ProviderRequest::post_json(&config.base_url, body);

            let response = fetcher.exchange(&request).await?;
            result.extend(interpret(response)?);
        }

        if config.cache_enabled {
            if let Err(e) = self.cache.put(key, result.clone()).await {
                warn!(error = %e, "Failed to cache series result");
            }
        }

        Ok(result)
    }
}
