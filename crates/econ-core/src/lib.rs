#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/econ/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for economic time-series clients.
//!
//! This crate provides the foundational abstractions shared by the cache,
//! provider and aggregation crates:
//!
//! - [`SeriesCache`](cache::SeriesCache) - TTL-aware result-set cache
//! - [`HttpTransport`](transport::HttpTransport) - Outbound HTTP exchange seam
//! - [`ClientConfig`](config::ClientConfig) - Resolved client configuration
//! - [`Series`](types::Series), [`DataPoint`](types::DataPoint),
//!   [`Indicator`](types::Indicator) - Data model

/// Cache trait, cache key and cache entry.
pub mod cache;
/// Configuration resolution from defaults, environment and overrides.
pub mod config;
/// Error types for series operations.
pub mod error;
/// Outbound HTTP transport abstraction.
pub mod transport;
/// Core data types (SeriesId, DataPoint, Series, Indicator).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{CacheEntry, CacheKey, SeriesCache};
pub use config::{ClientConfig, ConfigOverrides, EnvSnapshot};
pub use error::{DataError, Result};
pub use transport::{HttpMethod, HttpTransport, ProviderRequest, ProviderResponse, TransportError};
pub use types::{DataPoint, Footnote, Indicator, Series, SeriesId};
