#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/econ/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for economic time-series clients.
//!
//! This crate provides implementations of the [`SeriesCache`] trait from `econ-core`:
//!
//! - [`InMemoryCache`] - Process-local cache with lazy TTL expiry
//! - [`NoopCache`] - No-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use econ_core::SeriesCache;

// Re-export implementations
pub use memory::InMemoryCache;
pub use noop::NoopCache;
