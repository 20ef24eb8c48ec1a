#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/econ/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Economic enrichment for career entities.
//!
//! This crate ties the BLS client to a static entity-to-series table and
//! reshapes results into display-ready indicators. It re-exports the core
//! types, the cache implementations and the client.
//!
//! # Example
//!
//! ```rust,ignore
//! #[tokio::main]
//! async fn main() -> econ::Result<()> {
//!     let service = econ::global::service()?;
//!
//!     for indicator in service.economic_data_for("15-1252").await? {
//!         let latest = indicator.latest().map(|p| econ::format_value(&p.value));
//!         println!("{}: {:?}", indicator.display_name, latest);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use econ_core::*;

// Cache implementations
pub use econ_cache::{InMemoryCache, NoopCache};

// Provider client
pub use econ_bls::{BlsClient, ReqwestTransport};

/// Display formatting helpers.
pub mod format;
/// Process-wide client accessor.
pub mod global;
/// Entity-to-series mapping.
pub mod mapping;
/// Aggregation service.
pub mod service;

pub use format::format_value;
pub use mapping::{EntitySeriesMapping, SeriesMapper, SeriesRole, StaticSeriesMapper, mapping_for};
pub use service::EconomicDataService;
