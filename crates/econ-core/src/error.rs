//! Error types for series acquisition.
//!
//! This module defines [`DataError`] which covers every failure a series
//! request can surface to its caller. Absence (an unmapped entity, a series id
//! missing from a successful response) is never an error.

use thiserror::Error;

/// Errors that can occur while fetching or caching series data.
#[derive(Error, Debug)]
pub enum DataError {
    /// Every attempt failed with a network fault or provider throttling.
    #[error("Transient failure after {attempts} attempt(s): {cause}")]
    TransientFailure {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// Description of the last failure observed.
        cause: String,
    },

    /// The provider answered with a non-2xx HTTP status.
    #[error("Provider HTTP error {status}: {status_text}")]
    ProviderHttp {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
    },

    /// The provider answered 2xx but reported a failure in its envelope.
    #[error("Provider API error: {messages}")]
    ProviderApi {
        /// Provider messages joined with `"; "`.
        messages: String,
    },

    /// The response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error interacting with the cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A client could not be constructed from its configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DataError {
    /// Builds a [`DataError::ProviderApi`] from the provider's message list.
    #[must_use]
    pub fn provider_api(messages: &[String]) -> Self {
        Self::ProviderApi {
            messages: messages.join("; "),
        }
    }
}

/// Result type alias using [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;
