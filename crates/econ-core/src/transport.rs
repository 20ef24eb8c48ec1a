//! Transport seam for outbound HTTP exchanges.
//!
//! Clients build a [`ProviderRequest`] and hand it to an [`HttpTransport`].
//! Transports report only whether the exchange completed; status handling and
//! payload interpretation are left to the caller.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// HTTP method of an outbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl HttpMethod {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully formed outbound call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Request body, if any.
    pub body: Option<String>,
}

impl ProviderRequest {
    /// Creates a JSON `POST` request.
    #[must_use]
    pub fn post_json(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body.into()),
        }
    }
}

/// A completed exchange: status line plus body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase for the status.
    pub status_text: String,
    /// Response body.
    pub body: String,
}

impl ProviderResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the provider signalled throttling (HTTP 429).
    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        self.status == 429
    }
}

/// The exchange could not complete (connection refused, reset, timeout, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Transport error: {0}")]
pub struct TransportError(pub String);

/// Performs one HTTP exchange.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Sends `request` and returns whatever the server answered.
    async fn send(&self, request: &ProviderRequest) -> Result<ProviderResponse, TransportError>;
}
