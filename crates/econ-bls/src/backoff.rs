//! Retrying HTTP exchange with exponential backoff.
//!
//! [`BackoffFetcher`] retries transport failures and HTTP 429 responses,
//! sleeping `base_delay * 2^attempt_index` between attempts. Every other
//! response, successful or not, is handed back untouched.

use econ_core::{DataError, HttpTransport, ProviderRequest, ProviderResponse, Result};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Performs one logical exchange, retrying transient failures.
#[derive(Debug, Clone, Copy)]
pub struct BackoffFetcher<'a> {
    transport: &'a dyn HttpTransport,
    max_attempts: u32,
    base_delay: Duration,
}

impl<'a> BackoffFetcher<'a> {
    /// Creates a fetcher making at most `max_attempts` attempts (minimum 1).
    #[must_use]
    pub fn new(transport: &'a dyn HttpTransport, max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            transport,
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay slept after the failed attempt at `attempt_index` (zero-based).
    ///
    /// No jitter, no cap.
    #[must_use]
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt_index))
    }

    /// Sends `request`, retrying on transport errors and throttling.
    ///
    /// Returns [`DataError::TransientFailure`] once all attempts are spent.
    pub async fn exchange(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        let mut last_cause = String::new();

        for attempt in 0..self.max_attempts {
            match self.transport.send(request).await {
                Ok(response) if response.is_throttled() => {
                    last_cause = format!("HTTP {} {}", response.status, response.status_text);
                }
                Ok(response) => {
                    debug!(
                        status = response.status,
                        attempt = attempt + 1,
                        "Provider exchange completed"
                    );
                    return Ok(response);
                }
                Err(e) => last_cause = e.to_string(),
            }

            if attempt + 1 < self.max_attempts {
                let delay = self.delay_for(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = self.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    cause = %last_cause,
                    "Transient provider failure, backing off"
                );
                sleep(delay).await;
            }
        }

        warn!(
            attempts = self.max_attempts,
            cause = %last_cause,
            "Provider exchange failed after all attempts"
        );
        Err(DataError::TransientFailure {
            attempts: self.max_attempts,
            cause: last_cause,
        })
    }
}
