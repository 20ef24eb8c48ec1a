//! BLS API wire types.

use econ_core::{DataError, ProviderResponse, Result, Series, SeriesId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Envelope status marking a successful request.
pub(crate) const REQUEST_SUCCEEDED: &str = "REQUEST_SUCCEEDED";

/// POST body for the timeseries endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct BlsRequestBody<'a> {
    seriesid: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    startyear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endyear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    registrationkey: Option<&'a str>,
}

impl<'a> BlsRequestBody<'a> {
    pub(crate) fn new(
        ids: &'a [SeriesId],
        start_year: Option<i32>,
        end_year: Option<i32>,
        credential: Option<&'a str>,
    ) -> Self {
        Self {
            seriesid: ids.iter().map(SeriesId::as_str).collect(),
            startyear: start_year.map(|y| y.to_string()),
            endyear: end_year.map(|y| y.to_string()),
            registrationkey: credential,
        }
    }

    pub(crate) fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| DataError::Parse(e.to_string()))
    }
}

/// Response envelope.
#[derive(Debug, Deserialize)]
struct BlsEnvelope {
    status: String,
    #[serde(rename = "responseTime", default)]
    response_time: Option<f64>,
    #[serde(default)]
    message: Vec<String>,
    #[serde(rename = "Results", default)]
    results: Option<BlsResults>,
}

#[derive(Debug, Deserialize)]
struct BlsResults {
    #[serde(default)]
    series: Vec<Series>,
}

/// Longest slice of an undecodable body carried into a parse error.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Leading part of `body`, cut at a character boundary.
fn body_excerpt(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

/// Interprets one batch response.
///
/// Non-2xx statuses and failed envelopes become errors; a successful envelope
/// without `Results` yields an empty list.
pub(crate) fn interpret(response: ProviderResponse) -> Result<Vec<Series>> {
    if !response.is_success() {
        return Err(DataError::ProviderHttp {
            status: response.status,
            status_text: response.status_text,
        });
    }

    let envelope: BlsEnvelope = serde_json::from_str(&response.body)
        .map_err(|e| DataError::Parse(format!("{e}: {}", body_excerpt(&response.body))))?;

    if envelope.status != REQUEST_SUCCEEDED {
        return Err(DataError::provider_api(&envelope.message));
    }

    if !envelope.message.is_empty() {
        debug!(messages = ?envelope.message, "Provider notes on successful request");
    }

    let series = envelope.results.map(|r| r.series).unwrap_or_default();
    debug!(
        series = series.len(),
        response_time_ms = envelope.response_time,
        "Decoded provider envelope"
    );
    Ok(series)
}
