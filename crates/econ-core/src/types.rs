//! Core data types for economic time series.
//!
//! This module defines the fundamental data structures:
//!
//! - [`SeriesId`] - Opaque provider series identifier
//! - [`DataPoint`] - A single observation with provider-native text value
//! - [`Series`] - An ordered sequence of observations for one identifier
//! - [`Indicator`] - Display-ready series produced by the aggregation layer

use chrono::{DateTime, Utc};
use polars::prelude::{Column, DataFrame};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DataError, Result};

/// An opaque identifier naming one external time series.
///
/// Unlike ticker symbols, series ids are passed through verbatim; no case
/// normalisation is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    /// Creates a new series id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeriesId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SeriesId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A footnote attached to an observation.
///
/// The provider sends `[{}]` for observations without footnotes, so both
/// fields are optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    /// Footnote code (e.g. `"P"` for preliminary).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable footnote text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A single observation in a series.
///
/// `value` is kept as the provider's text so that formatting such as trailing
/// zeros survives re-serialisation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    /// Observation year, e.g. `"2024"`.
    pub year: String,
    /// Machine period code, e.g. `"M06"` or `"A01"`.
    pub period: String,
    /// Human label for the period, e.g. `"June"`.
    pub period_name: String,
    /// Observation value as provider text.
    pub value: String,
    /// Footnotes in provider order.
    #[serde(default)]
    pub footnotes: Vec<Footnote>,
    /// Set to `"true"` by the provider on the most recent observation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
}

impl DataPoint {
    /// Parses the text value, returning `None` for non-numeric placeholders
    /// such as `"-"`.
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        self.value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

/// A named, ordered sequence of observations.
///
/// Observation order is whatever the provider returned (normally most recent
/// first) and is never re-sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Series identifier.
    #[serde(rename = "seriesID")]
    pub series_id: SeriesId,
    /// Observations in provider order.
    #[serde(default)]
    pub data: Vec<DataPoint>,
}

impl Series {
    /// Creates a series from an id and its observations.
    #[must_use]
    pub fn new(series_id: impl Into<SeriesId>, data: Vec<DataPoint>) -> Self {
        Self {
            series_id: series_id.into(),
            data,
        }
    }

    /// Converts the observations into a DataFrame with columns
    /// `year`, `period`, `value`.
    ///
    /// Row order follows the provider order. Values that do not parse as
    /// numbers become nulls.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let years: Vec<&str> = self.data.iter().map(|p| p.year.as_str()).collect();
        let periods: Vec<&str> = self.data.iter().map(|p| p.period.as_str()).collect();
        let values: Vec<Option<f64>> = self.data.iter().map(DataPoint::numeric_value).collect();

        DataFrame::new(vec![
            Column::new("year".into(), years),
            Column::new("period".into(), periods),
            Column::new("value".into(), values),
        ])
        .map_err(|e| DataError::Parse(e.to_string()))
    }
}

/// Display-ready indicator built from one series.
///
/// Indicators are recomputed on every aggregation call and never cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    /// Source series id.
    pub id: SeriesId,
    /// Human-readable name.
    pub display_name: String,
    /// Observations in provider order.
    pub data: Vec<DataPoint>,
    /// When this indicator was produced.
    pub generated_at: DateTime<Utc>,
}

impl Indicator {
    /// Returns the most recent observation (the first in provider order).
    #[must_use]
    pub fn latest(&self) -> Option<&DataPoint> {
        self.data.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: &str, period: &str, value: &str) -> DataPoint {
        DataPoint {
            year: year.to_string(),
            period: period.to_string(),
            period_name: String::new(),
            value: value.to_string(),
            footnotes: Vec::new(),
            latest: None,
        }
    }

    #[test]
    fn test_series_id_is_not_normalised() {
        let id = SeriesId::new("cuur0000sa0");
        assert_eq!(id.as_str(), "cuur0000sa0");
    }

    #[test]
    fn test_deserialize_provider_series() {
        let json = r#"{
            "seriesID": "LNS14000000",
            "data": [
                {"year": "2024", "period": "M06", "periodName": "June", "latest": "true",
                 "value": "4.10", "footnotes": [{}]},
                {"year": "2024", "period": "M05", "periodName": "May",
                 "value": "4.0", "footnotes": [{"code": "P", "text": "preliminary"}]}
            ]
        }"#;

        let series: Series = serde_json::from_str(json).unwrap();
        assert_eq!(series.series_id, SeriesId::new("LNS14000000"));
        assert_eq!(series.data.len(), 2);
        assert_eq!(series.data[0].period_name, "June");
        assert_eq!(series.data[0].value, "4.10");
        assert_eq!(series.data[0].latest.as_deref(), Some("true"));
        assert_eq!(series.data[0].footnotes, vec![Footnote::default()]);
        assert_eq!(series.data[1].footnotes[0].code.as_deref(), Some("P"));
    }

    #[test]
    fn test_numeric_value_tolerates_placeholders() {
        assert_eq!(point("2024", "M01", "310.326").numeric_value(), Some(310.326));
        assert_eq!(point("2024", "M01", "-").numeric_value(), None);
        assert_eq!(point("2024", "M01", "").numeric_value(), None);
    }

    #[test]
    fn test_to_frame_keeps_provider_order() {
        let series = Series::new(
            "CUUR0000SA0",
            vec![point("2024", "M02", "311.054"), point("2024", "M01", "-")],
        );

        let df = series.to_frame().unwrap();
        assert_eq!(df.height(), 2);

        let periods = df.column("period").unwrap().str().unwrap();
        assert_eq!(periods.get(0), Some("M02"));
        assert_eq!(periods.get(1), Some("M01"));

        let values = df.column("value").unwrap().f64().unwrap();
        assert_eq!(values.get(0), Some(311.054));
        assert_eq!(values.get(1), None);
    }

    #[test]
    fn test_indicator_serializes_camel_case() {
        let indicator = Indicator {
            id: SeriesId::new("LNS14000000"),
            display_name: "Unemployment Rate".to_string(),
            data: vec![point("2024", "M06", "4.1")],
            generated_at: Utc::now(),
        };

        let json = serde_json::to_value(&indicator).unwrap();
        assert_eq!(json["id"], "LNS14000000");
        assert_eq!(json["displayName"], "Unemployment Rate");
        assert_eq!(json["data"][0]["periodName"], "");
        assert!(json.get("generatedAt").is_some());
        assert_eq!(indicator.latest().map(|p| p.period.as_str()), Some("M06"));
    }
}
