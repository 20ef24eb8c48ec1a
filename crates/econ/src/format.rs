//! Display formatting for provider values.

/// Formats a provider value with two decimals.
///
/// Text that does not parse as a finite number (for example the provider's
/// `"-"` placeholder) is returned unchanged.
#[must_use]
pub fn format_value(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{value:.2}"),
        _ => raw.to_string(),
    }
}
