//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::NaiveDate;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Long form of an ISO date, e.g. `2023-11-05` becomes `November 5, 2023`.
/// Anything that is not an ISO date is passed through.
///
/// Usage in templates: `{{ bill.issue_date|date_long }}`
#[askama::filter_fn]
pub fn date_long(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_or(raw, format_date_long))
}

/// `November 5, 2023`.
#[must_use]
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
