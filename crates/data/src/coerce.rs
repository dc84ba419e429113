//! Fail-soft coercion of raw extract values.
//!
//! Raw extracts come from spreadsheet exports, so numbers may arrive in
//! scientific notation or with thousands separators, dates in several
//! layouts, and plant codes with a trailing `.0`. Values that cannot be read
//! are coerced (numbers to 0, dates to empty) and counted per column.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y", "%Y/%m/%d"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
];

/// Parses a decimal, accepting plain, scientific, and comma-grouped forms.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .or_else(|| {
            raw.contains(',')
                .then(|| raw.replace(',', ""))
                .and_then(|plain| Decimal::from_str(&plain).ok())
        })
}

/// Parses a calendar date. Datetimes are truncated to their date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parses an integral code such as a valuation class (`"7800"` or `"7800.0"`).
#[must_use]
pub fn parse_integral(raw: &str) -> Option<i64> {
    parse_decimal(raw)
        .filter(|value| value.fract().is_zero())
        .and_then(|value| value.to_i64())
}

/// Normalizes a code column: trims, drops empties, and strips a trailing `.0`
/// left by numeric spreadsheet cells.
#[must_use]
pub fn normalize_code(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let code = raw.strip_suffix(".0").unwrap_or(raw);
    (!code.is_empty()).then(|| code.to_string())
}

/// Trims free text, mapping blank cells to `None`.
#[must_use]
pub fn clean_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Per-column counts of coerced values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoercionStats {
    coerced: BTreeMap<&'static str, usize>,
}

impl CoercionStats {
    /// Creates empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a required number; blank or malformed cells become 0 and are counted.
    pub fn decimal(&mut self, column: &'static str, raw: Option<&str>) -> Decimal {
        if let Some(value) = raw.and_then(parse_decimal) {
            value
        } else {
            self.bump(column);
            Decimal::ZERO
        }
    }

    /// Reads an optional number; blank stays `None`, malformed becomes 0 and is counted.
    pub fn optional_decimal(&mut self, column: &'static str, raw: Option<&str>) -> Option<Decimal> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
        Some(parse_decimal(raw).unwrap_or_else(|| {
            self.bump(column);
            Decimal::ZERO
        }))
    }

    /// Reads an optional date; blank stays `None`, malformed becomes `None` and is counted.
    pub fn date(&mut self, column: &'static str, raw: Option<&str>) -> Option<NaiveDate> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
        let parsed = parse_date(raw);
        if parsed.is_none() {
            self.bump(column);
        }
        parsed
    }

    /// Reads an optional integral code; malformed becomes `None` and is counted.
    pub fn integral(&mut self, column: &'static str, raw: Option<&str>) -> Option<i64> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
        let parsed = parse_integral(raw);
        if parsed.is_none() {
            self.bump(column);
        }
        parsed
    }

    fn bump(&mut self, column: &'static str) {
        *self.coerced.entry(column).or_default() += 1;
    }

    /// Number of coerced cells in `column`.
    #[must_use]
    pub fn count(&self, column: &str) -> usize {
        self.coerced.get(column).copied().unwrap_or(0)
    }

    /// Total coerced cells across all columns.
    #[must_use]
    pub fn total(&self) -> usize {
        self.coerced.values().sum()
    }

    /// Returns true if nothing was coerced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coerced.is_empty()
    }

    /// Iterates `(column, count)` in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.coerced.iter().map(|(column, count)| (*column, *count))
    }
}
