// 🧮 Field Coercion - tolerant cell parsers
//
// Contract: never fail. A cell that cannot be read degrades to zero / false /
// the caller's fallback date. FieldReader counts how often that happened so
// callers can see how much of a file was guessed.

use crate::columns::Aliases;
use crate::rows::Row;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Cell spellings that mean "no value" for numeric columns
const MISSING_MARKERS: [&str; 3] = ["na", "n/a", "none"];

const TRUTHY: [&str; 5] = ["true", "t", "yes", "y", "1"];
const FALSY: [&str; 5] = ["false", "f", "no", "n", "0"];

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

// ============================================================================
// SCALAR COERCION
// ============================================================================

fn is_missing(text: &str) -> bool {
    text.is_empty() || MISSING_MARKERS.iter().any(|m| text.eq_ignore_ascii_case(m))
}

fn strip_number(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, ',' | '$' | '%')).collect()
}

/// Strict float parse: `Some(0.0)` for missing markers, `None` if unparseable
///
/// Example: "$1,234.56" → Some(1234.56), "12.5%" → Some(12.5), "N/A" → Some(0.0), "abc" → None
pub fn try_float(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if is_missing(text) {
        return Some(0.0);
    }
    strip_number(text)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Tolerant float parse: anything unreadable is 0.0
pub fn to_float(raw: &str) -> f64 {
    try_float(raw).unwrap_or(0.0)
}

/// Strict integer parse (via float, truncated)
pub fn try_int(raw: &str) -> Option<i64> {
    try_float(raw).map(|v| v.trunc() as i64)
}

/// Tolerant integer parse: "1,200.9" → 1200, junk → 0
pub fn to_int(raw: &str) -> i64 {
    try_int(raw).unwrap_or(0)
}

/// Boolean parse: true|t|yes|y|1 (any case) → true, everything else → false
pub fn to_bool(raw: &str) -> bool {
    let text = raw.trim();
    TRUTHY.iter().any(|t| text.eq_ignore_ascii_case(t))
}

/// Whether a boolean cell used a recognized spelling at all
fn is_known_bool(raw: &str) -> bool {
    let text = raw.trim();
    TRUTHY
        .iter()
        .chain(FALSY.iter())
        .any(|t| text.eq_ignore_ascii_case(t))
}

/// Strict date parse
///
/// Tries ISO date, ISO date-time (several spellings, RFC 3339 included),
/// then US `MM/DD/YYYY`.
pub fn try_date(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(text, "%m/%d/%Y").ok()
}

/// Tolerant date parse with caller-supplied fallback
pub fn parse_date(raw: Option<&str>, fallback: NaiveDate) -> NaiveDate {
    raw.and_then(try_date).unwrap_or(fallback)
}

/// December 31st of a year token ("2024"), the default fiscal-year end
pub fn year_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MIN)
}

// ============================================================================
// FIELD READER (aliased lookups + diagnostics)
// ============================================================================

/// Reads typed values out of a [`Row`] through alias lists.
///
/// Absent columns are not a problem; a present, non-empty cell that could
/// not be parsed is, and bumps `fallback_count`.
pub struct FieldReader<'a> {
    row: &'a Row,
    fallbacks: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(row: &'a Row) -> Self {
        FieldReader { row, fallbacks: 0 }
    }

    pub fn row(&self) -> &'a Row {
        self.row
    }

    /// Number of present cells that degraded to a default so far
    pub fn fallback_count(&self) -> usize {
        self.fallbacks
    }

    pub fn text(&self, aliases: Aliases) -> Option<String> {
        self.row.first_owned(aliases)
    }

    pub fn text_or(&self, aliases: Aliases, default: &str) -> String {
        self.text(aliases).unwrap_or_else(|| default.to_string())
    }

    /// Float, `None` when no alias is present
    pub fn float_opt(&mut self, aliases: Aliases) -> Option<f64> {
        let raw = self.row.first(aliases)?;
        match try_float(raw) {
            Some(v) => Some(v),
            None => {
                self.degraded(aliases, raw);
                Some(0.0)
            }
        }
    }

    pub fn float(&mut self, aliases: Aliases) -> f64 {
        self.float_opt(aliases).unwrap_or(0.0)
    }

    pub fn int_opt(&mut self, aliases: Aliases) -> Option<i64> {
        let raw = self.row.first(aliases)?;
        match try_int(raw) {
            Some(v) => Some(v),
            None => {
                self.degraded(aliases, raw);
                Some(0)
            }
        }
    }

    pub fn int(&mut self, aliases: Aliases) -> i64 {
        self.int_opt(aliases).unwrap_or(0)
    }

    pub fn flag_or(&mut self, aliases: Aliases, default: bool) -> bool {
        match self.row.first(aliases) {
            Some(raw) => {
                if !is_known_bool(raw) {
                    self.degraded(aliases, raw);
                }
                to_bool(raw)
            }
            None => default,
        }
    }

    pub fn flag(&mut self, aliases: Aliases) -> bool {
        self.flag_or(aliases, false)
    }

    /// Date, `None` when absent or unparseable
    pub fn date_opt(&mut self, aliases: Aliases) -> Option<NaiveDate> {
        let raw = self.row.first(aliases)?;
        let parsed = try_date(raw);
        if parsed.is_none() {
            self.degraded(aliases, raw);
        }
        parsed
    }

    pub fn date(&mut self, aliases: Aliases, fallback: NaiveDate) -> NaiveDate {
        self.date_opt(aliases).unwrap_or(fallback)
    }

    fn degraded(&mut self, aliases: Aliases, raw: &str) {
        self.fallbacks += 1;
        tracing::trace!(column = aliases.primary(), value = raw, "cell fell back to default");
    }
}

// ============================================================================
// TESTS
// ============================================================================
