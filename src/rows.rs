// 📄 Row parsing - CSV text → header→value rows
//
// Source exports come from many hands: BOM-prefixed, Excel-encoded, ragged.
// Nothing in here fails; bad records are counted and dropped.

use crate::columns::Aliases;
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;

// ============================================================================
// ROW
// ============================================================================

/// One data row: trimmed header name → trimmed cell value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used heavily by tests: `Row::new().set("name", "Jane")`
    pub fn set(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(header, value);
        self
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(header.into(), value.into());
    }

    /// Raw lookup of one column (present, possibly empty)
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields.get(header).map(String::as_str)
    }

    /// First present and non-empty value across an ordered alias list
    pub fn first(&self, aliases: Aliases) -> Option<&str> {
        aliases
            .names()
            .iter()
            .filter_map(|name| self.get(name))
            .find(|value| !value.is_empty())
    }

    /// Like [`Row::first`], returning an owned string
    pub fn first_owned(&self, aliases: Aliases) -> Option<String> {
        self.first(aliases).map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|v| v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Result of parsing one CSV object
#[derive(Debug, Clone, Default)]
pub struct ParsedRows {
    pub rows: Vec<Row>,
    /// Records the csv reader could not decode (skipped)
    pub malformed: usize,
}

/// Decode object bytes: UTF-8 first, Windows-1252 for Excel-style exports
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Parse CSV text with a header row into [`Row`]s
///
/// - Header names and values are trimmed
/// - A leading UTF-8 BOM is ignored
/// - Short rows are tolerated (missing trailing cells are simply absent)
/// - Rows where every cell is empty are dropped
pub fn parse_csv(text: &str) -> ParsedRows {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(|s| s.trim().to_string()).collect(),
        Err(_) => return ParsedRows::default(),
    };

    let mut parsed = ParsedRows::default();
    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed csv record");
                parsed.malformed += 1;
                continue;
            }
        };

        let row: Row = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, value)| (header.clone(), value.trim().to_string()))
            .collect();

        if !row.is_empty() {
            parsed.rows.push(row);
        }
    }

    parsed
}

// ============================================================================
// TESTS
// ============================================================================
