//! Loading emitted rows back from delimited text.
//!
//! Values are kept as text and parsed leniently on access: anything that is
//! empty, `na`, or not a number reads as absent.

use std::collections::HashMap;
use std::path::Path;

use structural_core::delimited::{parse_line, Delimiter};
use structural_core::Status;

use crate::ReportError;

/// One row keyed by header name.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Row {
            fields: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Raw trimmed text; empty when the column is missing.
    pub fn text(&self, key: &str) -> &str {
        self.fields.get(key).map(|s| s.trim()).unwrap_or("")
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        to_int(self.text(key))
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        to_float(self.text(key))
    }

    pub fn is_status(&self, status: Status) -> bool {
        self.text("status") == status.as_str()
    }
}

fn is_absent(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case("na")
}

/// Integer value, truncating anything after a decimal point.
pub fn to_int(s: &str) -> Option<i64> {
    let s = s.trim();
    if is_absent(s) {
        return None;
    }
    let whole = s.split_once('.').map(|(w, _)| w).unwrap_or(s);
    whole.parse().ok()
}

pub fn to_float(s: &str) -> Option<f64> {
    let s = s.trim();
    if is_absent(s) {
        return None;
    }
    s.parse().ok()
}

/// Parse delimited text whose first non-empty line is the header.
///
/// Blank lines are skipped. Short rows leave their missing columns empty.
/// Returns `None` when there is no header line.
pub fn parse_rows(text: &str, delim: Delimiter) -> Option<Vec<Row>> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = parse_line(lines.next()?, delim);

    let rows = lines
        .map(|line| {
            let values = parse_line(line, delim);
            Row::from_pairs(header.iter().cloned().zip(values))
        })
        .collect();
    Some(rows)
}

pub fn read_rows(path: &Path, delim: Delimiter) -> Result<Vec<Row>, ReportError> {
    let text = std::fs::read_to_string(path)?;
    let rows =
        parse_rows(&text, delim).ok_or_else(|| ReportError::MissingHeader(path.to_path_buf()))?;
    log::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
