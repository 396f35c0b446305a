//! Row and summary emission for structural primality runs.
//!
//! Rows follow the fixed field order in [`structural_core::FIELDS`]; absent
//! values are written as empty fields (or JSON `null`), never as zero.

pub mod rows;
pub mod summary;

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use structural_core::delimited::Delimiter;
use structural_core::ConfigError;

pub use rows::{row_fields, write_rows};
pub use summary::write_summary;

/// Errors raised while writing rows or summaries.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Row output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    /// One JSON object per line, no header.
    Jsonl,
}

impl OutputFormat {
    pub fn delimiter(&self) -> Option<Delimiter> {
        match self {
            OutputFormat::Csv => Some(Delimiter::Comma),
            OutputFormat::Tsv => Some(Delimiter::Tab),
            OutputFormat::Jsonl => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

/// What a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Rows,
    Summary,
    Both,
}

impl RunMode {
    pub fn wants_rows(&self) -> bool {
        matches!(self, RunMode::Rows | RunMode::Both)
    }

    pub fn wants_summary(&self) -> bool {
        matches!(self, RunMode::Summary | RunMode::Both)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Rows => write!(f, "rows"),
            RunMode::Summary => write!(f, "summary"),
            RunMode::Both => write!(f, "both"),
        }
    }
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rows" => Ok(RunMode::Rows),
            "summary" => Ok(RunMode::Summary),
            "both" => Ok(RunMode::Both),
            _ => Err(ConfigError::UnknownRunMode(s.to_string())),
        }
    }
}

/// Open `path` for buffered writing (creating parent directories), or stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, EmitError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}
