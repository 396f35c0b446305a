//! Post-hoc report over emitted classification rows.
//!
//! Rows are loaded from CSV or TSV, aggregated into seven sections, and
//! written as chart-ready TSV tables plus a text summary and a JSON dump.

pub mod analysis;
pub mod output;
pub mod rows;

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use structural_core::delimited::Delimiter;
use structural_core::ConfigError;

pub use analysis::{analyze, Counted, HardnessStats, Report, ReportConfig};
pub use output::{write_report, ReportFiles};
pub use rows::{read_rows, to_float, to_int, Row};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rows file {} has no header line", .0.display())]
    MissingHeader(PathBuf),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Input encoding of the rows file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowsFormat {
    Csv,
    #[default]
    Tsv,
}

impl RowsFormat {
    pub fn delimiter(&self) -> Delimiter {
        match self {
            RowsFormat::Csv => Delimiter::Comma,
            RowsFormat::Tsv => Delimiter::Tab,
        }
    }
}

impl FromStr for RowsFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(RowsFormat::Csv),
            "tsv" => Ok(RowsFormat::Tsv),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}
