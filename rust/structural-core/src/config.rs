//! Run configuration.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::isqrt;

/// Errors raised while interpreting configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown engine '{0}' (expected spf or trial)")]
    UnknownEngine(String),

    #[error("unknown signature divisor mode '{0}' (expected fixed or adaptive)")]
    UnknownSigDivMode(String),

    #[error("unknown output format '{0}' (expected csv, tsv or jsonl)")]
    UnknownFormat(String),

    #[error("unknown run mode '{0}' (expected rows, summary or both)")]
    UnknownRunMode(String),

    #[error("bucket width must be positive")]
    ZeroBucket,
}

/// Composite-witness engine used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Smallest-prime-factor sieve over the whole range.
    #[default]
    Spf,
    /// Evenness check, then odd trial division up to floor(sqrt(n)).
    Trial,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Spf => "spf",
            Engine::Trial => "trial",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spf" | "sieve" => Ok(Engine::Spf),
            "trial" | "trial-division" | "trial_division" => Ok(Engine::Trial),
            _ => Err(ConfigError::UnknownEngine(s.to_string())),
        }
    }
}

/// How the signature divisor cap is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SigDivMode {
    /// Use `sig_div_max` as given.
    #[default]
    Fixed,
    /// min(sig_div_max, floor(sqrt(upper bound))).
    Adaptive,
}

impl SigDivMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SigDivMode::Fixed => "fixed",
            SigDivMode::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for SigDivMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SigDivMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(SigDivMode::Fixed),
            "adaptive" => Ok(SigDivMode::Adaptive),
            _ => Err(ConfigError::UnknownSigDivMode(s.to_string())),
        }
    }
}

/// Everything that shapes a classification run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunConfig {
    /// Inclusive upper bound of the range; values below 2 are raised to 2.
    pub max_n: i64,
    pub engine: Engine,
    pub sig_div_mode: SigDivMode,
    /// Largest signature divisor (before adaptive capping).
    pub sig_div_max: u64,
    /// Scan every divisor 2..=floor(sqrt(n)) for the closest record.
    pub full_closest: bool,
    /// Report 1 - hardness instead of hardness.
    pub hardness_invert: bool,
    /// Emit only n divisible by this stride (0 and 1 disable sampling).
    pub sample_every: u64,
    /// Stop after this many rows (0 = unlimited).
    pub max_rows: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            max_n: 50,
            engine: Engine::Spf,
            sig_div_mode: SigDivMode::Fixed,
            sig_div_max: 101,
            full_closest: false,
            hardness_invert: false,
            sample_every: 1,
            max_rows: 0,
        }
    }
}

impl RunConfig {
    /// Effective inclusive upper bound, never below 2.
    pub fn upper_bound(&self) -> u64 {
        self.max_n.max(2) as u64
    }

    /// Effective signature divisor cap.
    pub fn sig_div_cap(&self) -> u64 {
        match self.sig_div_mode {
            SigDivMode::Fixed => self.sig_div_max,
            SigDivMode::Adaptive => self.sig_div_max.min(isqrt(self.upper_bound())),
        }
    }

    /// Whether `n` passes the sampling stride.
    pub fn is_sampled(&self, n: u64) -> bool {
        self.sample_every <= 1 || n % self.sample_every == 0
    }
}
