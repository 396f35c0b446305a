//! Per-integer classification records.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::band::Band;
use crate::classify::{Provenance, Witness};
use crate::signature::{Probe, SignatureStats};

/// Output field names, in emission order.
pub const FIELDS: [&str; 17] = [
    "n",
    "status",
    "closure_d",
    "closure_r",
    "closure_a",
    "closure_band",
    "closest_d",
    "closest_r",
    "closest_gap",
    "closest_g",
    "closest_a",
    "closest_band",
    "S_min",
    "S_avg",
    "S_energy",
    "hardness",
    "notes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    StructuralPrime,
    Composite,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::StructuralPrime => "STRUCTURAL_PRIME",
            Status::Composite => "COMPOSITE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a record's status was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    BasePrime,
    Closure(Provenance),
    NoClosure,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::BasePrime => f.write_str("base prime"),
            Note::Closure(Provenance::Spf) => f.write_str("closure witness (spf)"),
            Note::Closure(Provenance::Trial) => f.write_str("closure witness (trial)"),
            Note::Closure(Provenance::Even) => f.write_str("even closure"),
            Note::NoClosure => f.write_str("no closure up to floor(sqrt(n))"),
        }
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One classified integer.
///
/// `None` means "not computed" and is distinct from a computed zero: an
/// exact closure has `closure_r == Some(0)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationRecord {
    pub n: u64,
    pub status: Status,
    pub closure_d: Option<u64>,
    pub closure_r: Option<u64>,
    pub closure_a: Option<f64>,
    pub closure_band: Option<Band>,
    pub closest_d: Option<u64>,
    pub closest_r: Option<u64>,
    pub closest_gap: Option<u64>,
    pub closest_g: Option<f64>,
    pub closest_a: Option<f64>,
    pub closest_band: Option<Band>,
    #[serde(rename = "S_min")]
    pub s_min: Option<f64>,
    #[serde(rename = "S_avg")]
    pub s_avg: Option<f64>,
    #[serde(rename = "S_energy")]
    pub s_energy: Option<f64>,
    pub hardness: Option<f64>,
    pub notes: Note,
}

impl ClassificationRecord {
    /// 2 and 3: prime with nothing computed.
    pub fn base_prime(n: u64) -> Self {
        ClassificationRecord {
            n,
            status: Status::StructuralPrime,
            closure_d: None,
            closure_r: None,
            closure_a: None,
            closure_band: None,
            closest_d: None,
            closest_r: None,
            closest_gap: None,
            closest_g: None,
            closest_a: None,
            closest_band: None,
            s_min: None,
            s_avg: None,
            s_energy: None,
            hardness: None,
            notes: Note::BasePrime,
        }
    }

    /// Closed by an exact witness: closeness 1, zeroed signature fields.
    pub fn composite(n: u64, witness: Witness) -> Self {
        let exact = Probe::new(n, witness.divisor);
        let stats = SignatureStats::ZERO;
        ClassificationRecord {
            n,
            status: Status::Composite,
            closure_d: Some(exact.d),
            closure_r: Some(exact.r),
            closure_a: Some(exact.a),
            closure_band: Some(exact.band()),
            closest_d: Some(exact.d),
            closest_r: Some(exact.r),
            closest_gap: Some(exact.gap),
            closest_g: Some(exact.g),
            closest_a: Some(exact.a),
            closest_band: Some(exact.band()),
            s_min: Some(stats.s_min),
            s_avg: Some(stats.s_avg),
            s_energy: Some(stats.s_energy),
            hardness: None,
            notes: Note::Closure(witness.provenance),
        }
    }

    /// Survived closure search; carries whatever closeness data exists.
    pub fn structural_prime(
        n: u64,
        closest: Option<Probe>,
        stats: Option<SignatureStats>,
        hardness: Option<f64>,
    ) -> Self {
        ClassificationRecord {
            n,
            status: Status::StructuralPrime,
            closure_d: None,
            closure_r: None,
            closure_a: None,
            closure_band: None,
            closest_d: closest.map(|p| p.d),
            closest_r: closest.map(|p| p.r),
            closest_gap: closest.map(|p| p.gap),
            closest_g: closest.map(|p| p.g),
            closest_a: closest.map(|p| p.a),
            closest_band: closest.map(|p| p.band()),
            s_min: stats.map(|s| s.s_min),
            s_avg: stats.map(|s| s.s_avg),
            s_energy: stats.map(|s| s.s_energy),
            hardness,
            notes: Note::NoClosure,
        }
    }

    pub fn is_prime(&self) -> bool {
        self.status == Status::StructuralPrime
    }
}
