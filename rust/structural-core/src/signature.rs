//! Signature divisors and closeness scoring.
//!
//! A probe of n by d measures how far n sits from the nearest multiple of d:
//!
//! ```text
//! r   = n mod d
//! gap = min(r, d - r)
//! g   = gap / d          in [0, 0.5]
//! a   = 1 - 2g           in [0, 1], a = 1 iff d | n
//! ```
//!
//! The signature of n is the closest probe over the small primes up to a
//! cap, plus min / mean / mean-square ("energy") of the normalized gaps.

use serde::Serialize;

use crate::band::{band_from_closeness, Band};
use crate::sieve::SpfTable;

/// Ascending primes <= `sig_div_cap`. Empty when the cap is below 2.
pub fn signature_primes(sig_div_cap: u64) -> Vec<u64> {
    if sig_div_cap < 2 {
        return Vec::new();
    }
    SpfTable::new(sig_div_cap).primes().collect()
}

/// Closeness of `n` to the nearest multiple of `d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probe {
    pub d: u64,
    pub r: u64,
    pub gap: u64,
    pub g: f64,
    pub a: f64,
}

impl Probe {
    /// Probe `n` by `d` (`d >= 1`).
    pub fn new(n: u64, d: u64) -> Self {
        let r = n % d;
        let gap = r.min(d - r);
        let g = gap as f64 / d as f64;
        let a = 1.0 - 2.0 * g;
        Probe { d, r, gap, g, a }
    }

    pub fn is_exact(&self) -> bool {
        self.r == 0
    }

    pub fn band(&self) -> Band {
        band_from_closeness(self.a)
    }
}

/// Aggregates over the normalized gaps of every probe made.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignatureStats {
    pub s_min: f64,
    pub s_avg: f64,
    pub s_energy: f64,
}

impl SignatureStats {
    /// Reported when an exact divisor short-circuits the scan.
    pub const ZERO: SignatureStats = SignatureStats {
        s_min: 0.0,
        s_avg: 0.0,
        s_energy: 0.0,
    };

    fn from_gaps(gaps: &[f64]) -> Self {
        let count = gaps.len() as f64;
        SignatureStats {
            s_min: gaps.iter().copied().fold(f64::INFINITY, f64::min),
            s_avg: gaps.iter().sum::<f64>() / count,
            s_energy: gaps.iter().map(|g| g * g).sum::<f64>() / count,
        }
    }
}

/// Closest signature probe plus gap aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Signature {
    pub closest: Probe,
    pub stats: SignatureStats,
    /// An exact signature divisor ended the scan early.
    pub exact: bool,
}

/// Score `n` against the signature primes not exceeding `limit_d`.
///
/// Returns `None` when no signature prime is eligible. An exact divisor
/// returns immediately with closeness 1 and zeroed aggregates; otherwise the
/// closest probe is the first one with minimal `g` (primes scan ascending,
/// so the smaller divisor wins ties).
pub fn signature_for(n: u64, sig_primes: &[u64], limit_d: u64) -> Option<Signature> {
    let mut best: Option<Probe> = None;
    let mut gaps = Vec::new();

    for &d in sig_primes {
        if d > limit_d {
            break;
        }

        let probe = Probe::new(n, d);
        if probe.is_exact() {
            return Some(Signature {
                closest: probe,
                stats: SignatureStats::ZERO,
                exact: true,
            });
        }

        gaps.push(probe.g);
        if best.map_or(true, |b| probe.g < b.g) {
            best = Some(probe);
        }
    }

    let closest = best?;
    Some(Signature {
        closest,
        stats: SignatureStats::from_gaps(&gaps),
        exact: false,
    })
}

/// Closest probe over every divisor in `2..=limit_d`, stopping at the first
/// exact divisor.
pub fn closest_full(n: u64, limit_d: u64) -> Option<Probe> {
    let mut best: Option<Probe> = None;
    for d in 2..=limit_d {
        let probe = Probe::new(n, d);
        if probe.is_exact() {
            return Some(probe);
        }
        if best.map_or(true, |b| probe.g < b.g) {
            best = Some(probe);
        }
    }
    best
}
