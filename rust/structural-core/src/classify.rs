//! Classification driver and the two composite-witness engines.
//!
//! Per integer, independently and in ascending order:
//!
//! ```text
//! n in {2, 3}             -> STRUCTURAL_PRIME, base prime
//! witness found           -> COMPOSITE with closure witness
//! no witness <= sqrt(n)   -> STRUCTURAL_PRIME with signature + hardness
//! ```

use num_integer::Integer;
use std::ops::RangeInclusive;

use crate::band::{hardness, invert_hardness};
use crate::closure::odd_closure_witness;
use crate::config::{Engine, RunConfig};
use crate::isqrt;
use crate::record::ClassificationRecord;
use crate::sieve::SpfTable;
use crate::signature::{closest_full, signature_for, signature_primes};

/// Which engine step produced a closure witness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Spf,
    Trial,
    Even,
}

/// An exact divisor proving `n` composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Witness {
    pub divisor: u64,
    pub provenance: Provenance,
}

/// Source of closure witnesses for integers >= 4.
pub trait WitnessProvider {
    /// Smallest divisor >= 2 of `n`, or `None` when `n` is prime.
    fn closure_witness(&self, n: u64) -> Option<Witness>;

    fn engine(&self) -> Engine;
}

/// Witnesses read from a smallest-prime-factor table.
#[derive(Debug, Clone)]
pub struct SieveEngine {
    spf: SpfTable,
}

impl SieveEngine {
    pub fn new(bound: u64) -> Self {
        log::info!("Building spf sieve up to {}", bound);
        SieveEngine {
            spf: SpfTable::new(bound),
        }
    }
}

impl WitnessProvider for SieveEngine {
    fn closure_witness(&self, n: u64) -> Option<Witness> {
        match self.spf.get(n) {
            Some(p) if p != n => Some(Witness {
                divisor: p,
                provenance: Provenance::Spf,
            }),
            Some(_) => None,
            // Past the table: answer the same question by trial division.
            None => TrialEngine.closure_witness(n),
        }
    }

    fn engine(&self) -> Engine {
        Engine::Spf
    }
}

/// Witnesses found by evenness, then odd trial division up to floor(sqrt(n)).
#[derive(Debug, Clone, Copy, Default)]
pub struct TrialEngine;

impl WitnessProvider for TrialEngine {
    fn closure_witness(&self, n: u64) -> Option<Witness> {
        if n.is_even() {
            return Some(Witness {
                divisor: 2,
                provenance: Provenance::Even,
            });
        }
        odd_closure_witness(n, isqrt(n)).map(|d| Witness {
            divisor: d,
            provenance: Provenance::Trial,
        })
    }

    fn engine(&self) -> Engine {
        Engine::Trial
    }
}

/// Classifies integers against a witness engine and a signature prime set.
///
/// All state is built up front and read-only afterwards, so records for
/// different `n` never depend on each other.
pub struct Classifier {
    provider: Box<dyn WitnessProvider>,
    sig_primes: Vec<u64>,
    sig_div_cap: u64,
    full_closest: bool,
    hardness_invert: bool,
}

impl Classifier {
    /// Build the engine selected by `config` over its whole range.
    pub fn new(config: &RunConfig) -> Self {
        let provider: Box<dyn WitnessProvider> = match config.engine {
            Engine::Spf => Box::new(SieveEngine::new(config.upper_bound())),
            Engine::Trial => Box::new(TrialEngine),
        };
        Self::with_provider(provider, config)
    }

    /// Use an explicit engine; `config.engine` is ignored.
    pub fn with_provider(provider: Box<dyn WitnessProvider>, config: &RunConfig) -> Self {
        let sig_div_cap = config.sig_div_cap();
        let sig_primes = signature_primes(sig_div_cap);
        log::debug!(
            "{} signature primes <= {} (engine {})",
            sig_primes.len(),
            sig_div_cap,
            provider.engine()
        );
        Classifier {
            provider,
            sig_primes,
            sig_div_cap,
            full_closest: config.full_closest,
            hardness_invert: config.hardness_invert,
        }
    }

    pub fn engine(&self) -> Engine {
        self.provider.engine()
    }

    pub fn sig_div_cap(&self) -> u64 {
        self.sig_div_cap
    }

    pub fn signature_primes(&self) -> &[u64] {
        &self.sig_primes
    }

    /// Classify a single integer `n >= 2`.
    ///
    /// 0 and 1 are outside the model; the engines do not agree on them.
    pub fn classify(&self, n: u64) -> ClassificationRecord {
        debug_assert!(n >= 2, "classify called with n={} (< 2)", n);
        if n == 2 || n == 3 {
            return ClassificationRecord::base_prime(n);
        }

        if let Some(witness) = self.provider.closure_witness(n) {
            return ClassificationRecord::composite(n, witness);
        }

        let limit_d = isqrt(n);
        let signature = signature_for(n, &self.sig_primes, limit_d.min(self.sig_div_cap));

        let closest = if self.full_closest {
            closest_full(n, limit_d)
        } else {
            signature.map(|s| s.closest)
        };
        let stats = signature.map(|s| s.stats);

        let mut h = hardness(closest.map(|p| p.a), stats.map(|s| s.s_energy));
        if self.hardness_invert {
            h = h.map(invert_hardness);
        }

        ClassificationRecord::structural_prime(n, closest, stats, h)
    }

    /// Classify every integer in `range` (values below 2 are skipped).
    pub fn classify_range(
        &self,
        range: RangeInclusive<u64>,
    ) -> impl Iterator<Item = ClassificationRecord> + '_ {
        let (start, end) = range.into_inner();
        (start.max(2)..=end).map(move |n| self.classify(n))
    }
}
