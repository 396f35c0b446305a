//! Structural primality: divisor-closeness classification of integers.
//!
//! Every integer n >= 2 in a range is either closed by an exact small
//! divisor (COMPOSITE, with its closure witness) or survives every divisor
//! up to floor(sqrt(n)) (STRUCTURAL_PRIME). Survivors are scored by how
//! close they come to being divisible by each small "signature" prime.
//!
//! Two interchangeable witness engines are provided:
//! - the sieve engine reads the smallest prime factor from a precomputed table
//! - the trial engine checks evenness, then trial-divides odd candidates
//!
//! Both must agree on the status of every integer in their shared range.

pub mod band;
pub mod classify;
pub mod closure;
pub mod config;
pub mod delimited;
pub mod record;
pub mod sieve;
pub mod signature;
pub mod summary;

use num_integer::Roots;

pub use band::{band_from_closeness, clamp01, hardness, invert_hardness, Band};
pub use classify::{Classifier, Provenance, SieveEngine, TrialEngine, Witness, WitnessProvider};
pub use closure::{odd_closure_witness, smallest_divisor};
pub use config::{ConfigError, Engine, RunConfig, SigDivMode};
pub use record::{ClassificationRecord, Note, Status, FIELDS};
pub use sieve::SpfTable;
pub use signature::{closest_full, signature_for, signature_primes, Probe, Signature, SignatureStats};
pub use summary::{summarize, Summary};

/// Integer square root: floor(sqrt(n)).
pub fn isqrt(n: u64) -> u64 {
    n.sqrt()
}
