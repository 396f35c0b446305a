//! Prime/composite totals and the closest-band histogram over primes.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::band::Band;
use crate::classify::{Classifier, SieveEngine};
use crate::config::RunConfig;
use crate::record::{ClassificationRecord, Status};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub prime_count: u64,
    pub composite_count: u64,
    /// Closest band of every structural prime that has one. All six bands
    /// are always present.
    pub band_counts: BTreeMap<Band, u64>,
}

impl Default for Summary {
    fn default() -> Self {
        Summary {
            prime_count: 0,
            composite_count: 0,
            band_counts: Band::ALL.iter().map(|&b| (b, 0)).collect(),
        }
    }
}

impl Summary {
    pub fn record(&mut self, rec: &ClassificationRecord) {
        match rec.status {
            Status::Composite => self.composite_count += 1,
            Status::StructuralPrime => {
                self.prime_count += 1;
                if let Some(band) = rec.closest_band {
                    *self.band_counts.entry(band).or_insert(0) += 1;
                }
            }
        }
    }

    pub fn band_count(&self, band: Band) -> u64 {
        self.band_counts.get(&band).copied().unwrap_or(0)
    }
}

/// Summarize the whole range of `config` with the sieve engine.
///
/// Sampling and the row cap do not apply; the engine choice in `config` is
/// ignored.
pub fn summarize(config: &RunConfig) -> Summary {
    let upper = config.upper_bound();
    let classifier = Classifier::with_provider(Box::new(SieveEngine::new(upper)), config);
    let mut summary = Summary::default();
    for rec in classifier.classify_range(2..=upper) {
        summary.record(&rec);
    }
    log::info!(
        "Summary over 2..={}: {} primes, {} composites",
        upper,
        summary.prime_count,
        summary.composite_count
    );
    summary
}
