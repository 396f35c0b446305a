//! Scaling runs for the classification engines.
//!
//! Classifies 2..=N for increasing N under each engine and signature mode,
//! printing wall time and prime counts so the engines can be compared and
//! checked against each other.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use structural_core::{
    closest_full, isqrt, signature_for, signature_primes, Classifier, Engine, RunConfig,
    SigDivMode, SpfTable,
};

const BOUNDS: [i64; 5] = [1_000, 10_000, 100_000, 300_000, 1_000_000];

fn main() {
    env_logger::init();

    println!("================================================================");
    println!("  SCALING: structural primality engines");
    println!("================================================================\n");

    bench_engines();
    bench_signature_caps();
    bench_full_closest();
}

fn count_primes(config: &RunConfig) -> (u64, u128) {
    let start = Instant::now();
    let classifier = Classifier::new(config);
    let primes = classifier
        .classify_range(2..=config.upper_bound())
        .filter(|rec| rec.is_prime())
        .count() as u64;
    (primes, start.elapsed().as_millis())
}

// ============================================================================
// Sieve vs trial division
// ============================================================================

fn bench_engines() {
    println!("  Sieve vs trial division over 2..=N");
    println!(
        "  {:>9} {:>10} {:>10} {:>10} {:>10} {:>8}",
        "N", "spf_ms", "trial_ms", "primes", "sieve", "agree"
    );
    println!("  {}", "-".repeat(62));

    for max_n in BOUNDS {
        let (spf_primes, spf_ms) = count_primes(&RunConfig {
            max_n,
            engine: Engine::Spf,
            ..RunConfig::default()
        });
        let (trial_primes, trial_ms) = count_primes(&RunConfig {
            max_n,
            engine: Engine::Trial,
            ..RunConfig::default()
        });
        let bound = max_n as u64;
        let (sieve_primes, _) = SpfTable::new(bound).prime_composite_counts(bound);

        let agree = spf_primes == trial_primes && spf_primes == sieve_primes;
        if !agree {
            log::warn!(
                "engine mismatch at N={}: spf={} trial={} sieve={}",
                max_n,
                spf_primes,
                trial_primes,
                sieve_primes
            );
        }
        println!(
            "  {:>9} {:>10} {:>10} {:>10} {:>10} {:>8}",
            max_n,
            spf_ms,
            trial_ms,
            spf_primes,
            sieve_primes,
            if agree { "yes" } else { "NO" }
        );
    }
    println!();
}

// ============================================================================
// Signature divisor cap
// ============================================================================

fn bench_signature_caps() {
    println!("  Signature scoring on random n in [10^6, 10^7)");
    println!(
        "  {:>10} {:>8} {:>10} {:>10} {:>10}",
        "cap", "#primes", "total_us", "exact", "avg_g"
    );
    println!("  {}", "-".repeat(54));

    let mut rng = StdRng::seed_from_u64(12345);
    let targets: Vec<u64> = (0..2_000).map(|_| rng.gen_range(1_000_000..10_000_000)).collect();

    for cap in [11u64, 101, 1_009, 3_163] {
        let primes = signature_primes(cap);
        let start = Instant::now();
        let mut exact = 0u64;
        let mut g_sum = 0.0;
        let mut scored = 0u64;
        for &n in &targets {
            if let Some(sig) = signature_for(n, &primes, cap.min(isqrt(n))) {
                scored += 1;
                g_sum += sig.closest.g;
                if sig.exact {
                    exact += 1;
                }
            }
        }
        let elapsed = start.elapsed().as_micros();
        let avg_g = if scored > 0 { g_sum / scored as f64 } else { 0.0 };
        println!(
            "  {:>10} {:>8} {:>10} {:>10} {:>10.4}",
            cap,
            primes.len(),
            elapsed,
            exact,
            avg_g
        );
    }
    println!();

    println!("  Fixed vs adaptive cap over 2..=N (spf engine)");
    println!("  {:>9} {:>10} {:>12}", "N", "fixed_ms", "adaptive_ms");
    println!("  {}", "-".repeat(34));
    for max_n in [10_000i64, 100_000] {
        let (_, fixed_ms) = count_primes(&RunConfig {
            max_n,
            sig_div_mode: SigDivMode::Fixed,
            ..RunConfig::default()
        });
        let (_, adaptive_ms) = count_primes(&RunConfig {
            max_n,
            sig_div_mode: SigDivMode::Adaptive,
            ..RunConfig::default()
        });
        println!("  {:>9} {:>10} {:>12}", max_n, fixed_ms, adaptive_ms);
    }
    println!();
}

// ============================================================================
// Full closest scan
// ============================================================================

fn bench_full_closest() {
    println!("  Full closest scan vs signature-only closest on primes");
    println!(
        "  {:>9} {:>10} {:>12} {:>10}",
        "N", "sig_ms", "full_ms", "improved"
    );
    println!("  {}", "-".repeat(46));

    for max_n in [10_000u64, 50_000] {
        let table = SpfTable::new(max_n);
        let primes: Vec<u64> = table.primes().filter(|&p| p > 3).collect();
        let sig_primes = signature_primes(101);

        let start = Instant::now();
        let sig_g: Vec<Option<f64>> = primes
            .iter()
            .map(|&p| signature_for(p, &sig_primes, 101u64.min(isqrt(p))).map(|s| s.closest.g))
            .collect();
        let sig_ms = start.elapsed().as_millis();

        let start = Instant::now();
        let full_g: Vec<Option<f64>> = primes
            .iter()
            .map(|&p| closest_full(p, isqrt(p)).map(|probe| probe.g))
            .collect();
        let full_ms = start.elapsed().as_millis();

        let improved = sig_g
            .iter()
            .zip(&full_g)
            .filter(|(s, f)| matches!((s, f), (Some(s), Some(f)) if f < s))
            .count();
        println!("  {:>9} {:>10} {:>12} {:>10}", max_n, sig_ms, full_ms, improved);
    }
    println!();
}
