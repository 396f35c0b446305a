//! Aggregations over loaded rows.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::Serialize;
use structural_core::{ConfigError, Status};

use crate::rows::Row;

/// Number of equal-width bins in the hardness histogram.
pub const HARDNESS_BINS: usize = 12;

/// Report knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportConfig {
    /// Width of the n ranges used for the prime ratio.
    pub bucket: u64,
    /// Entries kept in the top-k sections.
    pub topk: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig { bucket: 1000, topk: 40 }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket == 0 {
            return Err(ConfigError::ZeroBucket);
        }
        Ok(())
    }
}

/// A key with its occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Counted<K> {
    pub key: K,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketRatio {
    /// First n of the bucket.
    pub start: i64,
    pub total: u64,
    pub primes: u64,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardnessStats {
    pub count: u64,
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub histogram: Vec<HistogramBin>,
}

/// All report sections, in output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub config: ReportConfig,
    pub rows_loaded: usize,
    pub status_distribution: Vec<Counted<String>>,
    pub closest_band_all: Vec<Counted<String>>,
    pub closest_band_primes: Vec<Counted<String>>,
    pub composite_closure_d_topk: Vec<Counted<i64>>,
    pub prime_ratio_by_bucket: Vec<BucketRatio>,
    pub prime_pressure_closest_d_topk: Vec<Counted<i64>>,
    pub prime_hardness: Option<HardnessStats>,
}

/// Count keys, keeping first-occurrence order.
pub fn count_first_seen<K, I>(keys: I) -> Vec<Counted<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<Counted<K>> = Vec::new();
    for key in keys {
        match index.get(&key) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push(Counted { key, count: 1 });
            }
        }
    }
    counts
}

/// Most common first; equal counts keep first-occurrence order.
pub fn most_common<K>(mut counts: Vec<Counted<K>>, k: usize) -> Vec<Counted<K>> {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(k);
    counts
}

/// Count descending, then key ascending. Used for distribution listings.
pub fn by_count_then_key<K: Ord>(mut counts: Vec<Counted<K>>) -> Vec<Counted<K>> {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    counts
}

/// Start of the bucket holding `n`. Non-positive n fall in bucket 0.
pub fn bucket_start(n: i64, bucket: u64) -> i64 {
    let eff = if n > 0 { n - 1 } else { 0 };
    let width = i64::try_from(bucket).unwrap_or(i64::MAX);
    (eff / width) * width
}

fn band_key(row: &Row) -> String {
    match row.text("closest_band") {
        "" => "NA".to_string(),
        band => band.to_string(),
    }
}

pub fn prime_ratio_by_bucket(rows: &[Row], bucket: u64) -> Vec<BucketRatio> {
    let mut buckets: BTreeMap<i64, (u64, u64)> = BTreeMap::new();
    for row in rows {
        let Some(n) = row.int("n") else { continue };
        let entry = buckets.entry(bucket_start(n, bucket)).or_default();
        entry.0 += 1;
        if row.is_status(Status::StructuralPrime) {
            entry.1 += 1;
        }
    }
    buckets
        .into_iter()
        .map(|(start, (total, primes))| BucketRatio {
            start,
            total,
            primes,
            ratio: if total > 0 { primes as f64 / total as f64 } else { 0.0 },
        })
        .collect()
}

/// Summary stats plus an equal-width histogram over `[min, max]`.
///
/// A degenerate range is widened to `[v - 0.5, v + 0.5]`. The last bin is
/// closed on the right.
pub fn hardness_stats(values: &[f64], bins: usize) -> Option<HardnessStats> {
    if values.is_empty() || bins == 0 {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = values.iter().sum::<f64>() / values.len() as f64;

    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (hi - lo) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lo: lo + width * i as f64,
            hi: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for &v in values {
        let i = (((v - lo) / width) as usize).min(bins - 1);
        histogram[i].count += 1;
    }

    Some(HardnessStats {
        count: values.len() as u64,
        min,
        avg,
        max,
        histogram,
    })
}

/// Build every report section from loaded rows.
pub fn analyze(rows: &[Row], config: ReportConfig) -> Result<Report, ConfigError> {
    config.validate()?;

    let primes: Vec<&Row> = rows
        .iter()
        .filter(|r| r.is_status(Status::StructuralPrime))
        .collect();

    let status_distribution = by_count_then_key(count_first_seen(
        rows.iter().map(|r| r.text("status").to_string()),
    ));
    let closest_band_all = by_count_then_key(count_first_seen(rows.iter().map(band_key)));
    let closest_band_primes =
        by_count_then_key(count_first_seen(primes.iter().map(|r| band_key(r))));

    let composite_closure_d_topk = most_common(
        count_first_seen(
            rows.iter()
                .filter(|r| r.is_status(Status::Composite))
                .filter_map(|r| r.int("closure_d")),
        ),
        config.topk,
    );
    let prime_pressure_closest_d_topk = most_common(
        count_first_seen(primes.iter().filter_map(|r| r.int("closest_d"))),
        config.topk,
    );

    let hardness: Vec<f64> = primes.iter().filter_map(|r| r.float("hardness")).collect();

    log::debug!(
        "Analyzed {} rows ({} structural primes, {} hardness values)",
        rows.len(),
        primes.len(),
        hardness.len()
    );

    Ok(Report {
        config,
        rows_loaded: rows.len(),
        status_distribution,
        closest_band_all,
        closest_band_primes,
        composite_closure_d_topk,
        prime_ratio_by_bucket: prime_ratio_by_bucket(rows, config.bucket),
        prime_pressure_closest_d_topk,
        prime_hardness: hardness_stats(&hardness, HARDNESS_BINS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::parse_rows;
    use structural_core::delimited::Delimiter;

    fn sample_rows() -> Vec<Row> {
        let text = "\
n,status,closure_d,closest_d,closest_band,hardness
2,STRUCTURAL_PRIME,,,,
3,STRUCTURAL_PRIME,,,,
4,COMPOSITE,2,2,A,
5,STRUCTURAL_PRIME,,2,F,0.24
6,COMPOSITE,2,2,A,
7,STRUCTURAL_PRIME,,2,F,0.24
8,COMPOSITE,2,2,A,
9,COMPOSITE,3,3,A,
10,COMPOSITE,2,2,A,
11,STRUCTURAL_PRIME,,3,B,0.9
";
        parse_rows(text, Delimiter::Comma).unwrap()
    }

    #[test]
    fn test_count_first_seen_and_most_common() {
        let counts = count_first_seen(vec![7, 3, 7, 5, 3, 9]);
        assert_eq!(
            counts.iter().map(|c| (c.key, c.count)).collect::<Vec<_>>(),
            vec![(7, 2), (3, 2), (5, 1), (9, 1)]
        );
        let top = most_common(counts, 3);
        assert_eq!(
            top.iter().map(|c| (c.key, c.count)).collect::<Vec<_>>(),
            vec![(7, 2), (3, 2), (5, 1)]
        );
    }

    #[test]
    fn test_bucket_start() {
        assert_eq!(bucket_start(1, 1000), 0);
        assert_eq!(bucket_start(1000, 1000), 0);
        assert_eq!(bucket_start(1001, 1000), 1000);
        assert_eq!(bucket_start(0, 1000), 0);
        assert_eq!(bucket_start(-5, 1000), 0);
        assert_eq!(bucket_start(11, 5), 10);
    }

    #[test]
    fn test_analyze_sections() {
        let rows = sample_rows();
        let report = analyze(&rows, ReportConfig { bucket: 5, topk: 40 }).unwrap();
        assert_eq!(report.rows_loaded, 10);

        assert_eq!(report.status_distribution[0].key, "COMPOSITE");
        assert_eq!(report.status_distribution[0].count, 5);
        assert_eq!(report.status_distribution[1].count, 5);

        let all: Vec<(&str, u64)> = report
            .closest_band_all
            .iter()
            .map(|c| (c.key.as_str(), c.count))
            .collect();
        assert_eq!(all, vec![("A", 5), ("F", 2), ("NA", 2), ("B", 1)]);

        let primes: Vec<(&str, u64)> = report
            .closest_band_primes
            .iter()
            .map(|c| (c.key.as_str(), c.count))
            .collect();
        assert_eq!(primes, vec![("F", 2), ("NA", 2), ("B", 1)]);

        assert_eq!(report.composite_closure_d_topk[0], Counted { key: 2, count: 4 });
        assert_eq!(report.composite_closure_d_topk[1], Counted { key: 3, count: 1 });
        assert_eq!(report.prime_pressure_closest_d_topk[0], Counted { key: 2, count: 2 });
    }

    #[test]
    fn test_prime_ratio_by_bucket() {
        let rows = sample_rows();
        let ratios = prime_ratio_by_bucket(&rows, 5);
        // 2..=5 -> bucket 0, 6..=10 -> bucket 5, 11 -> bucket 10
        assert_eq!(ratios.len(), 3);
        assert_eq!((ratios[0].start, ratios[0].total, ratios[0].primes), (0, 4, 3));
        assert!((ratios[0].ratio - 0.75).abs() < 1e-12);
        assert_eq!((ratios[1].start, ratios[1].total, ratios[1].primes), (5, 5, 1));
        assert_eq!(ratios[2].start, 10);
        assert_eq!(ratios[2].ratio, 1.0);
    }

    #[test]
    fn test_hardness_stats() {
        let stats = hardness_stats(&[0.0, 0.6, 1.2], 12).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 1.2);
        assert!((stats.avg - 0.6).abs() < 1e-12);
        assert_eq!(stats.histogram.len(), 12);
        assert_eq!(stats.histogram.iter().map(|b| b.count).sum::<u64>(), 3);
        assert_eq!(stats.histogram[0].count, 1);
        assert_eq!(stats.histogram[11].count, 1);
        assert_eq!(stats.histogram[11].hi, 1.2);

        let flat = hardness_stats(&[0.24, 0.24], 12).unwrap();
        assert_eq!(flat.histogram.iter().map(|b| b.count).sum::<u64>(), 2);
        assert!(hardness_stats(&[], 12).is_none());
    }

    #[test]
    fn test_zero_bucket_rejected() {
        let rows = sample_rows();
        assert_eq!(
            analyze(&rows, ReportConfig { bucket: 0, topk: 5 }),
            Err(ConfigError::ZeroBucket)
        );
    }

    #[test]
    fn test_lenient_values_are_skipped() {
        let text = "n\tstatus\tclosure_d\tclosest_d\thardness\n\
                    x\tCOMPOSITE\tna\t\t\n\
                    7\tSTRUCTURAL_PRIME\t\tNA\tbad\n";
        let rows = parse_rows(text, Delimiter::Tab).unwrap();
        let report = analyze(&rows, ReportConfig::default()).unwrap();
        assert!(report.composite_closure_d_topk.is_empty());
        assert!(report.prime_pressure_closest_d_topk.is_empty());
        assert!(report.prime_hardness.is_none());
        assert_eq!(report.prime_ratio_by_bucket.len(), 1);
        assert_eq!(report.prime_ratio_by_bucket[0].total, 1);
    }
}
