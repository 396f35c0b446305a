//! Writing a [`Report`] to an output directory.
//!
//! Layout:
//!
//! ```text
//! <out_dir>/
//!   00_status_distribution.tsv
//!   ...
//!   06_prime_hardness_hist.tsv
//!   INDEX.txt
//!   REPORT.txt
//!   report.json
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use structural_core::delimited::{format_float, write_record, Delimiter};
use structural_core::Status;

use crate::analysis::{Counted, Report};
use crate::ReportError;

/// Paths produced by [`write_report`].
#[derive(Debug, Clone, Default)]
pub struct ReportFiles {
    pub data: Vec<PathBuf>,
    pub index: PathBuf,
    pub report: PathBuf,
    pub json: PathBuf,
}

fn counted_table<K: ToString>(header: [&str; 2], counts: &[Counted<K>]) -> Vec<Vec<String>> {
    let mut table = vec![header.iter().map(|h| h.to_string()).collect()];
    table.extend(counts.iter().map(|c| vec![c.key.to_string(), c.count.to_string()]));
    table
}

/// Tab-separated tables, one per section, keyed by file stem.
pub fn section_tables(report: &Report) -> Vec<(&'static str, Vec<Vec<String>>)> {
    let mut ratio = vec![vec![
        "bucket_start".to_string(),
        "bucket_end".to_string(),
        "total".to_string(),
        "primes".to_string(),
        "prime_ratio".to_string(),
    ]];
    let width = i64::try_from(report.config.bucket).unwrap_or(i64::MAX);
    ratio.extend(report.prime_ratio_by_bucket.iter().map(|b| {
        vec![
            b.start.to_string(),
            b.start.saturating_add(width - 1).to_string(),
            b.total.to_string(),
            b.primes.to_string(),
            format!("{:.6}", b.ratio),
        ]
    }));

    let mut hist = vec![vec!["bin_lo".to_string(), "bin_hi".to_string(), "count".to_string()]];
    if let Some(stats) = &report.prime_hardness {
        hist.extend(
            stats
                .histogram
                .iter()
                .map(|b| vec![format_float(b.lo), format_float(b.hi), b.count.to_string()]),
        );
    }

    vec![
        (
            "00_status_distribution",
            counted_table(["status", "count"], &report.status_distribution),
        ),
        (
            "01_closest_band_all",
            counted_table(["closest_band", "count"], &report.closest_band_all),
        ),
        (
            "02_prime_closest_band",
            counted_table(["closest_band", "count"], &report.closest_band_primes),
        ),
        (
            "03_composite_closure_d_topk",
            counted_table(["closure_d", "count"], &report.composite_closure_d_topk),
        ),
        ("04_prime_ratio_by_bucket", ratio),
        (
            "05_prime_pressure_closest_d_topk",
            counted_table(["closest_d", "count"], &report.prime_pressure_closest_d_topk),
        ),
        ("06_prime_hardness_hist", hist),
    ]
}

fn write_counts<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    counts: &[Counted<K>],
    key_prefix: &str,
) -> fmt::Result {
    for c in counts {
        writeln!(f, "  {}{}: {}", key_prefix, c.key, c.count)?;
    }
    Ok(())
}

/// Human-readable summary of every section, as written to REPORT.txt.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = self.config;
        let prime = Status::StructuralPrime;
        writeln!(f, "STRUCTURAL PRIMALITY REPORT")?;
        writeln!(f, "rows_loaded = {}", self.rows_loaded)?;
        writeln!(f)?;

        writeln!(f, "00 Status distribution:")?;
        write_counts(f, &self.status_distribution, "")?;
        writeln!(f)?;

        writeln!(f, "01 Closest band distribution (all):")?;
        write_counts(f, &self.closest_band_all, "")?;
        writeln!(f)?;

        writeln!(f, "02 Closest band distribution ({}):", prime)?;
        write_counts(f, &self.closest_band_primes, "")?;
        writeln!(f)?;

        writeln!(f, "03 Top {} closure_d among {}:", cfg.topk, Status::Composite)?;
        write_counts(f, &self.composite_closure_d_topk, "d=")?;
        writeln!(f)?;

        writeln!(f, "04 Prime ratio by bucket (bucket={}):", cfg.bucket)?;
        let width = i64::try_from(cfg.bucket).unwrap_or(i64::MAX);
        for b in &self.prime_ratio_by_bucket {
            writeln!(
                f,
                "  {}..{}: {:.6}",
                b.start,
                b.start.saturating_add(width - 1),
                b.ratio
            )?;
        }
        writeln!(f)?;

        writeln!(f, "05 Top {} closest_d among {}:", cfg.topk, prime)?;
        write_counts(f, &self.prime_pressure_closest_d_topk, "d=")?;
        writeln!(f)?;

        writeln!(f, "06 Hardness histogram ({}):", prime)?;
        match &self.prime_hardness {
            Some(s) => writeln!(
                f,
                "  count={}  min={:.6}  avg={:.6}  max={:.6}",
                s.count, s.min, s.avg, s.max
            ),
            None => writeln!(f, "  (no hardness values)"),
        }
    }
}

fn write_table(path: &Path, table: &[Vec<String>]) -> Result<(), ReportError> {
    let mut buf = Vec::new();
    for record in table {
        write_record(&mut buf, record, Delimiter::Tab)?;
    }
    fs::write(path, buf)?;
    Ok(())
}

/// Write section tables, INDEX.txt, REPORT.txt and report.json under `out_dir`.
pub fn write_report(report: &Report, out_dir: &Path) -> Result<ReportFiles, ReportError> {
    fs::create_dir_all(out_dir)?;

    let mut files = ReportFiles::default();
    let mut index = String::new();
    for (stem, table) in section_tables(report) {
        let name = format!("{}.tsv", stem);
        let path = out_dir.join(&name);
        write_table(&path, &table)?;
        log::debug!("Wrote {} ({} lines)", path.display(), table.len());
        index.push_str(&name);
        index.push('\n');
        files.data.push(path);
    }
    index.push_str("report.json\n");

    files.index = out_dir.join("INDEX.txt");
    fs::write(&files.index, index)?;

    files.report = out_dir.join("REPORT.txt");
    fs::write(&files.report, report.to_string())?;

    files.json = out_dir.join("report.json");
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&files.json, json)?;

    log::info!("Report written to {}", out_dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, ReportConfig};
    use crate::rows::parse_rows;

    fn small_report() -> Report {
        let text = "n\tstatus\tclosure_d\tclosest_d\tclosest_band\thardness\n\
                    4\tCOMPOSITE\t2\t2\tA\t\n\
                    5\tSTRUCTURAL_PRIME\t\t2\tF\t0.24\n\
                    6\tCOMPOSITE\t2\t2\tA\t\n\
                    7\tSTRUCTURAL_PRIME\t\t2\tF\t0.24\n";
        let rows = parse_rows(text, Delimiter::Tab).unwrap();
        analyze(&rows, ReportConfig { bucket: 10, topk: 3 }).unwrap()
    }

    #[test]
    fn test_report_display() {
        let text = small_report().to_string();
        assert!(text.contains("rows_loaded = 4\n"));
        assert!(text.contains("00 Status distribution:\n  COMPOSITE: 2\n  STRUCTURAL_PRIME: 2\n"));
        assert!(text.contains("03 Top 3 closure_d among COMPOSITE:\n  d=2: 2\n"));
        assert!(text.contains("04 Prime ratio by bucket (bucket=10):\n  0..9: 0.500000\n"));
        assert!(text.contains("count=2  min=0.240000  avg=0.240000  max=0.240000"));
        assert!(text.ends_with("max=0.240000\n"));
    }

    #[test]
    fn test_report_display_without_hardness() {
        let rows = parse_rows("n\tstatus\n4\tCOMPOSITE\n", Delimiter::Tab).unwrap();
        let report = analyze(&rows, ReportConfig::default()).unwrap();
        let text = report.to_string();
        assert!(text.contains("02 Closest band distribution (STRUCTURAL_PRIME):\n\n"));
        assert!(text.ends_with("06 Hardness histogram (STRUCTURAL_PRIME):\n  (no hardness values)\n"));
    }

    #[test]
    fn test_write_report_layout() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report");
        let files = write_report(&small_report(), &out).unwrap();

        assert_eq!(files.data.len(), 7);
        for path in &files.data {
            assert!(path.exists(), "missing {}", path.display());
        }

        let index = fs::read_to_string(&files.index).unwrap();
        assert_eq!(index.lines().count(), 8);
        assert_eq!(index.lines().next(), Some("00_status_distribution.tsv"));
        assert!(index.ends_with("06_prime_hardness_hist.tsv\nreport.json\n"));
        assert_eq!(
            fs::read_to_string(&files.report).unwrap(),
            small_report().to_string()
        );

        let band = fs::read_to_string(out.join("02_prime_closest_band.tsv")).unwrap();
        assert_eq!(band, "closest_band\tcount\nF\t2\n");

        let ratio = fs::read_to_string(out.join("04_prime_ratio_by_bucket.tsv")).unwrap();
        assert_eq!(
            ratio,
            "bucket_start\tbucket_end\ttotal\tprimes\tprime_ratio\n0\t9\t4\t2\t0.500000\n"
        );

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&files.json).unwrap()).unwrap();
        assert_eq!(json["rows_loaded"], 4);
        assert_eq!(json["config"]["bucket"], 10);
        assert_eq!(json["prime_hardness"]["count"], 2);
    }
}
