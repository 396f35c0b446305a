//! Per-integer row stream.

use std::io::Write;

use structural_core::delimited::{format_float, write_record};
use structural_core::{ClassificationRecord, Classifier, RunConfig, FIELDS};

use crate::{EmitError, OutputFormat};

fn opt_int(v: Option<u64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn opt_float(v: Option<f64>) -> String {
    v.map(format_float).unwrap_or_default()
}

fn opt_display<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Render a record as text fields in [`FIELDS`] order.
pub fn row_fields(rec: &ClassificationRecord) -> Vec<String> {
    vec![
        rec.n.to_string(),
        rec.status.to_string(),
        opt_int(rec.closure_d),
        opt_int(rec.closure_r),
        opt_float(rec.closure_a),
        opt_display(rec.closure_band),
        opt_int(rec.closest_d),
        opt_int(rec.closest_r),
        opt_int(rec.closest_gap),
        opt_float(rec.closest_g),
        opt_float(rec.closest_a),
        opt_display(rec.closest_band),
        opt_float(rec.s_min),
        opt_float(rec.s_avg),
        opt_float(rec.s_energy),
        opt_float(rec.hardness),
        rec.notes.to_string(),
    ]
}

/// Classify `2..=upper_bound` and write one row per emitted integer.
///
/// Honors the sampling stride and the row cap. Returns the number of rows
/// written (the header is not counted).
pub fn write_rows<W: Write + ?Sized>(
    config: &RunConfig,
    format: OutputFormat,
    writer: &mut W,
) -> Result<u64, EmitError> {
    let classifier = Classifier::new(config);
    let upper = config.upper_bound();

    log::info!(
        "Writing {} rows for 2..={} (engine {}, sig_div_cap {})",
        format,
        upper,
        classifier.engine(),
        classifier.sig_div_cap()
    );

    if let Some(delim) = format.delimiter() {
        write_record(writer, &FIELDS, delim)?;
    }

    let mut rows_written = 0u64;
    for n in 2..=upper {
        if !config.is_sampled(n) {
            continue;
        }
        if config.max_rows > 0 && rows_written >= config.max_rows {
            log::debug!("Row cap {} reached at n={}", config.max_rows, n);
            break;
        }

        let rec = classifier.classify(n);
        match format.delimiter() {
            Some(delim) => write_record(writer, &row_fields(&rec), delim)?,
            None => {
                serde_json::to_writer(&mut *writer, &rec)?;
                writer.write_all(b"\n")?;
            }
        }
        rows_written += 1;
    }

    writer.flush()?;
    Ok(rows_written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use structural_core::Engine;

    fn rows_text(config: &RunConfig, format: OutputFormat) -> (u64, String) {
        let mut out = Vec::new();
        let count = write_rows(config, format, &mut out).unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_csv_rows_up_to_ten() {
        let config = RunConfig {
            max_n: 10,
            ..RunConfig::default()
        };
        let (count, text) = rows_text(&config, OutputFormat::Csv);
        assert_eq!(count, 9);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], FIELDS.join(","));
        assert_eq!(lines[1], "2,STRUCTURAL_PRIME,,,,,,,,,,,,,,,base prime");
        assert_eq!(
            lines[3],
            "4,COMPOSITE,2,0,1.0,A,2,0,0,0.0,1.0,A,0.0,0.0,0.0,,closure witness (spf)"
        );
        assert_eq!(
            lines[4],
            "5,STRUCTURAL_PRIME,,,,,2,1,1,0.5,0.0,F,0.5,0.5,0.25,0.24,no closure up to floor(sqrt(n))"
        );
    }

    #[test]
    fn test_tsv_trial_rows() {
        let config = RunConfig {
            max_n: 9,
            engine: Engine::Trial,
            ..RunConfig::default()
        };
        let (_, text) = rows_text(&config, OutputFormat::Tsv);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("n\tstatus\tclosure_d"));
        assert!(lines[3].ends_with("\teven closure"));
        assert!(lines[8].starts_with("9\tCOMPOSITE\t3\t0\t"));
        assert!(lines[8].ends_with("\tclosure witness (trial)"));
    }

    #[test]
    fn test_sampling_and_row_cap() {
        let config = RunConfig {
            max_n: 100,
            sample_every: 10,
            max_rows: 4,
            ..RunConfig::default()
        };
        let (count, text) = rows_text(&config, OutputFormat::Csv);
        assert_eq!(count, 4);
        let ns: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(ns, vec!["10", "20", "30", "40"]);
    }

    #[test]
    fn test_jsonl_rows() {
        let config = RunConfig {
            max_n: 7,
            ..RunConfig::default()
        };
        let (count, text) = rows_text(&config, OutputFormat::Jsonl);
        assert_eq!(count, 6);
        let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first["n"], 2);
        assert!(first["closure_d"].is_null());
        let fourth: serde_json::Value = serde_json::from_str(text.lines().nth(2).unwrap()).unwrap();
        assert_eq!(fourth["closure_r"], 0);
        assert_eq!(fourth["closure_band"], "A");
        assert_eq!(fourth["S_energy"], 0.0);
    }

    #[test]
    fn test_rows_are_reproducible() {
        let config = RunConfig {
            max_n: 2_000,
            full_closest: true,
            ..RunConfig::default()
        };
        let (_, first) = rows_text(&config, OutputFormat::Csv);
        let (_, second) = rows_text(&config, OutputFormat::Csv);
        assert_eq!(first, second);
    }
}
