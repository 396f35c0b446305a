//! structural-primality CLI: classify 2..=max_n and emit rows and/or a summary.
//!
//! Usage:
//!   structural-primality --max-n 10000 --engine spf --mode both --fmt tsv \
//!       --out data/rows.tsv --summary-out data/summary.tsv
//!
//! Logging goes through `RUST_LOG` (e.g. `RUST_LOG=info`).

use std::path::PathBuf;

use clap::Parser;

use structural_core::{summarize, Engine, RunConfig, SigDivMode, SpfTable};
use structural_primality::{open_output, write_rows, write_summary, EmitError, OutputFormat, RunMode};

/// Classify integers as structurally prime or composite under the
/// divisor-closeness model.
#[derive(Debug, Parser)]
#[command(name = "structural-primality", version)]
struct Cli {
    /// Inclusive upper bound of the range (values below 2 become 2)
    #[arg(long = "max-n", default_value_t = 50, allow_negative_numbers = true)]
    max_n: i64,

    /// Witness engine: spf (sieve) or trial (trial division)
    #[arg(long, default_value = "spf")]
    engine: Engine,

    /// What to produce: rows, summary or both
    #[arg(long, default_value = "rows")]
    mode: RunMode,

    /// Rows output path (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Summary output path (stdout when omitted)
    #[arg(long = "summary-out")]
    summary_out: Option<PathBuf>,

    /// Rows format: csv, tsv or jsonl
    #[arg(long, default_value = "csv")]
    fmt: OutputFormat,

    /// Scan every divisor up to floor(sqrt(n)) for the closest record
    #[arg(long = "full-closest")]
    full_closest: bool,

    /// Report 1 - hardness
    #[arg(long = "hardness-invert")]
    hardness_invert: bool,

    /// Signature divisor cap mode: fixed or adaptive
    #[arg(long = "sig-div-mode", default_value = "fixed")]
    sig_div_mode: SigDivMode,

    /// Largest signature divisor
    #[arg(long = "sig-div-max", default_value_t = 101)]
    sig_div_max: u64,

    /// Emit only n divisible by this stride
    #[arg(long = "sample-every", default_value_t = 1)]
    sample_every: u64,

    /// Stop after this many rows (0 = unlimited)
    #[arg(long = "max-rows", default_value_t = 0)]
    max_rows: u64,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            max_n: self.max_n,
            engine: self.engine,
            sig_div_mode: self.sig_div_mode,
            sig_div_max: self.sig_div_max,
            full_closest: self.full_closest,
            hardness_invert: self.hardness_invert,
            sample_every: self.sample_every,
            max_rows: self.max_rows,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.run_config();

    println!("STRUCTURAL PRIMALITY RUN");
    println!("max_n = {}", config.max_n);
    println!("engine = {}", config.engine);
    println!("sig_div_mode = {}", config.sig_div_mode);
    println!("sig_div_cap = {}", config.sig_div_cap());
    println!("full_closest = {}", u8::from(config.full_closest));
    println!("hardness_invert = {}", u8::from(config.hardness_invert));

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if config.engine == Engine::Spf {
        let upper = config.upper_bound();
        let (primes, composites) = SpfTable::new(upper).prime_composite_counts(upper);
        println!("structural_primes = {}", primes);
        println!("composites = {}", composites);
    }
}

fn run(cli: &Cli, config: &RunConfig) -> Result<(), EmitError> {
    if cli.mode.wants_rows() {
        let mut out = open_output(cli.out.as_deref())?;
        let rows_written = write_rows(config, cli.fmt, &mut out)?;
        println!("rows_written = {}", rows_written);
        if let Some(path) = &cli.out {
            println!("rows_out = {}", path.display());
        }
    }

    if cli.mode.wants_summary() {
        let summary = summarize(config);
        let mut out = open_output(cli.summary_out.as_deref())?;
        write_summary(&summary, &mut out)?;
        if let Some(path) = &cli.summary_out {
            println!("summary_out = {}", path.display());
        }
    }

    Ok(())
}
