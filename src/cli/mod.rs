//! Command-line surface shared by the four validator binaries.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser};

use crate::config::ValidationConfig;
use crate::error::Result;
use crate::report::{ValidationReport, render_report};

/// Exit status when at least one check failed
pub const EXIT_CHECK_FAILED: u8 = 1;
/// Exit status when validation could not run
pub const EXIT_FATAL: u8 = 2;

/// Options accepted by every validator
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Args {
    /// Directory holding the CSV extracts
    #[arg(long, env = "UNGA_QC_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Restrict every check to a single year
    #[arg(long, value_name = "YEAR")]
    pub year: Option<i64>,

    /// Outlier threshold in standard deviations
    #[arg(long, value_name = "SIGMA", default_value_t = 3.0)]
    pub outlier_sigma: f64,

    /// Also write the report as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Print every evidence line instead of the first few per check
    #[arg(long)]
    pub full_evidence: bool,

    /// Rows drawn for manual verification
    #[arg(long, value_name = "ROWS", default_value_t = 5)]
    pub sample_size: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Build the validator configuration from the parsed options
    #[must_use]
    pub fn to_config(&self) -> ValidationConfig {
        let mut config = ValidationConfig::default();
        if let Some(dir) = &self.data_dir {
            config.data_dir.clone_from(dir);
        }
        config.year_filter = self.year;
        config.outlier_threshold = self.outlier_sigma;
        config.sample_size = self.sample_size;
        if self.full_evidence {
            config.evidence_limit = None;
        }
        config
    }
}

/// Initialize `env_logger`; `RUST_LOG` takes precedence over `-v`
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn execute(
    args: &Args,
    validate: fn(&ValidationConfig) -> Result<ValidationReport>,
) -> anyhow::Result<ValidationReport> {
    let config = args.to_config();
    let report = validate(&config).context("validation aborted")?;

    print!("{}", render_report(&report, config.evidence_limit));

    if let Some(path) = &args.json {
        report
            .write_json(path)
            .with_context(|| format!("failed to write JSON report to {}", path.display()))?;
    }
    Ok(report)
}

/// Parse the command line, run a validator and map its outcome to an exit code
///
/// 0 when no check failed, 1 when any check failed, 2 when the data could not
/// be validated at all.
pub fn run(
    name: &'static str,
    about: &'static str,
    validate: fn(&ValidationConfig) -> Result<ValidationReport>,
) -> ExitCode {
    let matches = Args::command().name(name).about(about).get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    init_logging(args.verbose);

    match execute(&args, validate) {
        Ok(report) if report.has_failures() => ExitCode::from(EXIT_CHECK_FAILED),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
