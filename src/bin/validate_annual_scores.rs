use std::process::ExitCode;

use unga_qc::cli;
use unga_qc::validators::annual;

fn main() -> ExitCode {
    cli::run(
        annual::VALIDATOR,
        "Validate annual_scores.csv: schema, vote arithmetic, ranges, completeness and outliers",
        annual::validate,
    )
}
