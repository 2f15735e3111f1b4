use std::process::ExitCode;

use unga_qc::cli;
use unga_qc::validators::cross;

fn main() -> ExitCode {
    cli::run(
        cross::VALIDATOR,
        "Check the three extracts against each other: years, countries, keys and vote totals",
        cross::validate,
    )
}
