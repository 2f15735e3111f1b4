use std::process::ExitCode;

use unga_qc::cli;
use unga_qc::validators::topics;

fn main() -> ExitCode {
    cli::run(
        topics::VALIDATOR,
        "Validate topic_votes_yearly.csv: schema, vote arithmetic, topic tags, completeness and outliers",
        topics::validate,
    )
}
