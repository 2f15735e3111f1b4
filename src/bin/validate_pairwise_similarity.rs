use std::process::ExitCode;

use unga_qc::cli;
use unga_qc::validators::pairwise;

fn main() -> ExitCode {
    cli::run(
        pairwise::VALIDATOR,
        "Validate pairwise_similarity_yearly.csv: schema, similarity range, pair conventions, completeness and outliers",
        pairwise::validate,
    )
}
