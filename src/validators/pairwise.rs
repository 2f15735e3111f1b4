//! `validate_pairwise_similarity`: checks of the yearly country-pair similarities.

use super::{Checklist, collect_statistics, run_common_checks};
use crate::checks::{distribution, range, similarity};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::loader::load_from_config;
use crate::report::ValidationReport;
use crate::schema::pairwise_similarity;
use crate::table::Table;

pub const VALIDATOR: &str = "validate_pairwise_similarity";

const SIMILARITY_COLUMN: &str = "CosineSimilarity";

/// Run every pairwise-similarity check against a loaded table
pub fn check_table(table: &Table, config: &ValidationConfig, report: &mut ValidationReport) -> Result<()> {
    report.add_dataset(table);
    let schema = table.schema();
    let year = schema.year_column;
    let (first, second) = (schema.country_columns[0], schema.country_columns[1]);

    let mut checklist = Checklist::new(table, report);
    run_common_checks(&mut checklist, config, false)?;
    checklist.run("range.self_pairs", &[first, second], |t| {
        range::self_pairs(t, first, second)
    })?;
    checklist.run("similarity.zero_share", &[SIMILARITY_COLUMN], |t| {
        similarity::zero_share(t, SIMILARITY_COLUMN, config)
    })?;
    checklist.run("similarity.extremes", &[SIMILARITY_COLUMN], |t| {
        similarity::extremes(t, SIMILARITY_COLUMN)
    })?;
    checklist.run(
        "similarity.direction",
        &[year, first, second, SIMILARITY_COLUMN],
        |t| similarity::pair_direction(t, first, second, SIMILARITY_COLUMN),
    )?;
    checklist.run(
        "distribution.yearly_similarity",
        &[year, SIMILARITY_COLUMN],
        |t| distribution::yearly_similarity(t, SIMILARITY_COLUMN),
    )?;
    checklist.run(
        "distribution.similarity_ranking",
        &[SIMILARITY_COLUMN],
        |t| distribution::similarity_ranking(t, SIMILARITY_COLUMN),
    )?;

    let sample_columns = schema.columns.iter().map(|c| c.name).collect::<Vec<_>>();
    collect_statistics(table, &sample_columns, report, config)
}

/// Load `pairwise_similarity_yearly.csv` and validate it
pub fn validate(config: &ValidationConfig) -> Result<ValidationReport> {
    super::prepare(config)?;
    let table = load_from_config(&pairwise_similarity(), config)?;
    let mut report = ValidationReport::new(VALIDATOR, config);
    check_table(&table, config, &mut report)?;
    Ok(report)
}
