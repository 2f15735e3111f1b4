//! `validate_annual_scores`: checks of the per-country annual scores.

use super::{Checklist, collect_statistics, run_common_checks};
use crate::checks::completeness;
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::loader::load_from_config;
use crate::report::ValidationReport;
use crate::schema::annual_scores;
use crate::table::Table;

pub const VALIDATOR: &str = "validate_annual_scores";

/// Columns shown in the verification sample
const SAMPLE_COLUMNS: [&str; 6] = [
    "Country name",
    "Year",
    "Yes Votes",
    "No Votes",
    "Abstain Votes",
    "Total Votes in Year",
];

/// Run every annual-scores check against a loaded table
pub fn check_table(table: &Table, config: &ValidationConfig, report: &mut ValidationReport) -> Result<()> {
    report.add_dataset(table);
    let schema = table.schema();
    let year = schema.year_column;
    let country = schema.country_columns[0];

    let mut checklist = Checklist::new(table, report);
    run_common_checks(&mut checklist, config, true)?;
    checklist.run("completeness.country_gaps", &[year, country], |t| {
        completeness::country_year_gaps(t, country, config)
    })?;

    collect_statistics(table, &SAMPLE_COLUMNS, report, config)
}

/// Load `annual_scores.csv` and validate it
pub fn validate(config: &ValidationConfig) -> Result<ValidationReport> {
    super::prepare(config)?;
    let table = load_from_config(&annual_scores(), config)?;
    let mut report = ValidationReport::new(VALIDATOR, config);
    check_table(&table, config, &mut report)?;
    Ok(report)
}
