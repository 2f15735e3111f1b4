//! `validate_cross_files`: consistency between the three extracts.

use itertools::Itertools;

use crate::checks::CheckResult;
use crate::checks::cross_file::{self, CROSS_FILES};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::loader::load_from_config;
use crate::report::ValidationReport;
use crate::schema::{annual_scores, pairwise_similarity, topic_votes};
use crate::table::Table;

pub const VALIDATOR: &str = "validate_cross_files";

/// Year and country columns of a table
fn key_columns(table: &Table) -> (&Table, Vec<&'static str>) {
    let schema = table.schema();
    let mut columns = vec![schema.year_column];
    columns.extend(schema.country_columns.iter().copied());
    (table, columns)
}

/// Run a check spanning several tables unless one of its columns is blocked
fn run_across<F>(
    report: &mut ValidationReport,
    check: &str,
    needs: &[(&Table, Vec<&'static str>)],
    f: F,
) -> Result<()>
where
    F: FnOnce() -> Result<CheckResult>,
{
    let blocked = needs
        .iter()
        .flat_map(|(table, columns)| {
            columns
                .iter()
                .filter(move |c| table.schema_report().is_blocked(c))
                .map(move |c| format!("{}.{c}", table.name()))
        })
        .collect_vec();
    if !blocked.is_empty() {
        report.push_skipped(
            CROSS_FILES,
            check,
            format!("needs {} (missing or mistyped)", blocked.join(", ")),
        );
        return Ok(());
    }
    report.push_check(f()?);
    Ok(())
}

/// Run every cross-file check against the three loaded tables
pub fn check_tables(
    annual: &Table,
    pairwise: &Table,
    topics: &Table,
    report: &mut ValidationReport,
) -> Result<()> {
    for table in [annual, pairwise, topics] {
        report.add_dataset(table);
    }
    let tables = [annual, pairwise, topics];

    let years = tables
        .iter()
        .map(|t| (*t, vec![t.schema().year_column]))
        .collect_vec();
    run_across(report, "cross_file.years", &years, || {
        cross_file::year_sets(&tables)
    })?;

    let countries = tables.iter().map(|t| key_columns(t)).collect_vec();
    run_across(report, "cross_file.countries", &countries, || {
        cross_file::country_sets(&tables)
    })?;

    for other in [topics, pairwise] {
        run_across(
            report,
            &format!("cross_file.keys.{}.{}", annual.name(), other.name()),
            &[key_columns(annual), key_columns(other)],
            || cross_file::key_coverage(annual, other),
        )?;
    }

    let mut vote_needs = vec![key_columns(annual), key_columns(topics)];
    for (table, columns) in &mut vote_needs {
        if let Some(votes) = table.schema().vote_columns {
            columns.push(votes.total);
        }
    }
    run_across(report, "cross_file.vote_totals", &vote_needs, || {
        cross_file::vote_reconciliation(annual, topics)
    })?;

    Ok(())
}

/// Load all three extracts and validate them against each other
pub fn validate(config: &ValidationConfig) -> Result<ValidationReport> {
    super::prepare(config)?;
    let annual = load_from_config(&annual_scores(), config)?;
    let pairwise = load_from_config(&pairwise_similarity(), config)?;
    let topics = load_from_config(&topic_votes(), config)?;

    let mut report = ValidationReport::new(VALIDATOR, config);
    check_tables(&annual, &pairwise, &topics, &mut report)?;
    Ok(report)
}
