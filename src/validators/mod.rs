//! Per-dataset checklists and the validator entry points.
//!
//! A validator loads its extract(s), runs every applicable check and collects
//! the results in a [`ValidationReport`]. Checks that need a column the schema
//! check blocked are recorded as skipped; every other check always runs.

use itertools::Itertools;

use crate::checks::{CheckResult, arithmetic, completeness, outliers, range, schema, uniqueness};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::error::util::validate_directory;
use crate::report::ValidationReport;
use crate::stats::{profile_table, verification_sample};
use crate::table::Table;

pub mod annual;
pub mod cross;
pub mod pairwise;
pub mod topics;

/// Reject bad settings and an unusable data directory before loading anything
fn prepare(config: &ValidationConfig) -> Result<()> {
    config.validate()?;
    validate_directory(&config.data_dir, "reading the CSV extracts")
}

/// Runs checks against one table, skipping those whose columns are blocked
pub struct Checklist<'a> {
    table: &'a Table,
    report: &'a mut ValidationReport,
}

impl<'a> Checklist<'a> {
    pub fn new(table: &'a Table, report: &'a mut ValidationReport) -> Self {
        Self { table, report }
    }

    /// Run a check that reads the given columns
    ///
    /// A blocked column skips the check and marks the run incomplete. An
    /// absent optional column just means the check does not apply.
    pub fn run<F>(&mut self, check: &str, columns: &[&str], f: F) -> Result<()>
    where
        F: FnOnce(&Table) -> Result<CheckResult>,
    {
        let blocked = columns
            .iter()
            .filter(|c| self.table.schema_report().is_blocked(c))
            .collect_vec();
        if !blocked.is_empty() {
            self.report.push_skipped(
                self.table.name(),
                check,
                format!("needs {} (missing or mistyped)", blocked.iter().join(", ")),
            );
            return Ok(());
        }
        if let Some(absent) = columns.iter().find(|c| !self.table.has_column(c)) {
            log::debug!(
                "{} {check} not applicable: optional column '{absent}' absent",
                self.table.name()
            );
            return Ok(());
        }

        let result = f(self.table)?;
        self.report.push_check(result);
        Ok(())
    }

    #[must_use]
    pub fn table(&self) -> &'a Table {
        self.table
    }
}

/// Checks shared by every extract: schema, keys, arithmetic, domains,
/// completeness and outliers
///
/// With `full_roster` every year must list the whole member-state universe.
pub fn run_common_checks(
    checklist: &mut Checklist<'_>,
    config: &ValidationConfig,
    full_roster: bool,
) -> Result<()> {
    let table = checklist.table();
    let dataset = table.schema().clone();
    let year = dataset.year_column;

    checklist
        .report
        .push_check(schema::schema_conformance(table));
    checklist.run("uniqueness.primary_key", &[], |t| {
        Ok(uniqueness::duplicate_keys(t))
    })?;

    if let Some(votes) = dataset.vote_columns {
        checklist.run("arithmetic.vote_totals", &votes.all(), |t| {
            arithmetic::vote_totals(t, &votes)
        })?;
    }

    for spec in &dataset.columns {
        let Some(domain) = spec.domain else { continue };
        checklist.run(&format!("range.{}", spec.name), &[spec.name], |t| {
            range::column_domain(t, spec, domain, config)
        })?;
    }

    checklist.run("completeness.nulls", &[], completeness::null_rates)?;
    checklist.run("completeness.years", &[year], |t| {
        completeness::year_coverage(t, config)
    })?;

    let mut country_columns = vec![year];
    country_columns.extend(dataset.country_columns.iter().copied());
    checklist.run("completeness.countries", &country_columns, |t| {
        completeness::country_coverage(t, config, full_roster)
    })?;

    for spec in dataset.measure_columns() {
        checklist.run(&format!("outliers.{}", spec.name), &[spec.name], |t| {
            outliers::flag_outliers(t, spec.name, config.outlier_threshold)
        })?;
    }

    Ok(())
}

/// Summary statistics and a verification sample for a table
pub fn collect_statistics(
    table: &Table,
    sample_columns: &[&str],
    report: &mut ValidationReport,
    config: &ValidationConfig,
) -> Result<()> {
    report.profiles.extend(profile_table(table)?);
    if config.sample_size > 0 && table.num_rows() > 0 {
        report.samples.push(verification_sample(
            table,
            sample_columns,
            config.sample_size,
            config.sample_seed,
        )?);
    }
    Ok(())
}
