//! `validate_topic_votes`: checks of the per-topic vote counts.

use super::{Checklist, collect_statistics, run_common_checks};
use crate::checks::{completeness, distribution, topics};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::loader::load_from_config;
use crate::report::ValidationReport;
use crate::schema::topic_votes;
use crate::table::Table;

pub const VALIDATOR: &str = "validate_topic_votes";

const TOPIC_COLUMN: &str = "TopicTag";

/// Run every topic-votes check against a loaded table
pub fn check_table(table: &Table, config: &ValidationConfig, report: &mut ValidationReport) -> Result<()> {
    report.add_dataset(table);
    let schema = table.schema();
    let year = schema.year_column;
    let country = schema.country_columns[0];

    let mut checklist = Checklist::new(table, report);
    run_common_checks(&mut checklist, config, false)?;
    checklist.run("completeness.country_gaps", &[year, country], |t| {
        completeness::country_year_gaps(t, country, config)
    })?;
    checklist.run("topics.tag_variants", &[TOPIC_COLUMN], |t| {
        topics::tag_variants(t, TOPIC_COLUMN)
    })?;
    if let Some(votes) = schema.vote_columns {
        let mut columns = vec![year, country, TOPIC_COLUMN];
        columns.extend(votes.all());
        checklist.run("distribution.topics", &columns, |t| {
            distribution::topic_totals(t, TOPIC_COLUMN, &votes)
        })?;
        checklist.run("distribution.yearly_votes", &columns, |t| {
            distribution::yearly_votes(t, TOPIC_COLUMN, &votes)
        })?;
    }

    let sample_columns = schema.columns.iter().map(|c| c.name).collect::<Vec<_>>();
    collect_statistics(table, &sample_columns, report, config)
}

/// Load `topic_votes_yearly.csv` and validate it
pub fn validate(config: &ValidationConfig) -> Result<ValidationReport> {
    super::prepare(config)?;
    let table = load_from_config(&topic_votes(), config)?;
    let mut report = ValidationReport::new(VALIDATOR, config);
    check_table(&table, config, &mut report)?;
    Ok(report)
}
