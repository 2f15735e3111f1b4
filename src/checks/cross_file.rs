//! Consistency between the three extracts.
//!
//! Set comparisons only warn. The vote reconciliation is directional: the sum
//! of topic totals for a (country, year) may exceed the annual total because a
//! resolution can carry several topic tags, but it must never fall short.

use std::collections::{BTreeMap, BTreeSet};

use arrow::array::Array;
use itertools::Itertools;

use super::arithmetic::int_value;
use super::completeness::{countries_by_year, distinct_years};
use super::{Category, CheckResult, Evidence, Status};
use crate::error::{QcError, Result};
use crate::table::Table;

/// Dataset name used for checks spanning several files
pub const CROSS_FILES: &str = "cross_files";

/// A (country, year) key
pub type CountryYear = (String, i64);

fn render_key((country, year): &CountryYear) -> String {
    format!("{country}/{year}")
}

/// Every (country, year) a table covers, over all of its usable country columns
///
/// For pairwise similarity a country is covered in a year if it appears on
/// either side of any pair.
pub fn country_year_keys(table: &Table) -> Result<BTreeSet<CountryYear>> {
    Ok(countries_by_year(table)?
        .into_iter()
        .flat_map(|(year, countries)| countries.into_iter().map(move |c| (c, year)))
        .collect())
}

/// Compare a set of members across tables, one evidence item per member missing somewhere
fn compare_sets<T: Ord + ToString>(
    check: &str,
    label: &str,
    noun: &str,
    sets: &[(&str, BTreeSet<T>)],
) -> CheckResult {
    let union: BTreeSet<&T> = sets.iter().flat_map(|(_, set)| set.iter()).collect();

    let evidence = union
        .iter()
        .filter_map(|member| {
            let absent = sets
                .iter()
                .filter(|(_, set)| !set.contains(*member))
                .map(|(name, _)| *name)
                .collect_vec();
            (!absent.is_empty()).then(|| {
                Evidence::new(member.to_string(), format!("absent from {}", absent.join(", ")))
            })
        })
        .collect_vec();

    let notes = sets
        .iter()
        .map(|(name, set)| format!("{name}: {} {noun}", set.len()))
        .collect();
    let result = CheckResult::new(CROSS_FILES, check, Category::CrossFile, label).with_notes(notes);

    if evidence.is_empty() {
        result.conclude(
            Status::Pass,
            format!("{} {noun} identical across {} files", union.len(), sets.len()),
        )
    } else {
        let count = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Warning,
            format!("{count} of {} {noun} not present in every file", union.len()),
        )
    }
}

/// Year sets must agree across files
pub fn year_sets(tables: &[&Table]) -> Result<CheckResult> {
    let sets = tables
        .iter()
        .map(|t| -> Result<_> { Ok((t.name(), distinct_years(t)?)) })
        .collect::<Result<Vec<_>>>()?;
    Ok(compare_sets(
        "cross_file.years",
        "Same years in every file",
        "years",
        &sets,
    ))
}

/// Country sets must agree across files
pub fn country_sets(tables: &[&Table]) -> Result<CheckResult> {
    let sets = tables
        .iter()
        .map(|t| -> Result<_> {
            let countries: BTreeSet<String> =
                countries_by_year(t)?.into_values().flatten().collect();
            Ok((t.name(), countries))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(compare_sets(
        "cross_file.countries",
        "Same countries in every file",
        "countries",
        &sets,
    ))
}

/// (Country, Year) keys present in one table but absent from the other
pub fn key_coverage(left: &Table, right: &Table) -> Result<CheckResult> {
    let left_keys = country_year_keys(left)?;
    let right_keys = country_year_keys(right)?;

    let mut evidence = Vec::new();
    for key in left_keys.difference(&right_keys) {
        evidence.push(Evidence::new(
            render_key(key),
            format!("in {}, absent from {}", left.name(), right.name()),
        ));
    }
    for key in right_keys.difference(&left_keys) {
        evidence.push(Evidence::new(
            render_key(key),
            format!("in {}, absent from {}", right.name(), left.name()),
        ));
    }

    let shared = left_keys.intersection(&right_keys).count();
    let result = CheckResult::new(
        CROSS_FILES,
        format!("cross_file.keys.{}.{}", left.name(), right.name()),
        Category::CrossFile,
        format!("(Country, Year) keys match: {} vs {}", left.name(), right.name()),
    )
    .with_notes(vec![format!("{shared} shared key(s)")]);

    Ok(if evidence.is_empty() {
        result.conclude(Status::Pass, format!("all {shared} keys present in both"))
    } else {
        let count = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Warning,
            format!("{count} key(s) present in only one file"),
        )
    })
}

/// Sum a per-row total column into (country, year) buckets
fn totals_by_key(
    table: &Table,
    country_column: &str,
    total_column: &str,
    accumulate: bool,
) -> Result<(BTreeMap<CountryYear, i64>, usize)> {
    let years = table.int_column(table.schema().year_column)?;
    let countries = table.text_column(country_column)?;
    let totals = table.int_column(total_column)?;

    let mut by_key: BTreeMap<CountryYear, i64> = BTreeMap::new();
    let mut skipped = 0usize;
    for row in 0..table.num_rows() {
        let (Some(year), Some(country), Some(total)) = (
            int_value(years, row),
            countries.is_valid(row).then(|| countries.value(row)),
            int_value(totals, row),
        ) else {
            skipped += 1;
            continue;
        };
        let key = (country.trim().to_string(), year);
        if accumulate {
            let sum = by_key.entry(key).or_insert(0);
            *sum = sum.saturating_add(total);
        } else {
            // Duplicate keys are reported by the uniqueness check; keep the first
            by_key.entry(key).or_insert(total);
        }
    }
    Ok((by_key, skipped))
}

/// Reconcile annual vote totals with the per-topic sums
///
/// Every annual key is compared. A key with no topic rows has a topic sum of
/// zero. A topic sum below the annual total fails; equal and greater sums are
/// counted in notes.
pub fn vote_reconciliation(annual: &Table, topics: &Table) -> Result<CheckResult> {
    let annual_votes = annual.schema().vote_columns.ok_or_else(|| {
        QcError::structure(annual.name(), "dataset carries no vote columns")
    })?;
    let topic_votes = topics.schema().vote_columns.ok_or_else(|| {
        QcError::structure(topics.name(), "dataset carries no vote columns")
    })?;
    let annual_country = annual.schema().country_columns[0];
    let topic_country = topics.schema().country_columns[0];

    let (annual_totals, annual_skipped) =
        totals_by_key(annual, annual_country, annual_votes.total, false)?;
    let (topic_sums, topic_skipped) =
        totals_by_key(topics, topic_country, topic_votes.total, true)?;

    let mut evidence = Vec::new();
    let mut equal = 0usize;
    let mut greater = 0usize;
    let mut without_topics = 0usize;
    for (key, &annual_total) in &annual_totals {
        let topic_sum = match topic_sums.get(key) {
            Some(&sum) => sum,
            None => {
                without_topics += 1;
                0
            }
        };
        match topic_sum.cmp(&annual_total) {
            std::cmp::Ordering::Less => {
                let short = i128::from(annual_total) - i128::from(topic_sum);
                let detail = if topic_sums.contains_key(key) {
                    format!("topic sum {topic_sum} < annual total {annual_total} (short by {short})")
                } else {
                    format!("no topic rows, annual total {annual_total} (short by {short})")
                };
                evidence.push(Evidence::new(render_key(key), detail));
            }
            std::cmp::Ordering::Equal => equal += 1,
            std::cmp::Ordering::Greater => greater += 1,
        }
    }
    let compared = annual_totals.len();

    let mut notes = vec![
        format!("{compared} key(s) compared"),
        format!("{equal} key(s) with topic sum equal to the annual total"),
        format!(
            "{greater} key(s) with topic sum above the annual total (multi-tagged resolutions)"
        ),
    ];
    if without_topics > 0 {
        notes.push(format!(
            "{without_topics} annual key(s) without topic rows, compared as topic sum 0"
        ));
    }
    if annual_skipped + topic_skipped > 0 {
        notes.push(format!(
            "{} row(s) with a null key or total not reconciled",
            annual_skipped + topic_skipped
        ));
    }

    let result = CheckResult::new(
        CROSS_FILES,
        "cross_file.vote_totals",
        Category::CrossFile,
        format!(
            "sum({}) >= {} per (Country, Year)",
            topic_votes.total, annual_votes.total
        ),
    )
    .with_notes(notes);

    Ok(if evidence.is_empty() {
        result.conclude(
            Status::Pass,
            format!("no topic sum below its annual total ({compared} keys)"),
        )
    } else {
        let count = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Fail,
            format!("{count} of {compared} key(s) have a topic sum below the annual total"),
        )
    })
}
