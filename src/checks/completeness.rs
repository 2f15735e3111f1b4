//! Completeness: null rates, year coverage, country coverage and per-country gaps.

use std::collections::{BTreeMap, BTreeSet};

use arrow::array::Array;
use itertools::Itertools;

use super::{Category, CheckResult, Evidence, Status, percent, year_list};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::table::Table;

/// Gap years shown per country
const GAP_YEARS_SHOWN: usize = 5;

/// Null counts of every usable column, compared with each column's tolerance
///
/// Columns without a tolerance must be fully populated.
pub fn null_rates(table: &Table) -> Result<CheckResult> {
    let rows = table.num_rows();
    let mut evidence = Vec::new();
    let mut notes = Vec::new();
    let mut clean = 0usize;

    for spec in &table.schema().columns {
        if !table.is_usable(spec.name) {
            continue;
        }
        let nulls = table.column(spec.name)?.null_count();
        if nulls == 0 {
            clean += 1;
            continue;
        }
        let share = percent(nulls, rows);
        notes.push(format!("{}: {nulls} nulls ({share:.2}%)", spec.name));

        match spec.null_tolerance {
            None => evidence.push(Evidence::new(
                spec.name,
                format!("{nulls} null(s) in a column that must be fully populated"),
            )),
            Some(tolerance) if share > tolerance => evidence.push(Evidence::new(
                spec.name,
                format!("{share:.2}% nulls exceeds the {tolerance}% tolerance"),
            )),
            Some(_) => {}
        }
    }

    let result = CheckResult::new(
        table.name(),
        "completeness.nulls",
        Category::Completeness,
        "Null rates within tolerance",
    )
    .with_notes(notes);

    Ok(if evidence.is_empty() {
        result.conclude(
            Status::Pass,
            format!("{clean} column(s) fully populated, other nulls within tolerance"),
        )
    } else {
        let count = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Warning,
            format!("{count} column(s) with unexpected nulls"),
        )
    })
}

/// Distinct non-null years of a table
pub fn distinct_years(table: &Table) -> Result<BTreeSet<i64>> {
    let years = table.int_column(table.schema().year_column)?;
    Ok(years.iter().flatten().collect())
}

/// Compare the years present against the expected window
///
/// A documented absence (1964) is a note; every other missing year is one
/// evidence item and makes the check a warning.
pub fn year_coverage(table: &Table, config: &ValidationConfig) -> Result<CheckResult> {
    let present = distinct_years(table)?;
    let expected = config.expected_years();

    let mut evidence = Vec::new();
    let mut notes = Vec::new();
    for year in expected.difference(&present) {
        match config.documented_absence(*year) {
            Some(reason) => notes.push(format!("{year} absent as documented: {reason}")),
            None => evidence.push(Evidence::new(year, "no rows for this year")),
        }
    }
    for year in present.intersection(&expected) {
        if let Some(reason) = config.documented_absence(*year) {
            notes.push(format!("{year} has rows although documented as absent ({reason})"));
        }
    }
    if let (Some(first), Some(last)) = (present.first(), present.last()) {
        notes.push(format!("years present: {first}-{last} ({} distinct)", present.len()));
    }

    let result = CheckResult::new(
        table.name(),
        "completeness.years",
        Category::Completeness,
        format!("Year coverage {}-{}", config.first_year, config.last_year),
    )
    .with_notes(notes);

    let covered = expected.intersection(&present).count();
    Ok(if evidence.is_empty() {
        result.conclude(
            Status::Pass,
            format!(
                "{covered} of {} expected years present, no unexplained gaps",
                expected.len()
            ),
        )
    } else {
        let unexplained = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Warning,
            format!("{unexplained} unexplained missing year(s)"),
        )
    })
}

/// Distinct countries per year across the usable country columns
pub fn countries_by_year(table: &Table) -> Result<BTreeMap<i64, BTreeSet<String>>> {
    let years = table.int_column(table.schema().year_column)?;
    let mut by_year: BTreeMap<i64, BTreeSet<String>> = BTreeMap::new();
    for name in &table.schema().country_columns {
        if !table.is_usable(name) {
            continue;
        }
        let countries = table.text_column(name)?;
        for (year, country) in years.iter().zip(countries.iter()) {
            if let (Some(year), Some(country)) = (year, country) {
                by_year
                    .entry(year)
                    .or_default()
                    .insert(country.trim().to_string());
            }
        }
    }
    Ok(by_year)
}

/// Compare the distinct country count with the member-state universe
///
/// With `per_year` every year from `full_roster_from` on must list the whole
/// universe as well; shorter earlier years are noted only.
/// Under a year filter the result is informational only.
pub fn country_coverage(
    table: &Table,
    config: &ValidationConfig,
    per_year: bool,
) -> Result<CheckResult> {
    let by_year = countries_by_year(table)?;
    let all: BTreeSet<&str> = by_year
        .values()
        .flat_map(|countries| countries.iter().map(String::as_str))
        .collect();
    let expected = config.expected_country_count;

    let result = CheckResult::new(
        table.name(),
        "completeness.countries",
        Category::Completeness,
        format!("Country coverage against {expected} member states"),
    );

    if config.year_filter.is_some() {
        return Ok(result
            .with_notes(vec!["informational only under a year filter".to_string()])
            .conclude(Status::Pass, format!("{} distinct countries", all.len())));
    }

    let mut evidence = Vec::new();
    if all.len() != expected {
        evidence.push(Evidence::new(
            "all years",
            format!("{} distinct countries, expected {expected}", all.len()),
        ));
    }
    let mut early_short = Vec::new();
    if per_year {
        for (year, countries) in &by_year {
            let count = countries.len();
            if count < expected && *year < config.full_roster_from {
                early_short.push(*year);
            } else if count != expected {
                evidence.push(Evidence::new(
                    year,
                    format!("{count} countries, expected {expected}"),
                ));
            }
        }
    }
    let result = if early_short.is_empty() {
        result
    } else {
        result.with_notes(vec![format!(
            "{} year(s) before {} list fewer than {expected} countries while membership grew: {}",
            early_short.len(),
            config.full_roster_from,
            year_list(&early_short, GAP_YEARS_SHOWN)
        )])
    };

    Ok(if evidence.is_empty() {
        result.conclude(Status::Pass, format!("{} distinct countries", all.len()))
    } else {
        result.with_evidence(evidence).conclude(
            Status::Warning,
            format!("{} distinct countries, expected {expected}", all.len()),
        )
    })
}

/// Years missing inside each country's own first-to-last span
///
/// Documented absences are not gaps.
pub fn country_year_gaps(
    table: &Table,
    country_column: &str,
    config: &ValidationConfig,
) -> Result<CheckResult> {
    let years = table.int_column(table.schema().year_column)?;
    let countries = table.text_column(country_column)?;

    let mut by_country: BTreeMap<&str, BTreeSet<i64>> = BTreeMap::new();
    for (year, country) in years.iter().zip(countries.iter()) {
        if let (Some(year), Some(country)) = (year, country) {
            by_country.entry(country.trim()).or_default().insert(year);
        }
    }

    let mut evidence = Vec::new();
    for (country, present) in &by_country {
        let (Some(&first), Some(&last)) = (present.first(), present.last()) else {
            continue;
        };
        let gaps = (first..=last)
            .filter(|y| !present.contains(y) && config.documented_absence(*y).is_none())
            .collect_vec();
        if !gaps.is_empty() {
            evidence.push(Evidence::new(
                country,
                format!(
                    "{} gap year(s) between {first} and {last}: {}",
                    gaps.len(),
                    year_list(&gaps, GAP_YEARS_SHOWN)
                ),
            ));
        }
    }

    let result = CheckResult::new(
        table.name(),
        "completeness.country_gaps",
        Category::Completeness,
        "No gaps inside each country's year span",
    );
    Ok(if evidence.is_empty() {
        result.conclude(
            Status::Pass,
            format!("{} countries with continuous coverage", by_country.len()),
        )
    } else {
        let count = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Warning,
            format!("{count} of {} countries have gaps", by_country.len()),
        )
    })
}
