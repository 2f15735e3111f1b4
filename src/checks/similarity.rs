//! Checks specific to pairwise cosine similarity.

use arrow::array::Array;
use rustc_hash::FxHashMap;

use super::{Category, CheckResult, Evidence, Status, percent};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::table::Table;

/// Stored values of a pair in both directions may differ by at most this much
const DIRECTION_TOLERANCE: f64 = 1e-9;

/// Share of exactly-zero and near-zero similarities
///
/// Zero overlap is expected for years before a country joined, so this only
/// warns above the configured share.
pub fn zero_share(table: &Table, column: &str, config: &ValidationConfig) -> Result<CheckResult> {
    let values = table.float_column(column)?;
    let total = values.len() - values.null_count();
    let exact = values.iter().flatten().filter(|v| *v == 0.0).count();
    let near = values
        .iter()
        .flatten()
        .filter(|v| v.abs() < config.near_zero_epsilon)
        .count();

    let near_share = percent(near, total);
    let limit = config.zero_similarity_warn_share * 100.0;
    let result = CheckResult::new(
        table.name(),
        "similarity.zero_share",
        Category::Similarity,
        format!("Zero similarities at most {limit}% of pairs"),
    )
    .with_notes(vec![
        format!("exactly zero: {exact} ({:.2}%)", percent(exact, total)),
        format!(
            "near zero (|x| < {}): {near} ({near_share:.2}%)",
            config.near_zero_epsilon
        ),
        "zero similarity is expected when a country was not yet a member".to_string(),
    ]);

    Ok(if near_share > limit {
        result.conclude(
            Status::Warning,
            format!("{near_share:.2}% of pairs are zero or near zero"),
        )
    } else {
        result.conclude(
            Status::Pass,
            format!("{near_share:.2}% of pairs are zero or near zero"),
        )
    })
}

/// List every pair with perfect agreement (1.0) or perfect opposition (-1.0)
///
/// These are legitimate values; they are reported, never discarded.
pub fn extremes(table: &Table, column: &str) -> Result<CheckResult> {
    let values = table.float_column(column)?;
    let mut perfect = 0usize;
    let mut opposed = 0usize;
    let mut evidence = Vec::new();

    for (row, value) in values.iter().enumerate() {
        let label = match value {
            Some(v) if v == 1.0 => {
                perfect += 1;
                "perfect agreement"
            }
            Some(v) if v == -1.0 => {
                opposed += 1;
                "perfect opposition"
            }
            _ => continue,
        };
        evidence.push(Evidence::new(
            table.row_key(row),
            format!("{column} = {} {label} (line {})", values.value(row), table.line_of(row)),
        ));
    }

    Ok(CheckResult::new(
        table.name(),
        "similarity.extremes",
        Category::Similarity,
        "Extreme similarities reported",
    )
    .with_evidence(evidence)
    .conclude(
        Status::Pass,
        format!("{perfect} pair(s) at 1.0, {opposed} pair(s) at -1.0"),
    ))
}

/// Each pair is stored in one direction only
///
/// A pair found in both directions for the same year warns; if the two
/// stored values disagree, the check fails.
pub fn pair_direction(table: &Table, first: &str, second: &str, column: &str) -> Result<CheckResult> {
    let years = table.int_column(table.schema().year_column)?;
    let left = table.text_column(first)?;
    let right = table.text_column(second)?;
    let values = table.float_column(column)?;

    let mut rows: FxHashMap<(i64, &str, &str), usize> = FxHashMap::default();
    for row in 0..table.num_rows() {
        if let (Some(year), Some(a), Some(b)) = (
            years.is_valid(row).then(|| years.value(row)),
            left.is_valid(row).then(|| left.value(row).trim()),
            right.is_valid(row).then(|| right.value(row).trim()),
        ) {
            rows.entry((year, a, b)).or_insert(row);
        }
    }

    let mut mirrored = Vec::new();
    for (&(year, a, b), &row) in &rows {
        if a < b {
            if let Some(&reverse) = rows.get(&(year, b, a)) {
                mirrored.push((row, reverse));
            }
        }
    }
    mirrored.sort_unstable();

    let mut conflicting = 0usize;
    let evidence = mirrored
        .iter()
        .map(|&(row, reverse)| {
            let lines = format!("lines {} and {}", table.line_of(row), table.line_of(reverse));
            let forward = values.is_valid(row).then(|| values.value(row));
            let backward = values.is_valid(reverse).then(|| values.value(reverse));
            let detail = match (forward, backward) {
                (Some(x), Some(y)) if (x - y).abs() > DIRECTION_TOLERANCE => {
                    conflicting += 1;
                    format!("stored in both directions with different values {x} and {y} ({lines})")
                }
                _ => format!("stored in both directions ({lines})"),
            };
            Evidence::new(table.row_key(row), detail)
        })
        .collect::<Vec<_>>();

    let result = CheckResult::new(
        table.name(),
        "similarity.direction",
        Category::Similarity,
        "Pairs stored in a single direction",
    );
    Ok(if evidence.is_empty() {
        result.conclude(Status::Pass, format!("{} pairs, none mirrored", rows.len()))
    } else if conflicting > 0 {
        let count = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Fail,
            format!("{count} mirrored pair(s), {conflicting} with conflicting values"),
        )
    } else {
        let count = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Warning,
            format!("{count} pair(s) stored in both directions"),
        )
    })
}
