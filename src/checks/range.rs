//! Range and domain checks.

use super::{Category, CheckResult, Evidence, Status};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::schema::{ColumnSpec, Domain};
use crate::table::Table;

/// Whether a code is exactly three uppercase ASCII letters
#[must_use]
pub fn is_iso3(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Check every non-null value of a column against its domain
///
/// Nulls are left to the completeness check. Every violation is reported.
pub fn column_domain(
    table: &Table,
    spec: &ColumnSpec,
    domain: Domain,
    config: &ValidationConfig,
) -> Result<CheckResult> {
    let description = domain.describe(config);
    let result = CheckResult::new(
        table.name(),
        format!("range.{}", spec.name),
        Category::Range,
        format!("{} within {description}", spec.name),
    );

    let mut checked = 0usize;
    let mut evidence = Vec::new();
    match domain.bounds(config) {
        Some((min, max)) => {
            let values = table.numeric_values(spec.name)?;
            for (row, value) in values.into_iter().enumerate() {
                let Some(value) = value else { continue };
                checked += 1;
                let below = min.is_some_and(|min| value < min);
                let above = max.is_some_and(|max| value > max);
                if below || above {
                    evidence.push(Evidence::new(
                        table.row_key(row),
                        format!(
                            "{} = {value} outside {description} (line {})",
                            spec.name,
                            table.line_of(row)
                        ),
                    ));
                }
            }
        }
        None => {
            let codes = table.text_column(spec.name)?;
            for (row, code) in codes.iter().enumerate() {
                let Some(code) = code else { continue };
                checked += 1;
                if !is_iso3(code) {
                    evidence.push(Evidence::new(
                        table.row_key(row),
                        format!(
                            "{} = {code:?} is not an ISO3 code (line {})",
                            spec.name,
                            table.line_of(row)
                        ),
                    ));
                }
            }
        }
    }

    Ok(if evidence.is_empty() {
        result.conclude(
            Status::Pass,
            format!("all {checked} non-null values in domain"),
        )
    } else {
        let violations = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Fail,
            format!("{violations} of {checked} values out of domain"),
        )
    })
}

/// A country must never be paired with itself
pub fn self_pairs(table: &Table, first: &str, second: &str) -> Result<CheckResult> {
    let left = table.text_column(first)?;
    let right = table.text_column(second)?;

    let evidence: Vec<Evidence> = left
        .iter()
        .zip(right.iter())
        .enumerate()
        .filter_map(|(row, pair)| match pair {
            (Some(a), Some(b)) if a.trim() == b.trim() => Some(Evidence::new(
                table.row_key(row),
                format!("country paired with itself (line {})", table.line_of(row)),
            )),
            _ => None,
        })
        .collect();

    let result = CheckResult::new(
        table.name(),
        "range.self_pairs",
        Category::Range,
        format!("{first} differs from {second}"),
    );
    Ok(if evidence.is_empty() {
        result.conclude(Status::Pass, "no self-pairs")
    } else {
        let count = evidence.len();
        result
            .with_evidence(evidence)
            .conclude(Status::Fail, format!("{count} self-pair row(s)"))
    })
}
