//! Statistical outlier detection.

use super::{Category, CheckResult, Evidence, Status};
use crate::error::Result;
use crate::stats::{mean, sample_std};
use crate::table::Table;

/// Flag values more than `threshold` sample standard deviations from the mean
///
/// Outliers are reported for review, never removed, and never fail a run.
pub fn flag_outliers(table: &Table, column: &str, threshold: f64) -> Result<CheckResult> {
    let values = table.numeric_values(column)?;
    let present: Vec<f64> = values.iter().flatten().copied().collect();

    let result = CheckResult::new(
        table.name(),
        format!("outliers.{column}"),
        Category::Outliers,
        format!("{column} within {threshold} sigma of the mean"),
    );

    let center = mean(&present);
    let spread = center.and_then(|m| sample_std(&present, m));
    let (Some(mean), Some(std)) = (center, spread) else {
        return Ok(result
            .with_notes(vec![format!(
                "{} non-null value(s), too few for a standard deviation",
                present.len()
            )])
            .conclude(Status::Pass, "not enough values to test"));
    };

    let stats_note = format!("mean {mean:.4}, std {std:.4}, n {}", present.len());
    if std == 0.0 {
        return Ok(result
            .with_notes(vec![stats_note])
            .conclude(Status::Pass, "constant column, no outliers possible"));
    }

    let evidence: Vec<Evidence> = values
        .iter()
        .enumerate()
        .filter_map(|(row, value)| {
            let value = (*value)?;
            let sigmas = (value - mean) / std;
            (sigmas.abs() > threshold).then(|| {
                Evidence::new(
                    table.row_key(row),
                    format!(
                        "{column} = {value} is {sigmas:+.2} sigma from the mean (line {})",
                        table.line_of(row)
                    ),
                )
            })
        })
        .collect();

    let result = result.with_notes(vec![stats_note]);
    Ok(if evidence.is_empty() {
        result.conclude(Status::Pass, "no outliers")
    } else {
        let count = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Warning,
            format!("{count} value(s) beyond {threshold} sigma, flagged for review"),
        )
    })
}
