//! Descriptive statistics and verification samples.

use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::Table;

/// Summary statistics of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub dataset: String,
    pub column: String,
    /// Non-null values
    pub count: usize,
    pub nulls: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Mean of a slice, `None` when empty
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation, `None` with fewer than two values
#[must_use]
pub fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let variance =
        values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Linearly interpolated quantile of sorted values
#[must_use]
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    match sorted.len() {
        0 => None,
        1 => Some(sorted[0]),
        n => {
            let position = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let weight = position - lower as f64;
            Some((sorted[upper] - sorted[lower]).mul_add(weight, sorted[lower]))
        }
    }
}

/// Profile a numeric column of a table
pub fn profile_column(table: &Table, column: &str) -> Result<ColumnProfile> {
    let values = table.numeric_values(column)?;
    let nulls = values.iter().filter(|v| v.is_none()).count();
    let sorted = values
        .into_iter()
        .flatten()
        .sorted_by(f64::total_cmp)
        .collect_vec();
    let mean = mean(&sorted);

    Ok(ColumnProfile {
        dataset: table.name().to_string(),
        column: column.to_string(),
        count: sorted.len(),
        nulls,
        mean,
        std: mean.and_then(|m| sample_std(&sorted, m)),
        min: sorted.first().copied(),
        p25: quantile(&sorted, 0.25),
        p50: quantile(&sorted, 0.50),
        p75: quantile(&sorted, 0.75),
        max: sorted.last().copied(),
    })
}

/// Profile every usable numeric measure column of a table
pub fn profile_table(table: &Table) -> Result<Vec<ColumnProfile>> {
    table
        .schema()
        .measure_columns()
        .filter(|spec| table.is_usable(spec.name))
        .map(|spec| profile_column(table, spec.name))
        .collect()
}

/// One sampled row, rendered as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRow {
    pub line: usize,
    pub key: String,
    pub values: Vec<String>,
}

/// Rows drawn for manual spot verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSample {
    pub dataset: String,
    pub seed: u64,
    pub columns: Vec<String>,
    pub rows: Vec<SampleRow>,
}

/// Draw a seeded random sample of rows, returned in file order
///
/// The same seed over the same table always yields the same rows.
pub fn verification_sample(
    table: &Table,
    columns: &[&str],
    size: usize,
    seed: u64,
) -> Result<VerificationSample> {
    let columns = columns
        .iter()
        .copied()
        .filter(|c| table.has_column(c))
        .collect_vec();
    let amount = size.min(table.num_rows());

    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, table.num_rows(), amount)
        .into_iter()
        .sorted()
        .collect_vec();

    let mut rows = Vec::with_capacity(picked.len());
    for row in picked {
        let values = columns
            .iter()
            .map(|name| {
                let array = table.column(name)?;
                if array.is_null(row) {
                    Ok("null".to_string())
                } else {
                    Ok(array_value_to_string(array.as_ref(), row)?)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(SampleRow {
            line: table.line_of(row),
            key: table.row_key(row).to_string(),
            values,
        });
    }

    Ok(VerificationSample {
        dataset: table.name().to_string(),
        seed,
        columns: columns.into_iter().map(str::to_string).collect(),
        rows,
    })
}
