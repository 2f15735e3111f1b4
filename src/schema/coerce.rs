//! Conversion of raw text columns to their declared types.
//!
//! Every CSV column is first read as text. Coercion parses each cell; cells that
//! are empty become nulls, cells that do not parse become nulls *and* are
//! recorded so the schema validator can report the column as mistyped.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};

use super::ColumnType;

/// Largest magnitude at which every integer is exactly representable as `f64`
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Result of coercing one text column
#[derive(Debug, Clone)]
pub struct CoercedColumn {
    /// Typed array, nulls where the text was empty or unparseable
    pub array: ArrayRef,
    /// Rows whose non-empty text failed to parse, with the raw text
    pub failures: Vec<(usize, String)>,
}

/// Whether a raw cell counts as missing
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Convert a text column to the declared type
#[must_use]
pub fn coerce_column(raw: &StringArray, column_type: ColumnType) -> CoercedColumn {
    match column_type {
        ColumnType::Integer => coerce_with(raw, parse_integer, |values| {
            Arc::new(Int64Array::from(values)) as ArrayRef
        }),
        ColumnType::Float => coerce_with(raw, parse_float, |values| {
            Arc::new(Float64Array::from(values)) as ArrayRef
        }),
        ColumnType::Text => {
            let values: StringArray = raw
                .iter()
                .map(|cell| cell.filter(|s| !is_blank(s)))
                .collect();
            CoercedColumn {
                array: Arc::new(values),
                failures: Vec::new(),
            }
        }
    }
}

fn coerce_with<T, P, B>(raw: &StringArray, parse: P, build: B) -> CoercedColumn
where
    P: Fn(&str) -> Option<T>,
    B: FnOnce(Vec<Option<T>>) -> ArrayRef,
{
    let mut failures = Vec::new();
    let mut values = Vec::with_capacity(raw.len());

    for row in 0..raw.len() {
        if raw.is_null(row) || is_blank(raw.value(row)) {
            values.push(None);
            continue;
        }
        let text = raw.value(row);
        match parse(text.trim()) {
            Some(value) => values.push(Some(value)),
            None => {
                failures.push((row, text.to_string()));
                values.push(None);
            }
        }
    }

    CoercedColumn {
        array: build(values),
        failures,
    }
}

/// Parse an integer, accepting integral decimals written by float-typed exporters
fn parse_integer(text: &str) -> Option<i64> {
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    let value = parse_float(text)?;
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Some(value as i64)
    } else {
        None
    }
}

/// Parse a finite float
fn parse_float(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
