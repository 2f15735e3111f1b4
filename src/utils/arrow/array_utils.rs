//! Utilities for working with Arrow arrays.

use arrow::array::{Array, ArrayRef, BooleanArray, Int64Array};
use arrow::record_batch::RecordBatch;

use crate::error::{QcError, Result};

/// Get a column from a record batch by name
///
/// # Errors
/// Returns [`QcError::ColumnNotFound`] if the column does not exist
pub fn column_by_name<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(column_name)
        .ok_or_else(|| QcError::ColumnNotFound {
            column: column_name.to_string(),
        })
}

/// Downcast a column to a specific array type with clear error messages
///
/// # Arguments
///
/// * `array` - The array reference to downcast
/// * `column_name` - The name of the column (for error messages)
/// * `expected_type_name` - A human-readable name of the expected type (for error messages)
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| QcError::ColumnType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
        })
}

/// Build a mask selecting rows whose integer column equals `value`
///
/// Null cells are never selected.
#[must_use]
pub fn row_filter_mask(column: &Int64Array, value: i64) -> BooleanArray {
    column
        .iter()
        .map(|cell| Some(cell == Some(value)))
        .collect()
}
