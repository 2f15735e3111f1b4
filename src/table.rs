//! In-memory typed view of one extract.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::filter;
use arrow::record_batch::RecordBatch;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

use crate::error::{QcError, Result};
use crate::schema::{DatasetSchema, SchemaReport};
use crate::utils::arrow::{column_by_name, downcast_array};

/// CSV line number of a data row (the header is line 1)
#[must_use]
pub const fn csv_line(row: usize) -> usize {
    row + 2
}

/// Primary-key values of a row, rendered as `AFG/1946`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey(SmallVec<[String; 3]>);

impl RowKey {
    /// Key values in key-column order
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for RowKey {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl Serialize for RowKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A loaded extract: typed columns, raw key text and the schema verdict
#[derive(Debug, Clone)]
pub struct Table {
    schema: DatasetSchema,
    path: PathBuf,
    batch: RecordBatch,
    raw_keys: Vec<StringArray>,
    lines: Vec<usize>,
    schema_report: SchemaReport,
    column_count: usize,
}

impl Table {
    /// Assemble a table from already coerced parts
    pub(crate) fn new(
        schema: DatasetSchema,
        path: PathBuf,
        batch: RecordBatch,
        raw_keys: Vec<StringArray>,
        schema_report: SchemaReport,
        column_count: usize,
    ) -> Self {
        let lines = (0..batch.num_rows()).map(csv_line).collect();
        Self {
            schema,
            path,
            batch,
            raw_keys,
            lines,
            schema_report,
            column_count,
        }
    }

    /// Dataset name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.schema.name
    }

    #[must_use]
    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn schema_report(&self) -> &SchemaReport {
        &self.schema_report
    }

    /// Typed columns present in the file
    #[must_use]
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Number of columns in the file, including unexpected ones
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Whether the file carries a column at all
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.batch.column_by_name(name).is_some()
    }

    /// Whether checks may rely on a column
    #[must_use]
    pub fn is_usable(&self, name: &str) -> bool {
        self.has_column(name) && !self.schema_report.is_blocked(name)
    }

    /// Required columns that are missing or mistyped
    #[must_use]
    pub fn blocked_columns(&self) -> BTreeSet<String> {
        self.schema_report.blocked_columns()
    }

    pub fn column(&self, name: &str) -> Result<&ArrayRef> {
        column_by_name(&self.batch, name)
    }

    pub fn int_column(&self, name: &str) -> Result<&Int64Array> {
        downcast_array::<Int64Array>(self.column(name)?, name, "integer")
    }

    pub fn float_column(&self, name: &str) -> Result<&Float64Array> {
        downcast_array::<Float64Array>(self.column(name)?, name, "float")
    }

    pub fn text_column(&self, name: &str) -> Result<&StringArray> {
        downcast_array::<StringArray>(self.column(name)?, name, "text")
    }

    /// Values of a numeric column as `f64`, nulls preserved
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let column = self.column(name)?;
        if let Some(ints) = column.as_any().downcast_ref::<Int64Array>() {
            return Ok(ints.iter().map(|v| v.map(|v| v as f64)).collect());
        }
        if let Some(floats) = column.as_any().downcast_ref::<Float64Array>() {
            return Ok(floats.iter().collect());
        }
        Err(QcError::ColumnType {
            column: name.to_string(),
            expected: "numeric".to_string(),
        })
    }

    /// Primary key of a row, taken from the raw text so malformed keys stay visible
    #[must_use]
    pub fn row_key(&self, row: usize) -> RowKey {
        self.raw_keys
            .iter()
            .map(|column| {
                if column.is_null(row) {
                    "<null>".to_string()
                } else {
                    column.value(row).trim().to_string()
                }
            })
            .collect()
    }

    /// Raw key text of a row, borrowed
    pub(crate) fn raw_key_parts(&self, row: usize) -> SmallVec<[Option<&str>; 3]> {
        self.raw_keys
            .iter()
            .map(|column| (!column.is_null(row)).then(|| column.value(row).trim()))
            .collect()
    }

    /// CSV line number a row was read from, stable under filtering
    #[must_use]
    pub fn line_of(&self, row: usize) -> usize {
        self.lines[row]
    }

    /// Keep only rows selected by the mask
    pub fn filter_rows(&self, mask: &BooleanArray) -> Result<Self> {
        let batch = arrow::compute::filter_record_batch(&self.batch, mask)?;
        let raw_keys = self
            .raw_keys
            .iter()
            .map(|column| {
                let filtered = filter(column, mask)?;
                downcast_array::<StringArray>(&filtered, "key", "text").cloned()
            })
            .collect::<Result<Vec<_>>>()?;
        let lines = self
            .lines
            .iter()
            .zip(mask.iter())
            .filter(|(_, keep)| keep.unwrap_or(false))
            .map(|(line, _)| *line)
            .collect();

        Ok(Self {
            schema: self.schema.clone(),
            path: self.path.clone(),
            batch,
            raw_keys,
            lines,
            schema_report: self.schema_report.clone(),
            column_count: self.column_count,
        })
    }
}
