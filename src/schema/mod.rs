//! Column contracts for the three extracts and the schema validator.
//!
//! A [`DatasetSchema`] lists the columns a file must (or may) carry, their
//! declared type, their tolerated null rate and their value domain. The
//! [`SchemaReport`] compares a file's header and cell contents against it.

use std::collections::BTreeSet;
use std::fmt;

use arrow::datatypes::{DataType, Schema};
use serde::{Deserialize, Serialize};

pub mod coerce;
pub mod datasets;

pub use coerce::{CoercedColumn, coerce_column, is_blank};
pub use datasets::{annual_scores, pairwise_similarity, topic_votes};

use crate::config::ValidationConfig;

/// Declared type of a column once its text cells are coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// 64-bit integer; integral decimals such as `12.0` are accepted
    Integer,
    /// Finite 64-bit float
    Float,
    /// Free text
    Text,
}

impl ColumnType {
    /// Arrow type the column is stored as after coercion
    #[must_use]
    pub const fn data_type(self) -> DataType {
        match self {
            Self::Integer => DataType::Int64,
            Self::Float => DataType::Float64,
            Self::Text => DataType::Utf8,
        }
    }

    /// Whether the column takes part in statistics and outlier detection
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Domain a column's non-null values must fall within
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// Inclusive numeric bounds; an absent side is unbounded
    Bounded { min: Option<f64>, max: Option<f64> },
    /// Exactly three uppercase ASCII letters
    Iso3,
    /// The configured coverage window of years
    YearWindow,
}

impl Domain {
    /// Inclusive range `[min, max]`
    #[must_use]
    pub const fn between(min: f64, max: f64) -> Self {
        Self::Bounded {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Lower bound only
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self::Bounded {
            min: Some(min),
            max: None,
        }
    }

    /// Resolve the numeric bounds, reading the year window from configuration
    #[must_use]
    pub fn bounds(&self, config: &ValidationConfig) -> Option<(Option<f64>, Option<f64>)> {
        match *self {
            Self::Bounded { min, max } => Some((min, max)),
            Self::YearWindow => Some((
                Some(config.first_year as f64),
                Some(config.last_year as f64),
            )),
            Self::Iso3 => None,
        }
    }

    /// Human-readable form used in check labels
    #[must_use]
    pub fn describe(&self, config: &ValidationConfig) -> String {
        match self.bounds(config) {
            Some((Some(min), Some(max))) => format!("[{min}, {max}]"),
            Some((Some(min), None)) => format!(">= {min}"),
            Some((None, Some(max))) => format!("<= {max}"),
            Some((None, None)) => "any number".to_string(),
            None => "ISO3 code [A-Z]{3}".to_string(),
        }
    }
}

/// Contract for one column of an extract
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Header name as written in the CSV
    pub name: &'static str,
    /// Declared type
    pub column_type: ColumnType,
    /// Whether absence of the column is a schema failure
    pub required: bool,
    /// Tolerated null percentage; `None` means the column must be fully populated
    pub null_tolerance: Option<f64>,
    /// Value domain checked by the range validator
    pub domain: Option<Domain>,
}

impl ColumnSpec {
    const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            required: true,
            null_tolerance: None,
            domain: None,
        }
    }

    #[must_use]
    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    #[must_use]
    pub const fn float(name: &'static str) -> Self {
        Self::new(name, ColumnType::Float)
    }

    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self::new(name, ColumnType::Text)
    }

    /// Column may be absent from the file
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Column may hold up to `percent` nulls before a warning is raised
    #[must_use]
    pub const fn nullable(mut self, percent: f64) -> Self {
        self.null_tolerance = Some(percent);
        self
    }

    #[must_use]
    pub const fn domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }
}

/// Names of the four vote-count columns of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteColumns {
    pub yes: &'static str,
    pub no: &'static str,
    pub abstain: &'static str,
    pub total: &'static str,
}

impl VoteColumns {
    #[must_use]
    pub const fn all(&self) -> [&'static str; 4] {
        [self.yes, self.no, self.abstain, self.total]
    }
}

/// Contract for one extract file
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSchema {
    /// Short dataset name used in reports
    pub name: &'static str,
    /// File name inside the data directory
    pub file_name: &'static str,
    /// Primary key columns, in display order
    pub key_columns: Vec<&'static str>,
    /// Year column
    pub year_column: &'static str,
    /// Columns holding country codes
    pub country_columns: Vec<&'static str>,
    /// Vote-count columns, for datasets that carry them
    pub vote_columns: Option<VoteColumns>,
    /// Every known column
    pub columns: Vec<ColumnSpec>,
}

impl DatasetSchema {
    /// Look up a column contract by header name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns that take part in statistics, excluding the year
    pub fn measure_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns
            .iter()
            .filter(|c| c.column_type.is_numeric() && c.name != self.year_column)
    }
}

/// A column whose cells could not all be coerced to the declared type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MistypedColumn {
    pub column: String,
    pub expected: ColumnType,
    /// Number of non-empty cells that failed to parse
    pub bad_cells: usize,
    /// First offending cells as (CSV line, raw text)
    pub examples: Vec<(usize, String)>,
}

/// Outcome of comparing a file against its [`DatasetSchema`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaReport {
    /// Expected columns found in the file, in file order
    pub present: Vec<String>,
    /// Required columns absent from the file
    pub missing_required: Vec<String>,
    /// Optional columns absent from the file
    pub missing_optional: Vec<String>,
    /// Columns in the file that the contract does not know
    pub unexpected: Vec<String>,
    /// Present columns with cells that are not of the declared type
    pub mistyped: Vec<MistypedColumn>,
}

impl SchemaReport {
    /// Whether the file satisfies the contract exactly
    #[must_use]
    pub fn compatible(&self) -> bool {
        self.missing_required.is_empty() && self.mistyped.is_empty() && self.unexpected.is_empty()
    }

    /// Columns that checks must not rely on
    ///
    /// Absent optional columns are not blocked: checks on them are simply not
    /// scheduled.
    #[must_use]
    pub fn blocked_columns(&self) -> BTreeSet<String> {
        self.missing_required
            .iter()
            .cloned()
            .chain(self.mistyped.iter().map(|m| m.column.clone()))
            .collect()
    }

    /// Whether a required column is missing or a present column is malformed
    #[must_use]
    pub fn is_blocked(&self, column: &str) -> bool {
        self.missing_required.iter().any(|c| c == column)
            || self.mistyped.iter().any(|m| m.column == column)
    }
}

/// Compare a file header against the expected column set
///
/// Only names are compared here; cell types are checked during coercion and
/// recorded in [`SchemaReport::mistyped`].
#[must_use]
pub fn check_columns(actual: &Schema, expected: &DatasetSchema) -> SchemaReport {
    let mut report = SchemaReport::default();

    for field in actual.fields() {
        if expected.column(field.name()).is_some() {
            report.present.push(field.name().clone());
        } else {
            report.unexpected.push(field.name().clone());
        }
    }

    for spec in &expected.columns {
        if actual.index_of(spec.name).is_err() {
            if spec.required {
                report.missing_required.push(spec.name.to_string());
            } else {
                report.missing_optional.push(spec.name.to_string());
            }
        }
    }

    report
}
