//! CSV loading into typed Arrow tables.
//!
//! Files are read in two steps: every column is first read as text, then each
//! expected column is coerced to its declared type. Keeping the text pass
//! separate lets the schema validator report mistyped cells instead of the
//! reader aborting on the first bad value.

use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::StringArray;
use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::config::ValidationConfig;
use crate::error::util::safe_open_file;
use crate::error::{QcError, Result};
use crate::schema::{DatasetSchema, MistypedColumn, check_columns, coerce_column};
use crate::table::{Table, csv_line};
use crate::utils::arrow::{column_by_name, downcast_array, row_filter_mask};
use crate::utils::logging::{create_spinner, finish_and_clear, log_load_complete, log_load_start};

/// Number of offending cells kept as examples for a mistyped column
const MISTYPED_EXAMPLES: usize = 5;

/// Read a CSV file with a header into one record batch of text columns
///
/// Empty fields are read as nulls.
pub fn read_csv(path: &Path, batch_size: usize) -> Result<RecordBatch> {
    let mut file = safe_open_file(path, "reading CSV extract")?;

    let format = Format::default().with_header(true);
    let (header, _) = format.infer_schema(&mut file, Some(0))?;
    if header.fields().is_empty() {
        return Err(QcError::structure(
            path.display().to_string(),
            "file has no header row",
        ));
    }

    // Infer only the names; every column is read as text
    let fields = header
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect_vec();
    let schema = Arc::new(Schema::new(fields));

    file.seek(SeekFrom::Start(0))
        .map_err(|e| QcError::io(path, "rewinding CSV extract", e))?;

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_batch_size(batch_size)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

/// Load and coerce one extract
///
/// Returns an error only for structural problems: unreadable file, malformed
/// CSV, no recognisable column, or a missing key column. Everything else is
/// recorded in the table's [`crate::schema::SchemaReport`].
pub fn load_dataset(path: &Path, schema: &DatasetSchema, config: &ValidationConfig) -> Result<Table> {
    log_load_start(schema.name, path);
    let start = Instant::now();
    let spinner = create_spinner(Some(&format!("Reading {}", path.display())));

    let raw = read_csv(path, config.batch_size);
    finish_and_clear(&spinner);
    let raw = raw?;

    let mut report = check_columns(&raw.schema(), schema);
    if report.present.is_empty() {
        return Err(QcError::structure(
            schema.name,
            format!(
                "none of the expected columns were found (header: {})",
                raw.schema().fields().iter().map(|f| f.name()).join(", ")
            ),
        ));
    }
    if let Some(missing_key) = schema
        .key_columns
        .iter()
        .find(|k| report.missing_required.iter().any(|m| m == *k))
    {
        return Err(QcError::structure(
            schema.name,
            format!("key column '{missing_key}' is missing, rows cannot be identified"),
        ));
    }

    let mut fields = Vec::new();
    let mut columns = Vec::new();
    for spec in &schema.columns {
        let Some(raw_column) = raw.column_by_name(spec.name) else {
            continue;
        };
        let text = downcast_array::<StringArray>(raw_column, spec.name, "text")?;
        let coerced = coerce_column(text, spec.column_type);

        if !coerced.failures.is_empty() {
            log::warn!(
                "{}: {} cell(s) of '{}' are not {}",
                schema.name,
                coerced.failures.len(),
                spec.name,
                spec.column_type
            );
            report.mistyped.push(MistypedColumn {
                column: spec.name.to_string(),
                expected: spec.column_type,
                bad_cells: coerced.failures.len(),
                examples: coerced
                    .failures
                    .iter()
                    .take(MISTYPED_EXAMPLES)
                    .map(|(row, text)| (csv_line(*row), text.clone()))
                    .collect(),
            });
        }

        fields.push(Field::new(spec.name, spec.column_type.data_type(), true));
        columns.push(coerced.array);
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;

    let raw_keys = schema
        .key_columns
        .iter()
        .map(|key| {
            downcast_array::<StringArray>(column_by_name(&raw, key)?, key, "text").cloned()
        })
        .collect::<Result<Vec<_>>>()?;

    let column_count = raw.num_columns();
    let table = Table::new(
        schema.clone(),
        path.to_path_buf(),
        batch,
        raw_keys,
        report,
        column_count,
    );

    let table = match config.year_filter {
        Some(year) if table.is_usable(schema.year_column) => {
            let mask = row_filter_mask(table.int_column(schema.year_column)?, year);
            let filtered = table.filter_rows(&mask)?;
            log::info!(
                "{}: kept {} of {} rows for year {year}",
                schema.name,
                filtered.num_rows(),
                table.num_rows()
            );
            filtered
        }
        Some(year) => {
            log::warn!(
                "{}: year column is unusable, cannot restrict to {year}",
                schema.name
            );
            table
        }
        None => table,
    };

    log_load_complete(
        schema.name,
        path,
        table.num_rows(),
        column_count,
        start.elapsed(),
    );
    Ok(table)
}

/// Load a dataset from the configured data directory
pub fn load_from_config(schema: &DatasetSchema, config: &ValidationConfig) -> Result<Table> {
    load_dataset(&config.data_file(schema.file_name), schema, config)
}
