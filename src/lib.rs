//! Quality-control validation for aggregated UN General Assembly voting extracts.
//!
//! Three flat CSV snapshots are checked: annual country scores, yearly pairwise
//! voting similarity and per-topic vote breakdowns. Each validator loads its
//! file(s) into Arrow record batches, runs a fixed checklist and produces a
//! [`ValidationReport`] that is rendered to the console and can be written as JSON.

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod schema;
pub mod stats;
pub mod table;
pub mod utils;
pub mod validators;

// Core types
pub use config::ValidationConfig;
pub use error::{QcError, Result};
pub use loader::{load_dataset, read_csv};
pub use table::{RowKey, Table};

// Checks and reporting
pub use checks::{Category, CheckResult, Evidence, Status};
pub use report::{ValidationReport, render_report};
pub use schema::{ColumnSpec, ColumnType, DatasetSchema, Domain, SchemaReport};

// Arrow types
pub use arrow::record_batch::RecordBatch;
