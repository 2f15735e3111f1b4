//! Logging utilities
//!
//! Standardized log lines for loading and validating extracts. Logs go to
//! stderr through `env_logger`; they never replace the report itself.

use std::path::Path;
use std::time::Duration;

use crate::checks::{CheckResult, Status};

/// Log the start of a dataset load
pub fn log_load_start(dataset: &str, path: &Path) {
    log::info!("Loading {dataset} from {}", path.display());
}

/// Log a completed dataset load
///
/// # Arguments
/// * `dataset` - Dataset name
/// * `path` - File that was read
/// * `rows` - Number of rows loaded
/// * `columns` - Number of columns in the file
/// * `elapsed` - Time spent reading and coercing
pub fn log_load_complete(dataset: &str, path: &Path, rows: usize, columns: usize, elapsed: Duration) {
    log::info!(
        "Loaded {rows} rows x {columns} columns of {dataset} from {} in {elapsed:?}",
        path.display()
    );
}

/// Log a finished check at a level matching its status
pub fn log_check_outcome(result: &CheckResult) {
    match result.status {
        Status::Pass => log::debug!("{} {}: {}", result.dataset, result.check, result.summary),
        Status::Warning => log::info!(
            "{} {} warned with {} evidence item(s)",
            result.dataset,
            result.check,
            result.evidence.len()
        ),
        Status::Fail => log::warn!(
            "{} {} failed with {} evidence item(s)",
            result.dataset,
            result.check,
            result.evidence.len()
        ),
    }
}
