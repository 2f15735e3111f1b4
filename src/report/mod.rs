//! Structured result of a validator run.
//!
//! A [`ValidationReport`] holds one record per check and is the single source
//! for both the console report ([`render_report`]) and the JSON artifact.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checks::{CheckResult, Status};
use crate::config::ValidationConfig;
use crate::error::{QcError, Result};
use crate::stats::{ColumnProfile, VerificationSample};
use crate::table::Table;
use crate::utils::logging::log_check_outcome;

mod render;

pub use render::render_report;

/// A loaded extract, as listed in the report header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// A check that could not run because a column it needs is blocked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCheck {
    pub dataset: String,
    pub check: String,
    pub reason: String,
}

/// Number of checks per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pass: usize,
    pub warning: usize,
    pub fail: usize,
}

/// Everything one validator run found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Validator that produced the report
    pub validator: String,
    pub generated_at: DateTime<Utc>,
    pub data_dir: PathBuf,
    pub year_filter: Option<i64>,
    pub outlier_threshold: f64,
    pub datasets: Vec<DatasetSummary>,
    pub checks: Vec<CheckResult>,
    pub skipped: Vec<SkippedCheck>,
    pub profiles: Vec<ColumnProfile>,
    pub samples: Vec<VerificationSample>,
    /// Worst status over all checks
    pub overall: Status,
    /// False when any check was skipped
    pub complete: bool,
}

impl ValidationReport {
    /// Start an empty report for a validator
    #[must_use]
    pub fn new(validator: impl Into<String>, config: &ValidationConfig) -> Self {
        Self {
            validator: validator.into(),
            generated_at: Utc::now(),
            data_dir: config.data_dir.clone(),
            year_filter: config.year_filter,
            outlier_threshold: config.outlier_threshold,
            datasets: Vec::new(),
            checks: Vec::new(),
            skipped: Vec::new(),
            profiles: Vec::new(),
            samples: Vec::new(),
            overall: Status::Pass,
            complete: true,
        }
    }

    pub fn add_dataset(&mut self, table: &Table) {
        self.datasets.push(DatasetSummary {
            name: table.name().to_string(),
            path: table.path().to_path_buf(),
            rows: table.num_rows(),
            columns: table.column_count(),
        });
    }

    /// Record a check result
    pub fn push_check(&mut self, result: CheckResult) {
        log_check_outcome(&result);
        self.overall = self.overall.max(result.status);
        self.checks.push(result);
    }

    /// Record a check that could not run
    pub fn push_skipped(&mut self, dataset: &str, check: impl Into<String>, reason: impl Into<String>) {
        let skipped = SkippedCheck {
            dataset: dataset.to_string(),
            check: check.into(),
            reason: reason.into(),
        };
        log::warn!("{} {} skipped: {}", skipped.dataset, skipped.check, skipped.reason);
        self.complete = false;
        self.skipped.push(skipped);
    }

    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for check in &self.checks {
            match check.status {
                Status::Pass => counts.pass += 1,
                Status::Warning => counts.warning += 1,
                Status::Fail => counts.fail += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.overall == Status::Fail
    }

    /// Look up a check by dataset and identifier
    #[must_use]
    pub fn check(&self, dataset: &str, check: &str) -> Option<&CheckResult> {
        self.checks
            .iter()
            .find(|c| c.dataset == dataset && c.check == check)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| QcError::io(path, "writing JSON report", e))?;
        log::info!("Wrote JSON report to {}", path.display());
        Ok(())
    }
}
