//! Configuration for the validators.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::{QcError, Result};

/// Year absent from every extract because of the 1964 Article 19 crisis
pub const ARTICLE_19_YEAR: i64 = 1964;

/// Name of the directory holding the CSV extracts
pub const DATA_DIR_NAME: &str = "data";

/// Nearest `data` directory at or above a starting directory
fn find_data_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Default location of the CSV extracts
///
/// Resolved from the executable's own location, so the validators run from
/// any working directory. Falls back to the crate's `data` directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(find_data_dir))
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join(DATA_DIR_NAME))
}

/// Configuration shared by every validator
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Directory holding the three CSV extracts
    pub data_dir: PathBuf,
    /// Restrict every check to a single year
    pub year_filter: Option<i64>,
    /// First year of expected coverage
    pub first_year: i64,
    /// Last year of expected coverage
    pub last_year: i64,
    /// Years known to be absent, with the documented reason
    pub documented_missing_years: BTreeMap<i64, String>,
    /// Size of the member-state universe
    pub expected_country_count: usize,
    /// First year every annual roster must list the whole universe; earlier
    /// years may be short while membership was still growing
    pub full_roster_from: i64,
    /// Outlier threshold in standard deviations
    pub outlier_threshold: f64,
    /// Share of zero similarities above which a warning is raised
    pub zero_similarity_warn_share: f64,
    /// Similarities with an absolute value below this are "near zero"
    pub near_zero_epsilon: f64,
    /// Number of rows drawn for manual verification
    pub sample_size: usize,
    /// Seed for the verification sample
    pub sample_seed: u64,
    /// Rows per Arrow batch while reading CSV files
    pub batch_size: usize,
    /// Evidence lines printed per non-failing check; `None` prints everything
    pub evidence_limit: Option<usize>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let mut documented_missing_years = BTreeMap::new();
        documented_missing_years.insert(
            ARTICLE_19_YEAR,
            "Article 19 crisis: no substantive votes".to_string(),
        );

        Self {
            data_dir: default_data_dir(),
            year_filter: None,
            first_year: 1946,
            last_year: 2025,
            documented_missing_years,
            expected_country_count: 193,
            full_roster_from: 1990,
            outlier_threshold: 3.0,
            zero_similarity_warn_share: 0.5,
            near_zero_epsilon: 0.001,
            sample_size: 5,
            sample_seed: 42,
            batch_size: 8192,
            evidence_limit: Some(20),
        }
    }
}

impl ValidationConfig {
    /// Create a configuration reading from the given data directory
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Check the configuration for values that would make the checks meaningless
    pub fn validate(&self) -> Result<()> {
        if self.first_year > self.last_year {
            return Err(QcError::Config(format!(
                "first year {} is after last year {}",
                self.first_year, self.last_year
            )));
        }
        if !(self.outlier_threshold.is_finite() && self.outlier_threshold > 0.0) {
            return Err(QcError::Config(format!(
                "outlier threshold must be a positive number of standard deviations, got {}",
                self.outlier_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.zero_similarity_warn_share) {
            return Err(QcError::Config(format!(
                "zero-similarity share must be within [0, 1], got {}",
                self.zero_similarity_warn_share
            )));
        }
        if let Some(year) = self.year_filter {
            if !(self.first_year..=self.last_year).contains(&year) {
                return Err(QcError::Config(format!(
                    "year {year} is outside the covered range {}-{}",
                    self.first_year, self.last_year
                )));
            }
        }
        Ok(())
    }

    /// Years the data is expected to cover, honouring the year filter
    ///
    /// Documented absences are included; callers classify them separately.
    #[must_use]
    pub fn expected_years(&self) -> BTreeSet<i64> {
        match self.year_filter {
            Some(year) => std::iter::once(year).collect(),
            None => (self.first_year..=self.last_year).collect(),
        }
    }

    /// Reason a year is allowed to be absent, if it is documented
    #[must_use]
    pub fn documented_absence(&self, year: i64) -> Option<&str> {
        self.documented_missing_years.get(&year).map(String::as_str)
    }

    /// Path of a dataset file inside the data directory
    #[must_use]
    pub fn data_file(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}
