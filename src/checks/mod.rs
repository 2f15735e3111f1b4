//! Individual data-quality checks.
//!
//! Every check is a plain function over one or more [`Table`](crate::Table)s
//! returning a [`CheckResult`]. Checks never modify data and never depend on
//! one another's outcome; the validators decide which checks to run.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod arithmetic;
pub mod completeness;
pub mod cross_file;
pub mod distribution;
pub mod outliers;
pub mod range;
pub mod schema;
pub mod similarity;
pub mod topics;
pub mod uniqueness;

/// Outcome of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The check found nothing to report
    Pass,
    /// A non-blocking anomaly that needs human judgement
    Warning,
    /// A stated invariant is violated
    Fail,
}

impl Status {
    /// Fixed-width console marker
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warning => "WARN",
            Self::Fail => "FAIL",
        }
    }

    /// Most severe status of a sequence; `Pass` when empty
    pub fn worst<I: IntoIterator<Item = Self>>(statuses: I) -> Self {
        statuses.into_iter().max().unwrap_or(Self::Pass)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warning => write!(f, "WARNING"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Report section a check belongs to, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Schema,
    Uniqueness,
    Arithmetic,
    Range,
    Completeness,
    Outliers,
    Similarity,
    Topics,
    Distribution,
    CrossFile,
}

impl Category {
    /// Section title used by the renderer
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Schema => "SCHEMA & STRUCTURE",
            Self::Uniqueness => "PRIMARY KEYS",
            Self::Arithmetic => "VOTE ARITHMETIC",
            Self::Range => "RANGE & DOMAIN",
            Self::Completeness => "COMPLETENESS",
            Self::Outliers => "OUTLIERS",
            Self::Similarity => "SIMILARITY CONSISTENCY",
            Self::Topics => "TOPIC TAGS",
            Self::Distribution => "DISTRIBUTIONS",
            Self::CrossFile => "CROSS-FILE CONSISTENCY",
        }
    }
}

/// One piece of supporting evidence: a row key, column, year or country, and what is wrong with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub key: String,
    pub detail: String,
}

impl Evidence {
    pub fn new(key: impl ToString, detail: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result record of one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Dataset the check ran against (`cross_files` for reconciliations)
    pub dataset: String,
    /// Stable check identifier, e.g. `arithmetic.vote_totals`
    pub check: String,
    pub category: Category,
    /// Short human-readable label
    pub label: String,
    pub status: Status,
    /// One-line summary
    pub summary: String,
    /// Supporting evidence, complete for failures
    pub evidence: Vec<Evidence>,
    /// Context that is not evidence of a defect
    pub notes: Vec<String>,
}

impl CheckResult {
    /// Start a passing result with no summary
    pub fn new(
        dataset: impl Into<String>,
        check: impl Into<String>,
        category: Category,
        label: impl Into<String>,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            check: check.into(),
            category,
            label: label.into(),
            status: Status::Pass,
            summary: String::new(),
            evidence: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Set the status and summary
    #[must_use]
    pub fn conclude(mut self, status: Status, summary: impl Into<String>) -> Self {
        self.status = status;
        self.summary = summary.into();
        self
    }

    #[must_use]
    pub fn with_evidence(mut self, evidence: Vec<Evidence>) -> Self {
        self.evidence = evidence;
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}

/// Percentage of `part` in `whole`, 0 for an empty whole
#[must_use]
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Render a short list of years, e.g. `1950, 1951, 1952 (+4 more)`
#[must_use]
pub fn year_list(years: &[i64], limit: usize) -> String {
    let shown = years
        .iter()
        .take(limit)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if years.len() > limit {
        format!("{shown} (+{} more)", years.len() - limit)
    } else {
        shown
    }
}
