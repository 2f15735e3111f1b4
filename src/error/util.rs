//! Utility functions for error handling
//!
//! File-system checks that turn a bare `io::Error` into a [`QcError`] naming the
//! path and what it was needed for.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{QcError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(QcError::MissingPath {
            path: path.to_path_buf(),
            reason: format!("File not found (needed for {purpose})"),
        });
    }

    if !path.is_file() {
        return Err(QcError::MissingPath {
            path: path.to_path_buf(),
            reason: format!("Path is not a file (expected a file for {purpose})"),
        });
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "permission denied".to_string(),
            _ => format!("failed to open file for {purpose}"),
        };
        QcError::io(path, context, e)
    })
}

/// Check that a directory exists and is readable
pub fn validate_directory(path: &Path, purpose: &str) -> Result<()> {
    if !path.exists() {
        return Err(QcError::MissingPath {
            path: path.to_path_buf(),
            reason: format!("Directory not found (needed for {purpose})"),
        });
    }

    if !path.is_dir() {
        return Err(QcError::MissingPath {
            path: path.to_path_buf(),
            reason: format!("Path is not a directory (expected a directory for {purpose})"),
        });
    }

    fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| QcError::io(path, format!("cannot list directory for {purpose}"), e))
}
