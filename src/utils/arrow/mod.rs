//! Arrow data handling utilities
//!
//! Helpers for looking up columns in record batches and downcasting them to
//! concrete array types with errors that name the column.

pub mod array_utils;

pub use array_utils::{column_by_name, downcast_array, row_filter_mask};
