//! Primary-key uniqueness.

use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{Category, CheckResult, Evidence, Status};
use crate::table::Table;

/// Every primary key must identify exactly one row
///
/// Keys are compared on their raw text so that malformed key cells still
/// collide with each other. Every duplicated key is listed with its lines.
#[must_use]
pub fn duplicate_keys(table: &Table) -> CheckResult {
    let mut rows_by_key: FxHashMap<SmallVec<[Option<&str>; 3]>, Vec<usize>> =
        FxHashMap::default();
    for row in 0..table.num_rows() {
        rows_by_key
            .entry(table.raw_key_parts(row))
            .or_default()
            .push(row);
    }

    let duplicates = rows_by_key
        .into_values()
        .filter(|rows| rows.len() > 1)
        .sorted_by_key(|rows| rows[0])
        .collect_vec();

    let key_names = table.schema().key_columns.join(", ");
    let result = CheckResult::new(
        table.name(),
        "uniqueness.primary_key",
        Category::Uniqueness,
        format!("({key_names}) is unique"),
    );

    if duplicates.is_empty() {
        return result.conclude(
            Status::Pass,
            format!("{} rows, no duplicate keys", table.num_rows()),
        );
    }

    let extra_rows: usize = duplicates.iter().map(|rows| rows.len() - 1).sum();
    let evidence = duplicates
        .iter()
        .map(|rows| {
            let lines = rows.iter().map(|&row| table.line_of(row)).join(", ");
            Evidence::new(
                table.row_key(rows[0]),
                format!("{} rows share this key (lines {lines})", rows.len()),
            )
        })
        .collect();

    result.with_evidence(evidence).conclude(
        Status::Fail,
        format!(
            "{} duplicated key(s), {extra_rows} surplus row(s)",
            duplicates.len()
        ),
    )
}
