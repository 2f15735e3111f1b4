//! Schema conformance as a check result.

use itertools::Itertools;

use super::{Category, CheckResult, Evidence, Status};
use crate::table::Table;

/// Turn a table's schema report into a check result
///
/// Missing required or mistyped columns fail; unexpected columns warn;
/// missing optional columns are noted.
#[must_use]
pub fn schema_conformance(table: &Table) -> CheckResult {
    let report = table.schema_report();
    let result = CheckResult::new(
        table.name(),
        "schema.columns",
        Category::Schema,
        "Columns match the expected schema",
    );

    let mut evidence = Vec::new();
    for column in &report.missing_required {
        evidence.push(Evidence::new(column, "required column is missing"));
    }
    for mistyped in &report.mistyped {
        let examples = mistyped
            .examples
            .iter()
            .map(|(line, text)| format!("line {line}: {text:?}"))
            .join(", ");
        evidence.push(Evidence::new(
            &mistyped.column,
            format!(
                "{} cell(s) are not {} ({examples})",
                mistyped.bad_cells, mistyped.expected
            ),
        ));
    }
    for column in &report.unexpected {
        evidence.push(Evidence::new(column, "column is not part of the schema"));
    }

    let mut notes = vec![format!(
        "{} rows x {} columns",
        table.num_rows(),
        table.column_count()
    )];
    if !report.missing_optional.is_empty() {
        notes.push(format!(
            "optional columns absent: {}",
            report.missing_optional.join(", ")
        ));
    }

    let broken = report.missing_required.len() + report.mistyped.len();
    let result = result.with_evidence(evidence).with_notes(notes);
    if broken > 0 {
        result.conclude(
            Status::Fail,
            format!(
                "{} missing and {} mistyped column(s); dependent checks skipped",
                report.missing_required.len(),
                report.mistyped.len()
            ),
        )
    } else if !report.unexpected.is_empty() {
        result.conclude(
            Status::Warning,
            format!("{} unexpected column(s)", report.unexpected.len()),
        )
    } else {
        result.conclude(
            Status::Pass,
            format!("all {} expected columns present and typed", report.present.len()),
        )
    }
}
