//! Vote arithmetic: Yes + No + Abstain must equal Total.

use arrow::array::{Array, Int64Array};

use super::{Category, CheckResult, Evidence, Status};
use crate::error::Result;
use crate::schema::VoteColumns;
use crate::table::Table;

pub(crate) fn int_value(array: &Int64Array, row: usize) -> Option<i64> {
    array.is_valid(row).then(|| array.value(row))
}

/// Check `Yes + No + Abstain == Total` on every row
///
/// Every violating row is reported; values are never corrected. Rows with a
/// null vote cell cannot be checked and are counted in a note instead.
pub fn vote_totals(table: &Table, votes: &VoteColumns) -> Result<CheckResult> {
    let yes = table.int_column(votes.yes)?;
    let no = table.int_column(votes.no)?;
    let abstain = table.int_column(votes.abstain)?;
    let total = table.int_column(votes.total)?;

    let mut evidence = Vec::new();
    let mut incomplete_rows = 0usize;
    let mut checked = 0usize;

    for row in 0..table.num_rows() {
        let (Some(y), Some(n), Some(a), Some(t)) = (
            int_value(yes, row),
            int_value(no, row),
            int_value(abstain, row),
            int_value(total, row),
        ) else {
            incomplete_rows += 1;
            continue;
        };
        checked += 1;

        let line = table.line_of(row);
        match y.checked_add(n).and_then(|s| s.checked_add(a)) {
            Some(sum) if sum == t => {}
            Some(sum) => evidence.push(Evidence::new(
                table.row_key(row),
                format!(
                    "Yes {y} + No {n} + Abstain {a} = {sum}, but Total = {t} (diff {:+}, line {line})",
                    i128::from(sum) - i128::from(t)
                ),
            )),
            None => evidence.push(Evidence::new(
                table.row_key(row),
                format!("Yes {y} + No {n} + Abstain {a} overflows (line {line})"),
            )),
        }
    }

    let mut result = CheckResult::new(
        table.name(),
        "arithmetic.vote_totals",
        Category::Arithmetic,
        format!(
            "{} + {} + {} = {}",
            votes.yes, votes.no, votes.abstain, votes.total
        ),
    );
    if incomplete_rows > 0 {
        result.note(format!(
            "{incomplete_rows} row(s) with a null vote cell not checked"
        ));
    }

    Ok(if evidence.is_empty() {
        result.conclude(
            Status::Pass,
            format!("all {checked} checked rows add up"),
        )
    } else {
        let violations = evidence.len();
        result
            .with_evidence(evidence)
            .conclude(
                Status::Fail,
                format!("{violations} of {checked} rows do not add up"),
            )
    })
}
