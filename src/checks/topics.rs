//! Topic tag vocabulary.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use super::{Category, CheckResult, Evidence, Status};
use crate::error::Result;
use crate::table::Table;

/// Tags that differ only by case or surrounding whitespace are one topic
/// spelled several ways
pub fn tag_variants(table: &Table, column: &str) -> Result<CheckResult> {
    let raw = table.text_column(column)?;

    let mut spellings: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for tag in raw.iter().flatten() {
        spellings
            .entry(tag.trim().to_lowercase())
            .or_default()
            .insert(tag);
    }

    let evidence = spellings
        .iter()
        .filter(|(_, variants)| variants.len() > 1)
        .map(|(normalized, variants)| {
            Evidence::new(
                normalized,
                format!(
                    "{} spellings: {}",
                    variants.len(),
                    variants.iter().map(|v| format!("{v:?}")).join(", ")
                ),
            )
        })
        .collect_vec();

    let result = CheckResult::new(
        table.name(),
        "topics.tag_variants",
        Category::Topics,
        format!("{column} spelled consistently"),
    )
    .with_notes(vec![format!(
        "vocabulary: {} distinct topic(s): {}",
        spellings.len(),
        spellings.keys().take(20).join(", ")
    )]);

    Ok(if evidence.is_empty() {
        result.conclude(
            Status::Pass,
            format!("{} distinct topic tag(s)", spellings.len()),
        )
    } else {
        let count = evidence.len();
        result.with_evidence(evidence).conclude(
            Status::Warning,
            format!("{count} topic(s) spelled inconsistently"),
        )
    })
}
