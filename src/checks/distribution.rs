//! Descriptive distributions for manual review.
//!
//! These results never warn or fail. They carry per-year and per-topic
//! figures as evidence so the JSON artifact keeps every line.

use std::collections::{BTreeMap, BTreeSet};

use arrow::array::Array;
use itertools::Itertools;

use super::arithmetic::int_value;
use super::{Category, CheckResult, Evidence, Status};
use crate::error::Result;
use crate::schema::VoteColumns;
use crate::stats::{mean, sample_std};
use crate::table::Table;

/// Pairs listed at each end of the similarity ranking
pub const RANKED_PAIRS: usize = 10;

/// Countries listed by summed topic votes
const TOP_COUNTRIES: usize = 10;

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

/// First smallest and first largest bucket of a year-keyed count
fn count_extremes(counts: &BTreeMap<i64, usize>) -> Option<((i64, usize), (i64, usize))> {
    let mut entries = counts.iter().map(|(year, count)| (*year, *count));
    let first = entries.next()?;
    Some(entries.fold((first, first), |(low, high), entry| {
        (
            if entry.1 < low.1 { entry } else { low },
            if entry.1 > high.1 { entry } else { high },
        )
    }))
}

/// Similarity statistics per year and the number of pairs per year
pub fn yearly_similarity(table: &Table, column: &str) -> Result<CheckResult> {
    let years = table.int_column(table.schema().year_column)?;
    let values = table.float_column(column)?;

    let mut by_year: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    let mut pairs: BTreeMap<i64, usize> = BTreeMap::new();
    for (year, value) in years.iter().zip(values.iter()) {
        let Some(year) = year else { continue };
        *pairs.entry(year).or_default() += 1;
        if let Some(value) = value {
            by_year.entry(year).or_default().push(value);
        }
    }

    let evidence = by_year
        .iter()
        .map(|(year, values)| {
            let center = mean(values);
            let spread = center.and_then(|m| sample_std(values, m));
            let low = values.iter().copied().reduce(f64::min);
            let high = values.iter().copied().reduce(f64::max);
            Evidence::new(
                year,
                format!(
                    "{} values, mean {}, std {}, min {}, max {}",
                    values.len(),
                    fmt_opt(center),
                    fmt_opt(spread),
                    fmt_opt(low),
                    fmt_opt(high)
                ),
            )
        })
        .collect_vec();

    let mut notes = Vec::new();
    if let Some(((low_year, low), (high_year, high))) = count_extremes(&pairs) {
        notes.push(format!("fewest pairs: {low} in {low_year}"));
        notes.push(format!("most pairs: {high} in {high_year}"));
    }

    Ok(CheckResult::new(
        table.name(),
        "distribution.yearly_similarity",
        Category::Distribution,
        format!("{column} by year"),
    )
    .with_evidence(evidence)
    .with_notes(notes)
    .conclude(Status::Pass, format!("{} year(s) profiled", by_year.len())))
}

/// The most and least similar pairs
///
/// Perfect agreement (1.0) is left out of the top end; those rows are listed
/// by the extremes check.
pub fn similarity_ranking(table: &Table, column: &str) -> Result<CheckResult> {
    let values = table.float_column(column)?;
    let ranked = (0..table.num_rows())
        .filter(|row| values.is_valid(*row))
        .map(|row| (row, values.value(row)))
        .sorted_by(|(a_row, a), (b_row, b)| a.total_cmp(b).then(a_row.cmp(b_row)))
        .collect_vec();

    let describe = |label: &str, rank: usize, (row, value): (usize, f64)| {
        Evidence::new(
            table.row_key(row),
            format!("{label} #{rank}: {value:.4} (line {})", table.line_of(row)),
        )
    };

    let mut evidence = ranked
        .iter()
        .rev()
        .filter(|(_, value)| *value < 1.0)
        .take(RANKED_PAIRS)
        .enumerate()
        .map(|(i, entry)| describe("most similar", i + 1, *entry))
        .collect_vec();
    evidence.extend(
        ranked
            .iter()
            .take(RANKED_PAIRS)
            .enumerate()
            .map(|(i, entry)| describe("least similar", i + 1, *entry)),
    );

    Ok(CheckResult::new(
        table.name(),
        "distribution.similarity_ranking",
        Category::Distribution,
        "Most and least similar pairs",
    )
    .with_evidence(evidence)
    .conclude(Status::Pass, format!("{} pair(s) ranked", ranked.len())))
}

#[derive(Debug, Default)]
struct VoteSums {
    rows: usize,
    sums: [i64; 4],
    counts: [usize; 4],
}

impl VoteSums {
    fn add(&mut self, cells: [Option<i64>; 4]) {
        self.rows += 1;
        for (i, cell) in cells.into_iter().enumerate() {
            if let Some(value) = cell {
                self.sums[i] = self.sums[i].saturating_add(value);
                self.counts[i] += 1;
            }
        }
    }

    fn average(&self, i: usize) -> Option<f64> {
        (self.counts[i] > 0).then(|| self.sums[i] as f64 / self.counts[i] as f64)
    }
}

fn vote_cells(table: &Table, votes: &VoteColumns) -> Result<impl Fn(usize) -> [Option<i64>; 4]> {
    let columns = [
        table.int_column(votes.yes)?.clone(),
        table.int_column(votes.no)?.clone(),
        table.int_column(votes.abstain)?.clone(),
        table.int_column(votes.total)?.clone(),
    ];
    Ok(move |row| std::array::from_fn(|i| int_value(&columns[i], row)))
}

/// Average vote counts and summed totals per topic tag
pub fn topic_totals(table: &Table, topic_column: &str, votes: &VoteColumns) -> Result<CheckResult> {
    let tags = table.text_column(topic_column)?;
    let country_column = table.schema().country_columns[0];
    let countries = table.text_column(country_column)?;
    let cells = vote_cells(table, votes)?;

    let mut by_topic: BTreeMap<&str, VoteSums> = BTreeMap::new();
    let mut by_country: BTreeMap<&str, i64> = BTreeMap::new();
    for row in 0..table.num_rows() {
        let row_cells = cells(row);
        if tags.is_valid(row) {
            by_topic.entry(tags.value(row).trim()).or_default().add(row_cells);
        }
        if let (true, Some(total)) = (countries.is_valid(row), row_cells[3]) {
            let sum = by_country.entry(countries.value(row).trim()).or_insert(0);
            *sum = sum.saturating_add(total);
        }
    }

    let evidence = by_topic
        .iter()
        .sorted_by(|(a_tag, a), (b_tag, b)| b.sums[3].cmp(&a.sums[3]).then(a_tag.cmp(b_tag)))
        .map(|(tag, sums)| {
            Evidence::new(
                tag,
                format!(
                    "avg Yes {:.2}, No {:.2}, Abstain {:.2}, Total {:.2}; sum Total {} over {} row(s)",
                    sums.average(0).unwrap_or(0.0),
                    sums.average(1).unwrap_or(0.0),
                    sums.average(2).unwrap_or(0.0),
                    sums.average(3).unwrap_or(0.0),
                    sums.sums[3],
                    sums.rows
                ),
            )
        })
        .collect_vec();

    let top_countries = by_country
        .iter()
        .sorted_by(|(a_country, a), (b_country, b)| b.cmp(a).then(a_country.cmp(b_country)))
        .take(TOP_COUNTRIES)
        .map(|(country, total)| format!("{country} {total}"))
        .join(", ");
    let mut result = CheckResult::new(
        table.name(),
        "distribution.topics",
        Category::Distribution,
        format!("{} by topic", votes.total),
    );
    if !top_countries.is_empty() {
        result.note(format!("highest {} per country: {top_countries}", votes.total));
    }

    Ok(result
        .with_evidence(evidence)
        .conclude(Status::Pass, format!("{} topic(s) profiled", by_topic.len())))
}

/// Summed votes per year with the number of countries and topics voting
pub fn yearly_votes(table: &Table, topic_column: &str, votes: &VoteColumns) -> Result<CheckResult> {
    let years = table.int_column(table.schema().year_column)?;
    let country_column = table.schema().country_columns[0];
    let countries = table.text_column(country_column)?;
    let tags = table.text_column(topic_column)?;
    let cells = vote_cells(table, votes)?;

    let mut by_year: BTreeMap<i64, (VoteSums, BTreeSet<&str>, BTreeSet<&str>)> = BTreeMap::new();
    for row in 0..table.num_rows() {
        let Some(year) = int_value(years, row) else { continue };
        let (sums, year_countries, year_topics) = by_year.entry(year).or_default();
        sums.add(cells(row));
        if countries.is_valid(row) {
            year_countries.insert(countries.value(row).trim());
        }
        if tags.is_valid(row) {
            year_topics.insert(tags.value(row).trim());
        }
    }

    let evidence = by_year
        .iter()
        .map(|(year, (sums, year_countries, year_topics))| {
            Evidence::new(
                year,
                format!(
                    "Yes {}, No {}, Abstain {}, Total {}; {} countries, {} topics",
                    sums.sums[0],
                    sums.sums[1],
                    sums.sums[2],
                    sums.sums[3],
                    year_countries.len(),
                    year_topics.len()
                ),
            )
        })
        .collect_vec();

    Ok(CheckResult::new(
        table.name(),
        "distribution.yearly_votes",
        Category::Distribution,
        "Votes by year",
    )
    .with_evidence(evidence)
    .conclude(Status::Pass, format!("{} year(s) summed", by_year.len())))
}
