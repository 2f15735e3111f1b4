//! Contracts of the three extracts.
//!
//! The annual-scores country column is historically labelled `Country name`
//! but holds ISO3-like codes, so it is validated by format only.

use super::{ColumnSpec, DatasetSchema, Domain, VoteColumns};

/// Rank domain: one position per member state
const RANK: Domain = Domain::between(1.0, 193.0);
/// Pillar and normalized score domain
const SCORE: Domain = Domain::between(0.0, 100.0);
/// Vote counts are non-negative
const COUNT: Domain = Domain::at_least(0.0);

/// `annual_scores.csv`: one row per (country, year)
#[must_use]
pub fn annual_scores() -> DatasetSchema {
    DatasetSchema {
        name: "annual_scores",
        file_name: "annual_scores.csv",
        key_columns: vec!["Country name", "Year"],
        year_column: "Year",
        country_columns: vec!["Country name"],
        vote_columns: Some(VoteColumns {
            yes: "Yes Votes",
            no: "No Votes",
            abstain: "Abstain Votes",
            total: "Total Votes in Year",
        }),
        columns: vec![
            ColumnSpec::text("Country name").domain(Domain::Iso3),
            ColumnSpec::integer("Year").domain(Domain::YearWindow),
            ColumnSpec::float("Pillar 1 Score").nullable(15.0).domain(SCORE),
            ColumnSpec::float("Pillar 2 Score").nullable(5.0).domain(SCORE),
            ColumnSpec::float("Pillar 3 Score").nullable(5.0).domain(SCORE),
            ColumnSpec::float("Total Index Average").domain(Domain::between(0.0, 99.99)),
            ColumnSpec::integer("Overall Rank").domain(RANK),
            ColumnSpec::integer("Pillar 1 Rank").nullable(15.0).domain(RANK),
            ColumnSpec::integer("Pillar 2 Rank").nullable(5.0).domain(RANK),
            ColumnSpec::integer("Pillar 3 Rank").nullable(5.0).domain(RANK),
            ColumnSpec::integer("Yes Votes").domain(COUNT),
            ColumnSpec::integer("No Votes").domain(COUNT),
            ColumnSpec::integer("Abstain Votes").domain(COUNT),
            ColumnSpec::integer("Total Votes in Year").domain(COUNT),
            ColumnSpec::float("Total Index Normalized")
                .optional()
                .nullable(100.0)
                .domain(SCORE),
            ColumnSpec::float("Pillar 1 Normalized")
                .optional()
                .nullable(100.0)
                .domain(SCORE),
            ColumnSpec::float("Pillar 2 Normalized")
                .optional()
                .nullable(100.0)
                .domain(SCORE),
            ColumnSpec::float("Pillar 3 Normalized")
                .optional()
                .nullable(100.0)
                .domain(SCORE),
        ],
    }
}

/// `pairwise_similarity_yearly.csv`: one row per (year, country, country)
#[must_use]
pub fn pairwise_similarity() -> DatasetSchema {
    DatasetSchema {
        name: "pairwise_similarity",
        file_name: "pairwise_similarity_yearly.csv",
        key_columns: vec!["Year", "Country1_ISO3", "Country2_ISO3"],
        year_column: "Year",
        country_columns: vec!["Country1_ISO3", "Country2_ISO3"],
        vote_columns: None,
        columns: vec![
            ColumnSpec::integer("Year").domain(Domain::YearWindow),
            ColumnSpec::text("Country1_ISO3").domain(Domain::Iso3),
            ColumnSpec::text("Country2_ISO3").domain(Domain::Iso3),
            ColumnSpec::float("CosineSimilarity").domain(Domain::between(-1.0, 1.0)),
        ],
    }
}

/// `topic_votes_yearly.csv`: one row per (year, country, topic tag)
#[must_use]
pub fn topic_votes() -> DatasetSchema {
    DatasetSchema {
        name: "topic_votes",
        file_name: "topic_votes_yearly.csv",
        key_columns: vec!["Year", "Country", "TopicTag"],
        year_column: "Year",
        country_columns: vec!["Country"],
        vote_columns: Some(VoteColumns {
            yes: "YesVotes_Topic",
            no: "NoVotes_Topic",
            abstain: "AbstainVotes_Topic",
            total: "TotalVotes_Topic",
        }),
        columns: vec![
            ColumnSpec::integer("Year").domain(Domain::YearWindow),
            ColumnSpec::text("Country").domain(Domain::Iso3),
            ColumnSpec::text("TopicTag"),
            ColumnSpec::integer("YesVotes_Topic").domain(COUNT),
            ColumnSpec::integer("NoVotes_Topic").domain(COUNT),
            ColumnSpec::integer("AbstainVotes_Topic").domain(COUNT),
            ColumnSpec::integer("TotalVotes_Topic").domain(COUNT),
        ],
    }
}
