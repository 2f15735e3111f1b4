//! Fixture extracts written into temporary data directories.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use unga_qc::ValidationConfig;

/// Countries present in every fixture year
pub const COUNTRIES: [&str; 3] = ["AFG", "GBR", "USA"];

pub const ANNUAL_HEADER: &str = "Country name,Year,Pillar 1 Score,Pillar 2 Score,Pillar 3 Score,\
    Total Index Average,Overall Rank,Pillar 1 Rank,Pillar 2 Rank,Pillar 3 Rank,\
    Yes Votes,No Votes,Abstain Votes,Total Votes in Year";
pub const PAIRWISE_HEADER: &str = "Year,Country1_ISO3,Country2_ISO3,CosineSimilarity";
pub const TOPIC_HEADER: &str =
    "Year,Country,TopicTag,YesVotes_Topic,NoVotes_Topic,AbstainVotes_Topic,TotalVotes_Topic";

/// Every year of the coverage window except the documented 1964 gap
#[must_use]
pub fn fixture_years() -> Vec<i64> {
    (1946..=2025).filter(|y| *y != 1964).collect()
}

/// One `annual_scores.csv` row
#[derive(Debug, Clone)]
pub struct AnnualRow {
    pub country: String,
    pub year: i64,
    pub yes: i64,
    pub no: i64,
    pub abstain: i64,
    pub total: i64,
}

/// One `topic_votes_yearly.csv` row
#[derive(Debug, Clone)]
pub struct TopicRow {
    pub year: i64,
    pub country: String,
    pub topic: String,
    pub yes: i64,
    pub no: i64,
    pub abstain: i64,
    pub total: i64,
}

/// Annual rows: Yes 5, No 1, Abstain 5, Total 11 for every country and year
#[must_use]
pub fn annual_rows(years: &[i64]) -> Vec<AnnualRow> {
    let mut rows = Vec::new();
    for &year in years {
        for country in COUNTRIES {
            rows.push(AnnualRow {
                country: country.to_string(),
                year,
                yes: 5,
                no: 1,
                abstain: 5,
                total: 11,
            });
        }
    }
    rows
}

#[must_use]
pub fn annual_csv(rows: &[AnnualRow]) -> String {
    let mut csv = format!("{ANNUAL_HEADER}\n");
    for row in rows {
        let index = COUNTRIES
            .iter()
            .position(|c| *c == row.country)
            .unwrap_or(0);
        let score = 40 + index * 10;
        let rank = index + 1;
        writeln!(
            csv,
            "{},{},{score}.5,{score}.0,{score}.25,{score}.25,{rank},{rank},{rank},{rank},{},{},{},{}",
            row.country, row.year, row.yes, row.no, row.abstain, row.total
        )
        .unwrap();
    }
    csv
}

/// Two topics per country and year, summing to Yes 9, No 3, Abstain 13, Total 25
#[must_use]
pub fn topic_rows(years: &[i64]) -> Vec<TopicRow> {
    let mut rows = Vec::new();
    for &year in years {
        for country in COUNTRIES {
            for (topic, yes, no, abstain) in [("ME", 4, 1, 6), ("CO", 5, 2, 7)] {
                rows.push(TopicRow {
                    year,
                    country: country.to_string(),
                    topic: topic.to_string(),
                    yes,
                    no,
                    abstain,
                    total: yes + no + abstain,
                });
            }
        }
    }
    rows
}

#[must_use]
pub fn topic_csv(rows: &[TopicRow]) -> String {
    let mut csv = format!("{TOPIC_HEADER}\n");
    for row in rows {
        writeln!(
            csv,
            "{},{},{},{},{},{},{}",
            row.year, row.country, row.topic, row.yes, row.no, row.abstain, row.total
        )
        .unwrap();
    }
    csv
}

/// Every unordered pair of fixture countries, once per year
#[must_use]
pub fn pairwise_rows(years: &[i64]) -> Vec<(i64, String, String, f64)> {
    let mut rows = Vec::new();
    for &year in years {
        for (a, b, similarity) in [("AFG", "GBR", 0.5), ("AFG", "USA", 0.25), ("GBR", "USA", 0.75)] {
            rows.push((year, a.to_string(), b.to_string(), similarity));
        }
    }
    rows
}

#[must_use]
pub fn pairwise_csv(rows: &[(i64, String, String, f64)]) -> String {
    let mut csv = format!("{PAIRWISE_HEADER}\n");
    for (year, a, b, similarity) in rows {
        writeln!(csv, "{year},{a},{b},{similarity:?}").unwrap();
    }
    csv
}

/// A temporary data directory
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// All three extracts, consistent with each other and free of defects
    #[must_use]
    pub fn consistent() -> Self {
        let years = fixture_years();
        let fixture = Self::empty();
        fixture.write("annual_scores.csv", &annual_csv(&annual_rows(&years)));
        fixture.write("topic_votes_yearly.csv", &topic_csv(&topic_rows(&years)));
        fixture.write(
            "pairwise_similarity_yearly.csv",
            &pairwise_csv(&pairwise_rows(&years)),
        );
        fixture
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration reading this directory, with the fixture's country universe
    #[must_use]
    pub fn config(&self) -> ValidationConfig {
        ValidationConfig {
            expected_country_count: COUNTRIES.len(),
            ..ValidationConfig::with_data_dir(self.dir.path())
        }
    }
}
