use unga_qc::Status;
use unga_qc::validators::pairwise;

use crate::utils::{Fixture, fixture_years, pairwise_csv, pairwise_rows};

const DATASET: &str = "pairwise_similarity";

fn fixture_with(rows: &[(i64, String, String, f64)]) -> Fixture {
    let fixture = Fixture::empty();
    fixture.write("pairwise_similarity_yearly.csv", &pairwise_csv(rows));
    fixture
}

#[test]
fn test_consistent_extract_passes() {
    let fixture = Fixture::consistent();
    let report = pairwise::validate(&fixture.config()).unwrap();
    assert_eq!(report.overall, Status::Pass, "{:#?}", report.checks);
    assert!(report.complete);
}

#[test]
fn test_perfect_opposition_is_in_range_and_reported() {
    let mut rows = pairwise_rows(&fixture_years());
    rows.push((1947, "BLR".to_string(), "TUR".to_string(), -1.0));
    let fixture = fixture_with(&rows);
    let report = pairwise::validate(&fixture.config()).unwrap();

    let range = report.check(DATASET, "range.CosineSimilarity").unwrap();
    assert_eq!(range.status, Status::Pass);

    let extremes = report.check(DATASET, "similarity.extremes").unwrap();
    assert_eq!(extremes.status, Status::Pass);
    assert_eq!(extremes.evidence.len(), 1);
    assert_eq!(extremes.evidence[0].key, "1947/BLR/TUR");
}

#[test]
fn test_similarity_above_one_fails() {
    let mut rows = pairwise_rows(&fixture_years());
    rows[3].3 = 1.5;
    let fixture = fixture_with(&rows);
    let report = pairwise::validate(&fixture.config()).unwrap();

    let range = report.check(DATASET, "range.CosineSimilarity").unwrap();
    assert_eq!(range.status, Status::Fail);
    assert_eq!(range.evidence.len(), 1);
    assert_eq!(range.evidence[0].key, "1947/AFG/GBR");
}

#[test]
fn test_mostly_zero_similarities_warn() {
    let mut rows = pairwise_rows(&fixture_years());
    for row in rows.iter_mut().filter(|r| r.1 == "AFG") {
        row.3 = 0.0;
    }
    let fixture = fixture_with(&rows);
    let report = pairwise::validate(&fixture.config()).unwrap();

    let zeros = report.check(DATASET, "similarity.zero_share").unwrap();
    assert_eq!(zeros.status, Status::Warning);
    assert!(zeros.notes[0].starts_with("exactly zero: 158"));
}

#[test]
fn test_self_pair_fails() {
    let mut rows = pairwise_rows(&fixture_years());
    rows.push((1950, "USA".to_string(), "USA".to_string(), 1.0));
    let fixture = fixture_with(&rows);
    let report = pairwise::validate(&fixture.config()).unwrap();

    let self_pairs = report.check(DATASET, "range.self_pairs").unwrap();
    assert_eq!(self_pairs.status, Status::Fail);
    assert_eq!(self_pairs.evidence[0].key, "1950/USA/USA");
}

#[test]
fn test_pair_stored_in_both_directions_warns() {
    let mut rows = pairwise_rows(&fixture_years());
    rows.push((1950, "GBR".to_string(), "AFG".to_string(), 0.5));
    let fixture = fixture_with(&rows);
    let report = pairwise::validate(&fixture.config()).unwrap();

    let direction = report.check(DATASET, "similarity.direction").unwrap();
    assert_eq!(direction.status, Status::Warning);
    assert_eq!(direction.evidence.len(), 1);
    assert_eq!(direction.evidence[0].key, "1950/AFG/GBR");
}

#[test]
fn test_outlier_threshold_comes_from_config() {
    let mut rows = pairwise_rows(&fixture_years());
    rows[0].3 = -0.9;
    let fixture = fixture_with(&rows);

    let report = pairwise::validate(&fixture.config()).unwrap();
    let outliers = report.check(DATASET, "outliers.CosineSimilarity").unwrap();
    assert_eq!(outliers.status, Status::Warning);
    assert_eq!(outliers.evidence[0].key, "1946/AFG/GBR");

    let config = unga_qc::ValidationConfig {
        outlier_threshold: 10.0,
        ..fixture.config()
    };
    let report = pairwise::validate(&config).unwrap();
    let outliers = report.check(DATASET, "outliers.CosineSimilarity").unwrap();
    assert_eq!(outliers.status, Status::Pass);
}

#[test]
fn test_yearly_distribution_and_ranking_are_reported() {
    let mut rows = pairwise_rows(&fixture_years());
    rows.push((1947, "BLR".to_string(), "TUR".to_string(), -1.0));
    let fixture = fixture_with(&rows);
    let report = pairwise::validate(&fixture.config()).unwrap();

    let yearly = report
        .check(DATASET, "distribution.yearly_similarity")
        .unwrap();
    assert_eq!(yearly.status, Status::Pass);
    assert_eq!(yearly.evidence.len(), fixture_years().len());
    assert_eq!(yearly.notes[0], "fewest pairs: 3 in 1946");
    assert_eq!(yearly.notes[1], "most pairs: 4 in 1947");

    let ranking = report
        .check(DATASET, "distribution.similarity_ranking")
        .unwrap();
    let least = ranking
        .evidence
        .iter()
        .find(|e| e.detail.starts_with("least similar #1:"))
        .unwrap();
    assert_eq!(least.key, "1947/BLR/TUR");
    assert!(ranking.evidence.iter().any(|e| e.detail.starts_with("most similar #10:")));
}
