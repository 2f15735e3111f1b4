use unga_qc::validators::annual;
use unga_qc::{QcError, Status};

use crate::utils::{
    ANNUAL_HEADER, Fixture, annual_csv, annual_rows, fixture_years,
};

const DATASET: &str = "annual_scores";

fn fixture_with_years(years: &[i64]) -> Fixture {
    let fixture = Fixture::empty();
    fixture.write("annual_scores.csv", &annual_csv(&annual_rows(years)));
    fixture
}

#[test]
fn test_consistent_extract_passes() {
    let fixture = Fixture::consistent();
    let report = annual::validate(&fixture.config()).unwrap();

    assert_eq!(report.overall, Status::Pass, "{:#?}", report.checks);
    assert!(report.complete);
    assert!(report.skipped.is_empty());
    assert_eq!(report.datasets[0].rows, fixture_years().len() * 3);
}

#[test]
fn test_afg_1946_votes_add_up() {
    let fixture = Fixture::consistent();
    let report = annual::validate(&fixture.config()).unwrap();

    let arithmetic = report.check(DATASET, "arithmetic.vote_totals").unwrap();
    assert_eq!(arithmetic.status, Status::Pass);
    assert!(arithmetic.evidence.is_empty());
}

#[test]
fn test_every_arithmetic_violation_is_listed() {
    let mut rows = annual_rows(&fixture_years());
    rows[0].total = 12;
    rows[4].yes = 7;
    let fixture = Fixture::empty();
    fixture.write("annual_scores.csv", &annual_csv(&rows));

    let report = annual::validate(&fixture.config()).unwrap();
    let arithmetic = report.check(DATASET, "arithmetic.vote_totals").unwrap();

    assert_eq!(arithmetic.status, Status::Fail);
    let keys: Vec<&str> = arithmetic.evidence.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["AFG/1946", "GBR/1947"]);
    assert!(report.has_failures());
}

#[test]
fn test_documented_year_gap_is_not_a_warning() {
    let fixture = fixture_with_years(&fixture_years());
    let report = annual::validate(&fixture.config()).unwrap();

    let years = report.check(DATASET, "completeness.years").unwrap();
    assert_eq!(years.status, Status::Pass);
    assert!(years.evidence.is_empty());
    assert!(years.notes.iter().any(|n| n.contains("1964")));
}

#[test]
fn test_unexplained_year_gap_is_one_warning() {
    let years: Vec<i64> = fixture_years().into_iter().filter(|y| *y != 1980).collect();
    let fixture = fixture_with_years(&years);
    let report = annual::validate(&fixture.config()).unwrap();

    let coverage = report.check(DATASET, "completeness.years").unwrap();
    assert_eq!(coverage.status, Status::Warning);
    assert_eq!(coverage.evidence.len(), 1);
    assert_eq!(coverage.evidence[0].key, "1980");
}

#[test]
fn test_duplicate_country_year_fails() {
    let mut rows = annual_rows(&fixture_years());
    rows.push(rows[0].clone());
    let fixture = Fixture::empty();
    fixture.write("annual_scores.csv", &annual_csv(&rows));

    let report = annual::validate(&fixture.config()).unwrap();
    let keys = report.check(DATASET, "uniqueness.primary_key").unwrap();
    assert_eq!(keys.status, Status::Fail);
    assert_eq!(keys.evidence[0].key, "AFG/1946");
}

#[test]
fn test_rank_out_of_range_fails() {
    let fixture = Fixture::empty();
    fixture.write(
        "annual_scores.csv",
        &format!("{ANNUAL_HEADER}\nAFG,1946,40.5,40,40.25,40.25,194,1,1,1,5,1,5,11\n"),
    );
    let report = annual::validate(&fixture.config()).unwrap();

    let rank = report.check(DATASET, "range.Overall Rank").unwrap();
    assert_eq!(rank.status, Status::Fail);
    assert_eq!(rank.evidence[0].key, "AFG/1946");
}

#[test]
fn test_mistyped_column_blocks_dependent_checks() {
    let fixture = Fixture::empty();
    fixture.write(
        "annual_scores.csv",
        &format!(
            "{ANNUAL_HEADER}\n\
             AFG,1946,40.5,40,40.25,40.25,first,1,1,1,5,1,5,11\n\
             GBR,1946,50.5,50,50.25,50.25,2,2,2,2,5,1,5,11\n"
        ),
    );
    let report = annual::validate(&fixture.config()).unwrap();

    let schema = report.check(DATASET, "schema.columns").unwrap();
    assert_eq!(schema.status, Status::Fail);
    assert_eq!(schema.evidence[0].key, "Overall Rank");

    assert!(!report.complete);
    let skipped: Vec<&str> = report.skipped.iter().map(|s| s.check.as_str()).collect();
    assert!(skipped.contains(&"range.Overall Rank"));
    assert!(skipped.contains(&"outliers.Overall Rank"));
    // Sibling checks still run
    assert!(report.check(DATASET, "arithmetic.vote_totals").is_some());
}

#[test]
fn test_missing_optional_columns_are_not_failures() {
    let fixture = Fixture::consistent();
    let report = annual::validate(&fixture.config()).unwrap();
    let schema = report.check(DATASET, "schema.columns").unwrap();
    assert_eq!(schema.status, Status::Pass);
    assert!(schema.notes.iter().any(|n| n.contains("Pillar 1 Normalized")));
}

#[test]
fn test_unexpected_column_warns() {
    let fixture = Fixture::empty();
    fixture.write(
        "annual_scores.csv",
        &format!("{ANNUAL_HEADER},Region\nAFG,1946,40.5,40,40.25,40.25,1,1,1,1,5,1,5,11,Asia\n"),
    );
    let report = annual::validate(&fixture.config()).unwrap();
    let schema = report.check(DATASET, "schema.columns").unwrap();
    assert_eq!(schema.status, Status::Warning);
    assert_eq!(schema.evidence[0].key, "Region");
}

#[test]
fn test_missing_file_is_fatal() {
    let fixture = Fixture::empty();
    let err = annual::validate(&fixture.config()).unwrap_err();
    assert!(matches!(err, QcError::MissingPath { .. }));
}

#[test]
fn test_missing_key_column_is_fatal() {
    let fixture = Fixture::empty();
    fixture.write("annual_scores.csv", "Country name,Yes Votes\nAFG,5\n");
    let err = annual::validate(&fixture.config()).unwrap_err();
    assert!(matches!(err, QcError::Structure { .. }));
}

#[test]
fn test_runs_are_idempotent() {
    let mut rows = annual_rows(&fixture_years());
    rows[2].total = 40;
    let fixture = Fixture::empty();
    fixture.write("annual_scores.csv", &annual_csv(&rows));

    let first = annual::validate(&fixture.config()).unwrap();
    let second = annual::validate(&fixture.config()).unwrap();
    assert_eq!(first.checks, second.checks);
    assert_eq!(first.skipped, second.skipped);
    assert_eq!(first.samples, second.samples);
}

#[test]
fn test_year_filter_restricts_rows() {
    let fixture = Fixture::consistent();
    let config = unga_qc::ValidationConfig {
        year_filter: Some(2025),
        ..fixture.config()
    };
    let report = annual::validate(&config).unwrap();

    assert_eq!(report.datasets[0].rows, 3);
    assert_eq!(report.year_filter, Some(2025));
    let countries = report.check(DATASET, "completeness.countries").unwrap();
    assert_eq!(countries.status, Status::Pass);
}

#[test]
fn test_short_rosters_before_1990_are_notes() {
    let mut rows = annual_rows(&fixture_years());
    rows.retain(|r| !(r.country == "USA" && r.year < 1950));
    let fixture = Fixture::consistent();
    fixture.write("annual_scores.csv", &annual_csv(&rows));

    let report = annual::validate(&fixture.config()).unwrap();
    let countries = report.check(DATASET, "completeness.countries").unwrap();
    assert_eq!(countries.status, Status::Pass, "{countries:#?}");
    assert!(countries.evidence.is_empty());
    assert_eq!(
        countries.notes[0],
        "4 year(s) before 1990 list fewer than 3 countries while membership grew: \
         1946, 1947, 1948, 1949"
    );
}

#[test]
fn test_short_roster_from_1990_warns() {
    let mut rows = annual_rows(&fixture_years());
    rows.retain(|r| !(r.country == "GBR" && r.year == 1995));
    let fixture = Fixture::consistent();
    fixture.write("annual_scores.csv", &annual_csv(&rows));

    let report = annual::validate(&fixture.config()).unwrap();
    let countries = report.check(DATASET, "completeness.countries").unwrap();
    assert_eq!(countries.status, Status::Warning);
    assert_eq!(countries.evidence.len(), 1);
    assert_eq!(countries.evidence[0].key, "1995");
    assert_eq!(countries.evidence[0].detail, "2 countries, expected 3");
}
