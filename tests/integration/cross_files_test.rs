use unga_qc::Status;
use unga_qc::validators::cross;

use crate::utils::{Fixture, fixture_years, topic_csv, topic_rows};

const DATASET: &str = "cross_files";

#[test]
fn test_consistent_extracts_pass() {
    let fixture = Fixture::consistent();
    let report = cross::validate(&fixture.config()).unwrap();

    assert_eq!(report.overall, Status::Pass, "{:#?}", report.checks);
    assert_eq!(report.datasets.len(), 3);
    assert!(report.check(DATASET, "cross_file.keys.annual_scores.topic_votes").is_some());
    assert!(
        report
            .check(DATASET, "cross_file.keys.annual_scores.pairwise_similarity")
            .is_some()
    );
}

#[test]
fn test_multi_tagged_surplus_is_not_a_failure() {
    let fixture = Fixture::consistent();
    let report = cross::validate(&fixture.config()).unwrap();

    // Annual total 11 against a topic sum of 25 for every key
    let votes = report.check(DATASET, "cross_file.vote_totals").unwrap();
    assert_eq!(votes.status, Status::Pass);
    assert!(votes.evidence.is_empty());
    let keys = fixture_years().len() * 3;
    assert!(votes.notes.contains(&format!(
        "{keys} key(s) with topic sum above the annual total (multi-tagged resolutions)"
    )));
}

#[test]
fn test_topic_sum_below_annual_total_fails() {
    let mut rows = topic_rows(&fixture_years());
    // USA/1950 keeps only a reduced ME topic
    rows.retain(|r| !(r.country == "USA" && r.year == 1950 && r.topic == "CO"));
    for row in rows
        .iter_mut()
        .filter(|r| r.country == "USA" && r.year == 1950)
    {
        row.yes = 3;
        row.total = 10;
    }
    let fixture = Fixture::consistent();
    fixture.write("topic_votes_yearly.csv", &topic_csv(&rows));

    let report = cross::validate(&fixture.config()).unwrap();
    let votes = report.check(DATASET, "cross_file.vote_totals").unwrap();

    assert_eq!(votes.status, Status::Fail);
    assert_eq!(votes.evidence.len(), 1);
    assert_eq!(votes.evidence[0].key, "USA/1950");
    assert_eq!(
        votes.evidence[0].detail,
        "topic sum 10 < annual total 11 (short by 1)"
    );
    assert!(report.has_failures());
}

#[test]
fn test_equal_sums_are_counted_not_flagged() {
    let mut rows = topic_rows(&fixture_years());
    rows.retain(|r| !(r.country == "GBR" && r.year == 2000 && r.topic == "CO"));
    let fixture = Fixture::consistent();
    fixture.write("topic_votes_yearly.csv", &topic_csv(&rows));

    let report = cross::validate(&fixture.config()).unwrap();
    let votes = report.check(DATASET, "cross_file.vote_totals").unwrap();
    assert_eq!(votes.status, Status::Pass);
    assert!(
        votes
            .notes
            .contains(&"1 key(s) with topic sum equal to the annual total".to_string())
    );
}

#[test]
fn test_year_missing_from_one_file_warns() {
    let years: Vec<i64> = fixture_years().into_iter().filter(|y| *y != 1980).collect();
    let fixture = Fixture::consistent();
    fixture.write("topic_votes_yearly.csv", &topic_csv(&topic_rows(&years)));

    let report = cross::validate(&fixture.config()).unwrap();

    let year_sets = report.check(DATASET, "cross_file.years").unwrap();
    assert_eq!(year_sets.status, Status::Warning);
    assert_eq!(year_sets.evidence.len(), 1);
    assert_eq!(year_sets.evidence[0].key, "1980");
    assert_eq!(year_sets.evidence[0].detail, "absent from topic_votes");

    let keys = report
        .check(DATASET, "cross_file.keys.annual_scores.topic_votes")
        .unwrap();
    assert_eq!(keys.status, Status::Warning);
    assert_eq!(keys.evidence.len(), 3);
    assert!(keys.evidence.iter().all(|e| e.key.ends_with("/1980")));

    // Annual keys without topic rows reconcile against a topic sum of 0
    let votes = report.check(DATASET, "cross_file.vote_totals").unwrap();
    assert_eq!(votes.status, Status::Fail);
    assert_eq!(votes.evidence.len(), 3);
    assert_eq!(votes.evidence[0].key, "AFG/1980");
    assert_eq!(
        votes.evidence[0].detail,
        "no topic rows, annual total 11 (short by 11)"
    );
}

#[test]
fn test_country_missing_from_one_file_warns() {
    let mut rows = topic_rows(&fixture_years());
    rows.retain(|r| r.country != "GBR");
    let fixture = Fixture::consistent();
    fixture.write("topic_votes_yearly.csv", &topic_csv(&rows));

    let report = cross::validate(&fixture.config()).unwrap();
    let countries = report.check(DATASET, "cross_file.countries").unwrap();
    assert_eq!(countries.status, Status::Warning);
    assert_eq!(countries.evidence.len(), 1);
    assert_eq!(countries.evidence[0].key, "GBR");
    assert_eq!(countries.evidence[0].detail, "absent from topic_votes");
}

#[test]
fn test_mistyped_total_skips_reconciliation() {
    let fixture = Fixture::consistent();
    let mut csv = topic_csv(&topic_rows(&fixture_years()));
    csv = csv.replacen("1946,AFG,ME,4,1,6,11", "1946,AFG,ME,4,1,6,eleven", 1);
    fixture.write("topic_votes_yearly.csv", &csv);

    let report = cross::validate(&fixture.config()).unwrap();
    assert!(report.check(DATASET, "cross_file.vote_totals").is_none());
    assert!(!report.complete);
    assert_eq!(report.skipped[0].check, "cross_file.vote_totals");
    assert!(report.skipped[0].reason.contains("topic_votes.TotalVotes_Topic"));
}
