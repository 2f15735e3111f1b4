use unga_qc::Status;
use unga_qc::validators::topics;

use crate::utils::{Fixture, fixture_years, topic_csv, topic_rows};

const DATASET: &str = "topic_votes";

#[test]
fn test_consistent_extract_passes() {
    let fixture = Fixture::consistent();
    let report = topics::validate(&fixture.config()).unwrap();
    assert_eq!(report.overall, Status::Pass, "{:#?}", report.checks);
    assert_eq!(report.samples[0].rows.len(), 5);
}

#[test]
fn test_topic_rows_are_checked_on_their_own_totals() {
    let fixture = Fixture::consistent();
    let report = topics::validate(&fixture.config()).unwrap();

    // Topic sums for AFG/1946 are 9/3/13/25; only per-row totals are checked here
    let arithmetic = report.check(DATASET, "arithmetic.vote_totals").unwrap();
    assert_eq!(arithmetic.status, Status::Pass);
}

#[test]
fn test_topic_row_total_mismatch_fails() {
    let mut rows = topic_rows(&fixture_years());
    rows[1].total = 13;
    let fixture = Fixture::empty();
    fixture.write("topic_votes_yearly.csv", &topic_csv(&rows));

    let report = topics::validate(&fixture.config()).unwrap();
    let arithmetic = report.check(DATASET, "arithmetic.vote_totals").unwrap();
    assert_eq!(arithmetic.status, Status::Fail);
    assert_eq!(arithmetic.evidence[0].key, "1946/AFG/CO");
}

#[test]
fn test_tag_spelling_variants_warn() {
    let mut rows = topic_rows(&fixture_years());
    rows[1].topic = "co".to_string();
    let fixture = Fixture::empty();
    fixture.write("topic_votes_yearly.csv", &topic_csv(&rows));

    let report = topics::validate(&fixture.config()).unwrap();
    let tags = report.check(DATASET, "topics.tag_variants").unwrap();
    assert_eq!(tags.status, Status::Warning);
    assert_eq!(tags.evidence[0].key, "co");
}

#[test]
fn test_country_gap_warns() {
    let rows: Vec<_> = topic_rows(&fixture_years())
        .into_iter()
        .filter(|r| !(r.country == "USA" && r.year == 1990))
        .collect();
    let fixture = Fixture::empty();
    fixture.write("topic_votes_yearly.csv", &topic_csv(&rows));

    let report = topics::validate(&fixture.config()).unwrap();
    let gaps = report.check(DATASET, "completeness.country_gaps").unwrap();
    assert_eq!(gaps.status, Status::Warning);
    assert_eq!(gaps.evidence[0].key, "USA");
    assert!(gaps.evidence[0].detail.contains("1990"));

    // The year itself is still covered by other countries
    let years = report.check(DATASET, "completeness.years").unwrap();
    assert_eq!(years.status, Status::Pass);
}

#[test]
fn test_topic_and_yearly_distributions_are_reported() {
    let fixture = Fixture::consistent();
    let report = topics::validate(&fixture.config()).unwrap();
    let rows_per_topic = fixture_years().len() * 3;

    let by_topic = report.check(DATASET, "distribution.topics").unwrap();
    assert_eq!(by_topic.status, Status::Pass);
    assert_eq!(by_topic.evidence.len(), 2);
    assert_eq!(by_topic.evidence[0].key, "CO");
    assert_eq!(
        by_topic.evidence[0].detail,
        format!(
            "avg Yes 5.00, No 2.00, Abstain 7.00, Total 14.00; sum Total {} over {rows_per_topic} row(s)",
            14 * rows_per_topic
        )
    );

    let yearly = report.check(DATASET, "distribution.yearly_votes").unwrap();
    assert_eq!(yearly.evidence[0].key, "1946");
    assert_eq!(
        yearly.evidence[0].detail,
        "Yes 27, No 9, Abstain 39, Total 75; 3 countries, 2 topics"
    );
}
