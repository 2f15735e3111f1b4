use unga_qc::validators::annual;
use unga_qc::{Status, ValidationReport, render_report};

use crate::utils::{Fixture, annual_csv, annual_rows, fixture_years};

#[test]
fn test_json_artifact_round_trips() {
    let mut rows = annual_rows(&fixture_years());
    rows[0].total = 12;
    let fixture = Fixture::empty();
    fixture.write("annual_scores.csv", &annual_csv(&rows));

    let report = annual::validate(&fixture.config()).unwrap();
    let path = fixture.path().join("report.json");
    report.write_json(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed: ValidationReport = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.overall, Status::Fail);
    assert_eq!(parsed.checks, report.checks);
    assert!(text.contains("\"AFG/1946\""));
}

#[test]
fn test_console_report_sections() {
    let mut rows = annual_rows(&fixture_years());
    rows[0].total = 12;
    let fixture = Fixture::empty();
    fixture.write("annual_scores.csv", &annual_csv(&rows));

    let report = annual::validate(&fixture.config()).unwrap();
    let text = render_report(&report, Some(20));

    assert!(text.contains("UNGA DATA QUALITY: validate_annual_scores"));
    assert!(text.contains("VOTE ARITHMETIC"));
    assert!(text.contains("[FAIL]"));
    assert!(text.contains("AFG/1946: Yes 5 + No 1 + Abstain 5 = 11, but Total = 12"));
    assert!(text.contains("SUMMARY STATISTICS"));
    assert!(text.contains("VERIFICATION SAMPLES"));
    assert!(text.contains("Overall: FAIL"));
    assert!(text.contains("Run complete: yes"));
}
