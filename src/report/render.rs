//! Console rendering of a [`ValidationReport`].

use std::fmt::{self, Write};

use itertools::Itertools;

use super::ValidationReport;
use crate::checks::{CheckResult, Status};
use crate::stats::{ColumnProfile, VerificationSample};

const RULE_WIDTH: usize = 60;

fn separator(out: &mut impl Write, title: &str) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}\n  {title}\n{rule}")
}

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

fn write_check(out: &mut impl Write, check: &CheckResult, evidence_limit: Option<usize>) -> fmt::Result {
    writeln!(
        out,
        "[{}] {} ({}): {}",
        check.status.marker(),
        check.label,
        check.dataset,
        check.summary
    )?;

    // Failures are always shown in full
    let limit = match check.status {
        Status::Fail => None,
        _ => evidence_limit,
    };
    let shown = limit.map_or(check.evidence.len(), |l| l.min(check.evidence.len()));
    for evidence in &check.evidence[..shown] {
        writeln!(out, "       - {}: {}", evidence.key, evidence.detail)?;
    }
    if shown < check.evidence.len() {
        writeln!(out, "       ... and {} more", check.evidence.len() - shown)?;
    }
    for note in &check.notes {
        writeln!(out, "       note: {note}")?;
    }
    Ok(())
}

fn write_profiles(out: &mut impl Write, profiles: &[ColumnProfile]) -> fmt::Result {
    writeln!(
        out,
        "{:<40} {:>9} {:>7} {:>11} {:>11} {:>11} {:>11} {:>11} {:>11} {:>11}",
        "Column", "Count", "Nulls", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"
    )?;
    writeln!(out, "{}", "-".repeat(40 + 10 + 8 + 12 * 7))?;
    for profile in profiles {
        writeln!(
            out,
            "{:<40} {:>9} {:>7} {:>11} {:>11} {:>11} {:>11} {:>11} {:>11} {:>11}",
            format!("{}.{}", profile.dataset, profile.column),
            profile.count,
            profile.nulls,
            fmt_stat(profile.mean),
            fmt_stat(profile.std),
            fmt_stat(profile.min),
            fmt_stat(profile.p25),
            fmt_stat(profile.p50),
            fmt_stat(profile.p75),
            fmt_stat(profile.max),
        )?;
    }
    Ok(())
}

fn write_samples(out: &mut impl Write, samples: &[VerificationSample]) -> fmt::Result {
    for sample in samples {
        writeln!(
            out,
            "{} (seed {}): {}",
            sample.dataset,
            sample.seed,
            sample.columns.join(" | ")
        )?;
        for row in &sample.rows {
            writeln!(
                out,
                "  line {:>8}  {:<24} {}",
                row.line,
                row.key,
                row.values.join(" | ")
            )?;
        }
    }
    Ok(())
}

fn write_header(out: &mut impl Write, report: &ValidationReport) -> fmt::Result {
    separator(out, &format!("UNGA DATA QUALITY: {}", report.validator))?;
    writeln!(
        out,
        "Generated: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "Data directory: {}", report.data_dir.display())?;
    match report.year_filter {
        Some(year) => writeln!(out, "Year filter: {year}")?,
        None => writeln!(out, "Year filter: none")?,
    }
    writeln!(out, "Outlier threshold: {} sigma", report.outlier_threshold)?;
    writeln!(out, "\nDatasets:")?;
    for dataset in &report.datasets {
        writeln!(
            out,
            "  {:<22} {:>10} rows x {:>2} columns  {}",
            dataset.name,
            dataset.rows,
            dataset.columns,
            dataset.path.display()
        )?;
    }
    Ok(())
}

fn write_footer(out: &mut impl Write, report: &ValidationReport) -> fmt::Result {
    let counts = report.counts();
    separator(out, "SUMMARY")?;
    writeln!(
        out,
        "Checks: {} passed, {} warning(s), {} failed",
        counts.pass, counts.warning, counts.fail
    )?;
    if !report.skipped.is_empty() {
        writeln!(
            out,
            "Skipped: {} check(s) blocked by schema failures",
            report.skipped.len()
        )?;
    }
    writeln!(out, "Overall: {}", report.overall)?;
    writeln!(
        out,
        "Run complete: {}",
        if report.complete { "yes" } else { "no" }
    )
}

/// Write a report for the console
fn write_report(
    out: &mut impl Write,
    report: &ValidationReport,
    evidence_limit: Option<usize>,
) -> fmt::Result {
    write_header(out, report)?;

    let by_category = report
        .checks
        .iter()
        .into_group_map_by(|check| check.category);
    for (index, category) in by_category.keys().sorted().enumerate() {
        separator(out, &format!("{}. {}", index + 1, category.title()))?;
        for check in &by_category[category] {
            write_check(out, check, evidence_limit)?;
        }
    }

    if !report.skipped.is_empty() {
        separator(out, "SKIPPED CHECKS")?;
        for skipped in &report.skipped {
            writeln!(
                out,
                "[SKIP] {} ({}): {}",
                skipped.check, skipped.dataset, skipped.reason
            )?;
        }
    }

    if !report.profiles.is_empty() {
        separator(out, "SUMMARY STATISTICS")?;
        write_profiles(out, &report.profiles)?;
    }

    if !report.samples.is_empty() {
        separator(out, "VERIFICATION SAMPLES")?;
        write_samples(out, &report.samples)?;
    }

    write_footer(out, report)
}

/// Render a report for the console
///
/// `evidence_limit` caps the evidence lines printed for passing and warning
/// checks; failing checks always print every item.
#[must_use]
pub fn render_report(report: &ValidationReport, evidence_limit: Option<usize>) -> String {
    let mut out = String::new();
    // Formatting into a String cannot fail
    let _ = write_report(&mut out, report, evidence_limit);
    out
}
