//! Markdown rendering of a [`Report`].

use std::fmt::Write;

use super::Report;

/// Renders `report` as a human-readable summary.
///
/// The output is a pure function of the report, so re-rendering the same
/// report yields identical text.
#[must_use]
pub fn render(report: &Report) -> String {
    let banner = if report.passed() { "PASSED" } else { "FAILED" };
    let summary = &report.results.summary;

    // Writing to a String cannot fail.
    let mut out = String::new();
    let _ = writeln!(out, "# Verification Report: {banner}\n");
    let _ = writeln!(out, "**Task:** {}", report.task.description);
    let _ = writeln!(out, "**Type:** {}", report.task.task_type);
    let _ = writeln!(out, "**Duration:** {}ms\n", report.verification.duration);

    out.push_str("## Summary\n");
    let _ = writeln!(out, "- Total Checks: {}", summary.total_checks);
    let _ = writeln!(out, "- Passed: {}", summary.passed);
    let _ = writeln!(out, "- Failed: {}", summary.failed);
    let _ = writeln!(out, "- Skipped: {}\n", summary.skipped);

    if !report.results.failures.is_empty() {
        out.push_str("## Failures\n");
        for failure in &report.results.failures {
            let _ = writeln!(out, "\n### {} ({})", failure.check, failure.severity);
            let _ = writeln!(out, "- **Reason:** {}", failure.reason);
            let _ = writeln!(out, "- **Suggestion:** {}", failure.suggestion);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Recommendation: {}", report.recommendation);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckResult, Severity, Status};
    use crate::manifest::{Changes, Manifest};
    use chrono::{TimeZone, Utc};

    fn report(details: Vec<CheckResult>) -> Report {
        let manifest = Manifest::assemble(
            "task-7".into(),
            "Fix login redirect",
            vec!["frontend/src/lib/auth.ts".into()],
            Changes::default(),
        );
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Report::build(&manifest, start, start + chrono::Duration::milliseconds(1500), details)
    }

    #[test]
    fn passing_report_has_no_failure_section() {
        let text = render(&report(vec![CheckResult {
            check: "ESLint".into(),
            status: Status::Pass,
            message: "No lint errors".into(),
            evidence: None,
            severity: None,
        }]));

        assert!(text.starts_with("# Verification Report: PASSED\n"));
        assert!(text.contains("**Type:** bug-fix"));
        assert!(text.contains("**Duration:** 1500ms"));
        assert!(text.contains("- Passed: 1"));
        assert!(!text.contains("## Failures"));
        assert!(text.ends_with("## Recommendation: approve\n"));
    }

    #[test]
    fn failures_get_a_subsection_each() {
        let text = render(&report(vec![CheckResult {
            check: "Build".into(),
            status: Status::Fail,
            message: "Build failed".into(),
            evidence: None,
            severity: Some(Severity::Critical),
        }]));

        assert!(text.starts_with("# Verification Report: FAILED\n"));
        assert!(text.contains("### Build (critical)\n- **Reason:** Build failed\n"));
        assert!(text.contains("- **Suggestion:** Run the build command locally"));
        assert!(text.contains("## Recommendation: fix-required"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let r = report(Vec::new());
        assert_eq!(render(&r), render(&r));
    }
}
