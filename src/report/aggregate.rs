//! Aggregation: summary counts, failures with suggestions, recommendation.

use crate::check::{CheckResult, Severity, Status};

use super::{Failure, Recommendation, Summary};

/// Generic advice when no remediation rule matches.
pub const DEFAULT_SUGGESTION: &str = "Review the specific check requirements and fix accordingly";

/// Remediation rules: check-name keyword, optional message keyword, advice.
/// The first matching rule wins.
const SUGGESTIONS: &[(&str, Option<&str>, &str)] = &[
    ("TypeScript", None, "Run the typecheck command to see specific errors"),
    ("ESLint", None, "Run the lint command with --fix to auto-fix issues"),
    ("Build", None, "Run the build command locally and fix the reported errors"),
    ("Unit Tests", None, "Run the related tests locally and fix the failing cases"),
    ("Visual", Some("viewport"), "Check layout component configuration and CSS width settings"),
    ("API Integration", None, "Start the app and check the endpoint handler and its status codes"),
    ("Security Audit", None, "Run the audit command and upgrade or replace vulnerable dependencies"),
];

/// Counts results by status.
#[must_use]
pub fn summarize(results: &[CheckResult]) -> Summary {
    let count = |status: Status| results.iter().filter(|r| r.status == status).count();
    let (passed, failed, skipped) = (count(Status::Pass), count(Status::Fail), count(Status::Skip));
    Summary { total_checks: passed + failed + skipped, passed, failed, skipped }
}

/// Repackages every failed result, defaulting its severity to `medium`.
#[must_use]
pub fn failures(results: &[CheckResult]) -> Vec<Failure> {
    results
        .iter()
        .filter(|r| r.status == Status::Fail)
        .map(|r| Failure {
            check: r.check.clone(),
            reason: r.message.clone(),
            suggestion: suggestion_for(r).to_string(),
            severity: r.severity.unwrap_or(Severity::Medium),
        })
        .collect()
}

/// Remediation advice for a result.
#[must_use]
pub fn suggestion_for(result: &CheckResult) -> &'static str {
    SUGGESTIONS
        .iter()
        .find(|(check, message, _)| {
            result.check.contains(check) && message.is_none_or(|m| result.message.contains(m))
        })
        .map_or(DEFAULT_SUGGESTION, |(_, _, suggestion)| suggestion)
}

/// `fix-required` on any critical failure, else `manual-review` on any
/// failure, else `approve`.
#[must_use]
pub fn recommend(failures: &[Failure]) -> Recommendation {
    if failures.iter().any(|f| f.severity == Severity::Critical) {
        Recommendation::FixRequired
    } else if failures.is_empty() {
        Recommendation::Approve
    } else {
        Recommendation::ManualReview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(check: &str, status: Status, message: &str, severity: Option<Severity>) -> CheckResult {
        CheckResult { check: check.into(), status, message: message.into(), evidence: None, severity }
    }

    fn failure(severity: Severity) -> Failure {
        Failure {
            check: "c".into(),
            reason: "r".into(),
            suggestion: DEFAULT_SUGGESTION.into(),
            severity,
        }
    }

    #[test]
    fn recommendation_cascade() {
        assert_eq!(recommend(&[]), Recommendation::Approve);
        assert_eq!(recommend(&[failure(Severity::High)]), Recommendation::ManualReview);
        assert_eq!(
            recommend(&[failure(Severity::Low), failure(Severity::Critical), failure(Severity::High)]),
            Recommendation::FixRequired
        );
        let many_high: Vec<_> = (0..50).map(|_| failure(Severity::High)).collect();
        assert_eq!(recommend(&many_high), Recommendation::ManualReview);
    }

    #[test]
    fn summary_totals_add_up() {
        let statuses = [Status::Pass, Status::Fail, Status::Skip];
        for n in 0..20 {
            let results: Vec<_> =
                (0..n).map(|i| result("c", statuses[i * 7 % 3], "m", None)).collect();
            let s = summarize(&results);
            assert_eq!(s.total_checks, s.passed + s.failed + s.skipped);
            assert_eq!(s.total_checks, n);
        }
    }

    #[test]
    fn single_critical_code_quality_failure() {
        let results = vec![
            result("TypeScript Compilation", Status::Fail, "TypeScript compilation failed", Some(Severity::Critical)),
            result("ESLint", Status::Pass, "No lint errors", None),
        ];
        let failed = failures(&results);
        assert_eq!(summarize(&results).failed, 1);
        assert_eq!(recommend(&failed), Recommendation::FixRequired);
        assert_eq!(failed[0].suggestion, "Run the typecheck command to see specific errors");
    }

    #[test]
    fn five_passes_approve() {
        let results: Vec<_> = (0..5).map(|i| result(&format!("c{i}"), Status::Pass, "ok", None)).collect();
        assert_eq!(summarize(&results), Summary { total_checks: 5, passed: 5, failed: 0, skipped: 0 });
        assert_eq!(recommend(&failures(&results)), Recommendation::Approve);
    }

    #[test]
    fn missing_severity_defaults_to_medium() {
        let crashed = [result("Unit Tests", Status::Fail, "Check failed", None)];
        assert_eq!(failures(&crashed)[0].severity, Severity::Medium);
    }

    #[test]
    fn visual_suggestion_needs_viewport_in_message() {
        let narrow = result("Visual - /dashboard (desktop)", Status::Fail, "only using 80% of viewport", None);
        let broken = result("Visual - /dashboard (desktop)", Status::Fail, "Visual verification failed: timeout", None);
        assert_eq!(suggestion_for(&narrow), "Check layout component configuration and CSS width settings");
        assert_eq!(suggestion_for(&broken), DEFAULT_SUGGESTION);
    }
}
