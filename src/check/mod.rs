//! The check contract shared by every verification category.
//!
//! A [`Check`] is one atomic probe. Running it yields a [`CheckOutcome`];
//! the [`ResultSet`] names the outcome, isolates crashes and accumulates the
//! run's [`CheckResult`]s in dispatch order.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Error;
use crate::ports::LayoutMetrics;

/// Message given to checks that crashed instead of returning an outcome.
pub const CRASHED_MESSAGE: &str = "Check failed";

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The check passed.
    Pass,
    /// The check found a problem.
    Fail,
    /// The check could not be evaluated and says nothing either way.
    Skip,
}

/// How bad a failure is. Ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks approval outright.
    Critical,
    /// Needs a human look.
    High,
    /// Default for failures that did not state a severity.
    Medium,
    /// Cosmetic.
    Low,
}

impl Severity {
    /// Lowercase name as it appears in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supporting material attached to a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Screenshot files written by the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<String>>,
    /// Measured page geometry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<LayoutMetrics>,
    /// Free-form log lines (tool output tails, diagnostics).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<String>>,
}

impl Evidence {
    /// Evidence consisting only of log lines.
    #[must_use]
    pub fn logs(lines: Vec<String>) -> Self {
        Self { logs: Some(lines), ..Self::default() }
    }
}

/// What a check reports about itself, before it is named.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// Pass, fail or skip.
    pub status: Status,
    /// Human-readable summary.
    pub message: String,
    /// Optional supporting material.
    pub evidence: Option<Evidence>,
    /// Only meaningful when `status` is [`Status::Fail`].
    pub severity: Option<Severity>,
}

impl CheckOutcome {
    /// A passing outcome.
    #[must_use]
    pub fn pass(message: impl Into<String>) -> Self {
        Self { status: Status::Pass, message: message.into(), evidence: None, severity: None }
    }

    /// A failing outcome with the given severity.
    #[must_use]
    pub fn fail(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            status: Status::Fail,
            message: message.into(),
            evidence: None,
            severity: Some(severity),
        }
    }

    /// A skipped outcome.
    #[must_use]
    pub fn skip(message: impl Into<String>) -> Self {
        Self { status: Status::Skip, message: message.into(), evidence: None, severity: None }
    }

    /// Attaches evidence.
    #[must_use]
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence = Some(evidence);
        self
    }

    /// Attaches evidence when there is some.
    #[must_use]
    pub fn with_optional_evidence(mut self, evidence: Option<Evidence>) -> Self {
        self.evidence = evidence;
        self
    }

    fn named(self, check: String) -> CheckResult {
        CheckResult {
            check,
            status: self.status,
            message: self.message,
            evidence: self.evidence,
            severity: self.severity,
        }
    }
}

/// A named check outcome as it appears in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check name, e.g. `TypeScript Compilation`.
    pub check: String,
    /// Pass, fail or skip.
    pub status: Status,
    /// Human-readable summary.
    pub message: String,
    /// Optional supporting material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
    /// Failure severity, if the check stated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

/// Why a check could not produce an outcome.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The check itself broke. Recorded as a generic failure.
    #[error("check failed: {0}")]
    Failed(String),

    /// A collaborator the check cannot do without is missing. Aborts the run.
    #[error("{tool} is unavailable: {reason}")]
    ToolUnavailable {
        /// Which collaborator.
        tool: String,
        /// Why it could not be used.
        reason: String,
    },
}

/// One atomic verification probe.
pub trait Check {
    /// Name under which the result is reported.
    fn name(&self) -> &str;

    /// Runs the probe.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError`] when no outcome could be produced.
    fn run(&self) -> Result<CheckOutcome, CheckError>;
}

/// A [`Check`] backed by a closure.
pub struct FnCheck<F> {
    name: String,
    probe: F,
}

impl<F> FnCheck<F>
where
    F: Fn() -> Result<CheckOutcome, CheckError>,
{
    /// Names a closure as a check.
    pub fn new(name: impl Into<String>, probe: F) -> Self {
        Self { name: name.into(), probe }
    }
}

impl<F> Check for FnCheck<F>
where
    F: Fn() -> Result<CheckOutcome, CheckError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self) -> Result<CheckOutcome, CheckError> {
        (self.probe)()
    }
}

/// Ordered accumulator of check results for one run.
///
/// Passed explicitly through every category dispatch.
#[derive(Debug, Default)]
pub struct ResultSet {
    results: Vec<CheckResult>,
}

impl ResultSet {
    /// An empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `check` in isolation and appends its result.
    ///
    /// A check that returns [`CheckError::Failed`] or panics is recorded as a
    /// `fail` with a generic message and no severity; later checks still run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolUnavailable`] when the check reports a missing
    /// collaborator.
    pub fn run(&mut self, check: &dyn Check) -> Result<(), Error> {
        let name = check.name().to_string();
        let result = match panic::catch_unwind(AssertUnwindSafe(|| check.run())) {
            Ok(Ok(outcome)) => outcome.named(name),
            Ok(Err(CheckError::ToolUnavailable { tool, reason })) => {
                tracing::error!(check = %name, %tool, %reason, "required tool unavailable");
                return Err(Error::ToolUnavailable { tool, reason });
            }
            Ok(Err(CheckError::Failed(reason))) => {
                tracing::warn!(check = %name, %reason, "check errored");
                crashed(name, reason)
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                tracing::warn!(check = %name, %reason, "check panicked");
                crashed(name, reason)
            }
        };
        tracing::info!(
            check = %result.check,
            status = ?result.status,
            severity = result.severity.map(Severity::as_str),
            "{}",
            result.message
        );
        self.results.push(result);
        Ok(())
    }

    /// Results recorded so far, in dispatch order.
    #[must_use]
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Consumes the set, returning its results in dispatch order.
    #[must_use]
    pub fn into_results(self) -> Vec<CheckResult> {
        self.results
    }
}

fn crashed(check: String, reason: String) -> CheckResult {
    CheckResult {
        check,
        status: Status::Fail,
        message: CRASHED_MESSAGE.to_string(),
        evidence: Some(Evidence::logs(vec![reason])),
        severity: None,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic with non-string payload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_are_named_in_dispatch_order() {
        let mut results = ResultSet::new();
        results.run(&FnCheck::new("first", || Ok(CheckOutcome::pass("ok")))).unwrap();
        results
            .run(&FnCheck::new("second", || Ok(CheckOutcome::fail("bad", Severity::High))))
            .unwrap();

        let names: Vec<_> = results.results().iter().map(|r| r.check.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(results.results()[1].severity, Some(Severity::High));
    }

    #[test]
    fn panicking_check_becomes_generic_failure_and_siblings_still_run() {
        let mut results = ResultSet::new();
        results.run(&FnCheck::new("boom", || panic!("index out of bounds"))).unwrap();
        results.run(&FnCheck::new("after", || Ok(CheckOutcome::pass("fine")))).unwrap();

        let crashed = &results.results()[0];
        assert_eq!(crashed.status, Status::Fail);
        assert_eq!(crashed.message, CRASHED_MESSAGE);
        assert_eq!(crashed.severity, None);
        assert_eq!(
            crashed.evidence.as_ref().and_then(|e| e.logs.clone()),
            Some(vec!["index out of bounds".to_string()])
        );
        assert_eq!(results.results()[1].status, Status::Pass);
    }

    #[test]
    fn failed_check_error_is_contained() {
        let mut results = ResultSet::new();
        results
            .run(&FnCheck::new("broken", || Err(CheckError::Failed("bad output".into()))))
            .unwrap();
        let result = &results.results()[0];
        assert_eq!(result.status, Status::Fail);
        assert_eq!(result.severity, None);
    }

    #[test]
    fn missing_tool_aborts() {
        let mut results = ResultSet::new();
        let err = results
            .run(&FnCheck::new("ESLint", || {
                Err(CheckError::ToolUnavailable { tool: "shell".into(), reason: "enoent".into() })
            }))
            .unwrap_err();
        assert!(matches!(err, Error::ToolUnavailable { .. }));
        assert!(results.results().is_empty());
    }

    #[test]
    fn result_json_omits_absent_optionals() {
        let mut results = ResultSet::new();
        results.run(&FnCheck::new("Build", || Ok(CheckOutcome::pass("Build succeeded")))).unwrap();
        let json = serde_json::to_value(&results.results()[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"check": "Build", "status": "pass", "message": "Build succeeded"})
        );
    }

    #[test]
    fn severity_orders_critical_first() {
        assert!(Severity::Critical < Severity::High);
        assert_eq!(Severity::Medium.to_string(), "medium");
    }
}
