//! Verification reports.
//!
//! A report is derived once from a manifest and the run's results and is
//! never mutated afterwards. Its JSON uses camelCase keys.

pub mod aggregate;
pub mod markdown;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::check::{CheckResult, Severity};
use crate::manifest::{Manifest, TaskType};

pub use aggregate::{failures, recommend, suggestion_for, summarize};

/// Final disposition of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    /// Nothing failed.
    Approve,
    /// At least one critical failure.
    FixRequired,
    /// Failures, none critical.
    ManualReview,
}

impl Recommendation {
    /// Kebab-case name as it appears in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::FixRequired => "fix-required",
            Self::ManualReview => "manual-review",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which task was verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    /// Manifest task id.
    pub id: String,
    /// Manifest description.
    pub description: String,
    /// Classified task type.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// When the report was produced.
    pub timestamp: DateTime<Utc>,
}

/// When the run happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    /// First clock reading of the run.
    pub start_time: DateTime<Utc>,
    /// Last clock reading of the run.
    pub end_time: DateTime<Utc>,
    /// `end_time - start_time` in milliseconds.
    pub duration: i64,
}

/// Result counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Always `passed + failed + skipped`.
    pub total_checks: usize,
    /// Results with status `pass`.
    pub passed: usize,
    /// Results with status `fail`.
    pub failed: usize,
    /// Results with status `skip`.
    pub skipped: usize,
}

/// A failed result with remediation advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Check name.
    pub check: String,
    /// The check's message.
    pub reason: String,
    /// Remediation hint.
    pub suggestion: String,
    /// The check's severity, `medium` if it stated none.
    pub severity: Severity,
}

/// Everything the checks produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    /// Counts by status.
    pub summary: Summary,
    /// Every result in dispatch order.
    pub details: Vec<CheckResult>,
    /// Every failed result, repackaged.
    pub failures: Vec<Failure>,
}

/// A complete verification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Which task.
    pub task: TaskInfo,
    /// When.
    pub verification: Timing,
    /// What the checks found.
    pub results: Results,
    /// Final disposition, a pure function of `results.failures`.
    pub recommendation: Recommendation,
}

impl Report {
    /// Aggregates `details` into a report for `manifest`.
    #[must_use]
    pub fn build(
        manifest: &Manifest,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        details: Vec<CheckResult>,
    ) -> Self {
        let failures = failures(&details);
        let recommendation = recommend(&failures);
        Self {
            task: TaskInfo {
                id: manifest.task_id.clone(),
                description: manifest.description.clone(),
                task_type: manifest.task_type,
                timestamp: end,
            },
            verification: Timing {
                start_time: start,
                end_time: end,
                duration: (end - start).num_milliseconds(),
            },
            results: Results { summary: summarize(&details), details, failures },
            recommendation,
        }
    }

    /// Whether the run approved the task.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.recommendation == Recommendation::Approve
    }
}
