//! Task manifests: what changed and which verification applies.
//!
//! A manifest is assembled once from a change set and a free-text
//! description, persisted, and consumed by a single verification run.

pub mod builder;
pub mod classify;
pub mod criteria;
pub mod needs;
pub mod scenarios;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ports::FileSystem;

pub use builder::build_from_git;
pub use classify::classify;
pub use criteria::success_criteria;
pub use needs::{verification_needs, Category, VerificationNeeds};
pub use scenarios::{test_scenarios, ScenarioKind, TestScenario};

/// Kind of work a change set represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskType {
    /// New functionality; the fallback when nothing else matches.
    Feature,
    /// A defect fix.
    BugFix,
    /// Behaviour-preserving restructuring.
    Refactor,
    /// Visual or layout work.
    UiChange,
    /// HTTP API work.
    Api,
    /// Schema or migration work.
    Database,
    /// Configuration-only change. Never inferred, only read from manifests.
    Config,
}

impl TaskType {
    /// Kebab-case name as it appears in manifests and reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::BugFix => "bug-fix",
            Self::Refactor => "refactor",
            Self::UiChange => "ui-change",
            Self::Api => "api",
            Self::Database => "database",
            Self::Config => "config",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Changed paths split by how they changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    /// Newly created files.
    pub added: Vec<String>,
    /// Edited files, and any file whose status could not be determined.
    pub modified: Vec<String>,
    /// Deleted files.
    pub removed: Vec<String>,
}

/// Declarative record of one task's change set and required verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Unique token, `task-<unix millis>`.
    pub task_id: String,
    /// Classified kind of work.
    pub task_type: TaskType,
    /// Free-text description supplied by the caller.
    pub description: String,
    /// Changed paths in discovery order.
    pub files_modified: Vec<String>,
    /// Changed paths split by change kind.
    pub changes: Changes,
    /// Which categories the verification run dispatches.
    pub verification_needed: VerificationNeeds,
    /// Criteria reconciled against check results after all categories ran.
    pub success_criteria: Vec<String>,
    /// Targets and sub-checks for scenario-driven categories.
    pub test_scenarios: Vec<TestScenario>,
}

impl Manifest {
    /// Derives a manifest from an already-discovered change set.
    ///
    /// Classification, the needs matrix, criteria and scenarios are all
    /// pure functions of `description` and `files`.
    #[must_use]
    pub fn assemble(
        task_id: String,
        description: &str,
        files: Vec<String>,
        changes: Changes,
    ) -> Self {
        let task_type = classify(description, &files);
        Self {
            task_id,
            task_type,
            description: description.to_string(),
            verification_needed: verification_needs(task_type, &files),
            success_criteria: success_criteria(task_type, description),
            test_scenarios: test_scenarios(task_type, &files),
            files_modified: files,
            changes,
        }
    }

    /// Targets of every scenario of the given kind, in scenario order.
    pub fn targets(&self, kind: ScenarioKind) -> impl Iterator<Item = (&str, &TestScenario)> {
        self.test_scenarios
            .iter()
            .filter(move |s| s.kind == kind)
            .flat_map(|s| s.targets.iter().map(move |t| (t.as_str(), s)))
    }

    /// Reads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestRead`] if the file cannot be read and
    /// [`Error::ManifestParse`] if it is not a valid manifest.
    pub fn read(fs: &dyn FileSystem, path: &Path) -> Result<Self, Error> {
        let content = fs
            .read_to_string(path)
            .map_err(|e| Error::ManifestRead { path: path.to_path_buf(), reason: e.to_string() })?;
        serde_json::from_str(&content)
            .map_err(|e| Error::ManifestParse { path: path.to_path_buf(), reason: e.to_string() })
    }
}
