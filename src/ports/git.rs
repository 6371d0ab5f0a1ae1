//! Git repository port for version-control queries.

use serde::{Deserialize, Serialize};

/// Which pair of trees a diff compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffRange {
    /// The last commit against its parent (`HEAD~1..HEAD`).
    PriorRevision,
    /// The index against `HEAD` (`--cached`).
    Staged,
}

/// Provides read access to a git repository.
pub trait GitRepo: Send + Sync {
    /// Lists the paths changed within `range`, in git's output order.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed (for example when
    /// `HEAD~1` does not exist).
    fn changed_files(
        &self,
        range: DiffRange,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns the raw `--name-status` line(s) for a single path within `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff for this path cannot be computed.
    fn change_status(
        &self,
        range: DiffRange,
        path: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
