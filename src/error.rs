//! Infrastructure errors that abort a run.
//!
//! Check findings are never represented here; they are `fail` results.

use std::path::PathBuf;

use thiserror::Error;

/// A failure that makes the run's output untrustworthy, so the run stops.
#[derive(Debug, Error)]
pub enum Error {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {reason}")]
    ManifestRead {
        /// Manifest location.
        path: PathBuf,
        /// Underlying I/O error.
        reason: String,
    },

    /// The manifest file is not a valid manifest.
    #[error("failed to parse manifest {path}: {reason}")]
    ManifestParse {
        /// Manifest location.
        path: PathBuf,
        /// Underlying parse error.
        reason: String,
    },

    /// No change set could be obtained from git.
    #[error("failed to list changed files: {0}")]
    Git(String),

    /// A collaborator required by an enabled category is missing entirely.
    #[error("{tool} is unavailable: {reason}")]
    ToolUnavailable {
        /// Which collaborator.
        tool: String,
        /// Why it could not be used.
        reason: String,
    },

    /// A manifest or report could not be persisted or loaded from the store.
    #[error("store error for {path}: {reason}")]
    Store {
        /// File that was being written or read.
        path: PathBuf,
        /// Underlying error.
        reason: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("invalid config {path}: {reason}")]
    Config {
        /// Config file location.
        path: PathBuf,
        /// Underlying error.
        reason: String,
    },
}
