//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `attest`.
#[derive(Debug, Parser)]
#[command(name = "attest", version, about = "Classify code changes and verify task completion")]
pub struct Cli {
    /// Config file; defaults to `attest.yaml` in the working directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a task manifest from the current git changes.
    Manifest {
        /// What the task did; defaults to "Task completed".
        description: Vec<String>,
        /// Use these files instead of the git change set.
        #[arg(long = "file")]
        files: Vec<String>,
        /// Write the manifest here instead of the store.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run every needed check for a manifest and write the report.
    Verify {
        /// Manifest JSON file.
        manifest: PathBuf,
        /// Write the JSON report here instead of the store.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Build a manifest, then verify it.
    Run {
        /// What the task did; defaults to "Task completed".
        description: Vec<String>,
        /// Use these files instead of the git change set.
        #[arg(long = "file")]
        files: Vec<String>,
    },
    /// Print a stored report, or the manifest if not yet verified.
    Show {
        /// Task id.
        task_id: String,
    },
    /// List stored reports.
    Status,
}
