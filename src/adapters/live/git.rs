//! Live git adapter using `git` CLI commands.

use std::path::PathBuf;
use std::process::Command;

use crate::ports::git::{DiffRange, GitRepo};

/// Live git adapter that shells out to the `git` CLI.
pub struct LiveGitRepo {
    workdir: PathBuf,
}

impl LiveGitRepo {
    /// Creates an adapter for the repository containing `workdir`.
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self { workdir: workdir.into() }
    }

    fn git(&self, args: &[&str]) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new("git").args(args).current_dir(&self.workdir).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git {} failed: {}", args.join(" "), stderr.trim()).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn range_args(range: DiffRange) -> &'static str {
    match range {
        DiffRange::PriorRevision => "HEAD~1..HEAD",
        DiffRange::Staged => "--cached",
    }
}

impl GitRepo for LiveGitRepo {
    fn changed_files(
        &self,
        range: DiffRange,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let stdout = self.git(&["diff", "--name-only", range_args(range)])?;
        Ok(stdout.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
    }

    fn change_status(
        &self,
        range: DiffRange,
        path: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.git(&["diff", "--name-status", range_args(range), "--", path])
    }
}
