//! Live shell executor using `std::process::Command`.

use std::path::PathBuf;
use std::process::Command;

use crate::ports::shell::{ShellExecutor, ShellOutput};

/// Live shell executor that runs commands via `sh -c` inside a working directory.
pub struct LiveShellExecutor {
    workdir: PathBuf,
}

impl LiveShellExecutor {
    /// Creates an executor that runs every command from `workdir`.
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self { workdir: workdir.into() }
    }
}

impl ShellExecutor for LiveShellExecutor {
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        tracing::debug!(command, workdir = %self.workdir.display(), "running shell command");
        let output =
            Command::new("sh").arg("-c").arg(command).current_dir(&self.workdir).output()?;
        Ok(ShellOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_echo_command() {
        let shell = LiveShellExecutor::new(".");
        let result = shell.run("echo hello").unwrap();

        assert!(result.success());
        assert_eq!(result.stdout.trim(), "hello");
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn captures_exit_code() {
        let shell = LiveShellExecutor::new(".");
        let result = shell.run("exit 42").unwrap();

        assert_eq!(result.exit_code, 42);
        assert!(!result.success());
    }

    #[test]
    fn runs_inside_workdir() {
        let dir = std::env::temp_dir().join("attest_live_shell_workdir");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("marker.txt"), "x").unwrap();

        let shell = LiveShellExecutor::new(&dir);
        let result = shell.run("ls marker.txt").unwrap();
        assert!(result.success());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_workdir_is_a_spawn_error() {
        let shell = LiveShellExecutor::new("/definitely/not/a/real/dir");
        assert!(shell.run("true").is_err());
    }
}
