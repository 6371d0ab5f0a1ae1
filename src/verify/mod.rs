//! Verification orchestrator.
//!
//! Enabled categories are dispatched one after another in
//! [`Category::ALL`] order through the [`verifier_for`] table, each appending
//! to the run's [`ResultSet`]. Success criteria are reconciled last.

pub mod code_quality;
pub mod criteria;
pub mod functional;
pub mod integration;
pub mod performance;
pub mod security;
pub mod visual;

use crate::check::{CheckError, ResultSet};
use crate::config::VerifyConfig;
use crate::context::ServiceContext;
use crate::error::Error;
use crate::manifest::{Category, Manifest};
use crate::ports::ShellOutput;
use crate::report::Report;

/// Collaborators available to every verifier.
pub struct VerifyEnv<'a> {
    /// Ports.
    pub ctx: &'a ServiceContext,
    /// Commands, URLs and output locations.
    pub config: &'a VerifyConfig,
}

/// Checks for one category.
pub trait Verifier: Sync {
    /// Category served.
    fn category(&self) -> Category;

    /// Runs this category's checks for `manifest`, appending to `results`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] only for infrastructure failures; findings are
    /// recorded as results.
    fn verify(
        &self,
        env: &VerifyEnv<'_>,
        manifest: &Manifest,
        results: &mut ResultSet,
    ) -> Result<(), Error>;
}

/// The verifier registered for `category`.
#[must_use]
pub fn verifier_for(category: Category) -> &'static dyn Verifier {
    match category {
        Category::CodeQuality => &code_quality::CodeQuality,
        Category::Visual => &visual::Visual,
        Category::Functional => &functional::Functional,
        Category::Integration => &integration::Integration,
        Category::Performance => &performance::Performance,
        Category::Security => &security::Security,
    }
}

/// Runs every enabled category for `manifest`, reconciles its success
/// criteria and aggregates the outcome.
///
/// # Errors
///
/// Returns an [`Error`] when a required collaborator is unavailable.
pub fn verify_manifest(env: &VerifyEnv<'_>, manifest: &Manifest) -> Result<Report, Error> {
    let start = env.ctx.clock.now();
    tracing::info!(
        task_id = %manifest.task_id,
        task_type = %manifest.task_type,
        files = manifest.files_modified.len(),
        "starting verification"
    );

    let mut results = ResultSet::new();
    for category in manifest.verification_needed.enabled() {
        tracing::info!(%category, "dispatching category");
        verifier_for(category).verify(env, manifest, &mut results)?;
    }
    criteria::reconcile(&manifest.success_criteria, &mut results)?;

    let end = env.ctx.clock.now();
    Ok(Report::build(manifest, start, end, results.into_results()))
}

/// Runs `command`, treating a shell that cannot be spawned as a missing tool.
pub(crate) fn run_command(env: &VerifyEnv<'_>, command: &str) -> Result<ShellOutput, CheckError> {
    tracing::debug!(command, "running");
    env.ctx
        .shell
        .run(command)
        .map_err(|e| CheckError::ToolUnavailable { tool: "shell".into(), reason: e.to_string() })
}

/// Last lines of a command's output, for evidence.
pub(crate) fn output_tail(output: &ShellOutput) -> Vec<String> {
    const TAIL: usize = 20;
    let lines: Vec<&str> = output.stdout.lines().chain(output.stderr.lines()).collect();
    lines[lines.len().saturating_sub(TAIL)..].iter().map(|l| (*l).to_string()).collect()
}
