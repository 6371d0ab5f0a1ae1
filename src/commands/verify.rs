//! `attest verify` command.

use std::path::Path;

use crate::config::VerifyConfig;
use crate::context::ServiceContext;
use crate::manifest::Manifest;
use crate::report::{Recommendation, Report};
use crate::store::VerificationStore;
use crate::verify::{verify_manifest, VerifyEnv};

/// Execute the `verify` command.
///
/// # Errors
///
/// Returns an error string if the manifest cannot be loaded, verification
/// aborts, the report cannot be written, or the recommendation is
/// `fix-required`.
pub fn run(
    ctx: &ServiceContext,
    config: &VerifyConfig,
    manifest_path: &Path,
    report_path: Option<&Path>,
) -> Result<(), String> {
    let manifest = Manifest::read(&*ctx.fs, manifest_path).map_err(|e| e.to_string())?;
    let report = verify_and_save(ctx, config, &manifest, report_path)?;
    outcome(&report)
}

/// Verifies `manifest`, persists the report and prints its summary.
pub(crate) fn verify_and_save(
    ctx: &ServiceContext,
    config: &VerifyConfig,
    manifest: &Manifest,
    report_path: Option<&Path>,
) -> Result<Report, String> {
    let env = VerifyEnv { ctx, config };
    let report = verify_manifest(&env, manifest).map_err(|e| e.to_string())?;

    let store = VerificationStore::new(ctx, &config.store_root);
    let path = match report_path {
        Some(path) => {
            store.save_report_to(&report, path).map_err(|e| e.to_string())?;
            path.to_path_buf()
        }
        None => store.save_report(&report).map_err(|e| e.to_string())?,
    };

    let summary = &report.results.summary;
    println!(
        "{} passed, {} failed, {} skipped ({} checks)",
        summary.passed, summary.failed, summary.skipped, summary.total_checks
    );
    for failure in &report.results.failures {
        println!("  FAIL [{}] {}: {}", failure.severity, failure.check, failure.reason);
    }
    println!("Report: {}", path.display());
    println!("Recommendation: {}", report.recommendation);
    Ok(report)
}

/// Maps a recommendation to the command's outcome.
pub(crate) fn outcome(report: &Report) -> Result<(), String> {
    match report.recommendation {
        Recommendation::FixRequired => {
            Err(format!("Verification of {} requires fixes", report.task.id))
        }
        Recommendation::Approve | Recommendation::ManualReview => Ok(()),
    }
}
