//! `attest run` command: manifest, then verify.

use crate::config::VerifyConfig;
use crate::context::ServiceContext;

use super::{manifest, verify};

/// Execute the `run` command.
///
/// # Errors
///
/// Returns an error string if either stage fails or the recommendation is
/// `fix-required`.
pub fn run(
    ctx: &ServiceContext,
    config: &VerifyConfig,
    description: &[String],
    files: &[String],
) -> Result<(), String> {
    let (manifest, path) = manifest::build(ctx, config, description, files, None)?;
    println!("Manifest {} ({}) written to {}", manifest.task_id, manifest.task_type, path.display());
    let report = verify::verify_and_save(ctx, config, &manifest, None)?;
    verify::outcome(&report)
}
