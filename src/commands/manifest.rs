//! `attest manifest` command.

use std::path::{Path, PathBuf};

use crate::config::VerifyConfig;
use crate::context::ServiceContext;
use crate::manifest::{build_from_git, Manifest};
use crate::store::VerificationStore;

use super::description_from;

/// Execute the `manifest` command and print where the manifest was written.
///
/// # Errors
///
/// Returns an error string if the change set cannot be listed or the
/// manifest cannot be written.
pub fn run(
    ctx: &ServiceContext,
    config: &VerifyConfig,
    description: &[String],
    files: &[String],
    output: Option<&Path>,
) -> Result<(), String> {
    let (manifest, path) = build(ctx, config, description, files, output)?;
    println!("Manifest {} ({}) written to {}", manifest.task_id, manifest.task_type, path.display());
    Ok(())
}

/// Builds and persists a manifest, returning it with its path.
pub(crate) fn build(
    ctx: &ServiceContext,
    config: &VerifyConfig,
    description: &[String],
    files: &[String],
    output: Option<&Path>,
) -> Result<(Manifest, PathBuf), String> {
    let description = description_from(description);
    let files = (!files.is_empty()).then(|| files.to_vec());
    let manifest = build_from_git(ctx, &description, files).map_err(|e| e.to_string())?;

    let store = VerificationStore::new(ctx, &config.store_root);
    let path = match output {
        Some(path) => {
            store.save_manifest_to(&manifest, path).map_err(|e| e.to_string())?;
            path.to_path_buf()
        }
        None => store.save_manifest(&manifest).map_err(|e| e.to_string())?,
    };
    Ok((manifest, path))
}
