//! `attest show` command.

use crate::config::VerifyConfig;
use crate::context::ServiceContext;
use crate::store::VerificationStore;

/// Execute the `show` command.
///
/// Prints the stored Markdown report for `task_id`, or the manifest JSON
/// when the task has not been verified yet.
///
/// # Errors
///
/// Returns an error string if neither a report nor a manifest exists.
pub fn run(ctx: &ServiceContext, config: &VerifyConfig, task_id: &str) -> Result<(), String> {
    print!("{}", render(ctx, config, task_id)?);
    Ok(())
}

fn render(ctx: &ServiceContext, config: &VerifyConfig, task_id: &str) -> Result<String, String> {
    let store = VerificationStore::new(ctx, &config.store_root);
    if let Some(markdown) = store.load_markdown(task_id).map_err(|e| e.to_string())? {
        return Ok(markdown);
    }
    if !ctx.fs.exists(&store.manifest_path(task_id)) {
        return Err(format!("No report or manifest found for {task_id}"));
    }
    let manifest = store.load_manifest(task_id).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&manifest).map_err(|e| e.to_string())?;
    Ok(format!("Not verified yet.\n{json}\n"))
}
