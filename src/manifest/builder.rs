//! Builds manifests from the repository's change set.

use crate::context::ServiceContext;
use crate::error::Error;
use crate::ports::{DiffRange, GitRepo};

use super::{Changes, Manifest};

/// Builds a manifest for `description`.
///
/// With `files` given, those paths are the change set. Otherwise the files
/// changed by the last commit are used, falling back to the staged files
/// when there is no prior revision.
///
/// # Errors
///
/// Returns [`Error::Git`] if no change set can be listed at all.
pub fn build_from_git(
    ctx: &ServiceContext,
    description: &str,
    files: Option<Vec<String>>,
) -> Result<Manifest, Error> {
    let (files, range) = match files {
        Some(files) => (files, DiffRange::PriorRevision),
        None => changed_files(&*ctx.git)?,
    };
    let changes = analyze_changes(&*ctx.git, range, &files);
    let task_id = ctx.id_gen.generate_id();

    let manifest = Manifest::assemble(task_id, description, files, changes);
    tracing::info!(
        task_id = %manifest.task_id,
        task_type = %manifest.task_type,
        files = manifest.files_modified.len(),
        "manifest built"
    );
    Ok(manifest)
}

fn changed_files(git: &dyn GitRepo) -> Result<(Vec<String>, DiffRange), Error> {
    match git.changed_files(DiffRange::PriorRevision) {
        Ok(files) => Ok((files, DiffRange::PriorRevision)),
        Err(e) => {
            tracing::warn!(error = %e, "no prior revision, falling back to staged changes");
            let files = git.changed_files(DiffRange::Staged).map_err(|e| Error::Git(e.to_string()))?;
            Ok((files, DiffRange::Staged))
        }
    }
}

/// Splits `files` by change kind. Never fails: any path whose status
/// cannot be read counts as modified.
fn analyze_changes(git: &dyn GitRepo, range: DiffRange, files: &[String]) -> Changes {
    let mut changes = Changes::default();
    for file in files {
        let status = match git.change_status(range, file) {
            Ok(line) => line.trim_start().chars().next(),
            Err(e) => {
                tracing::warn!(file = %file, error = %e, "change status unavailable, assuming modified");
                None
            }
        };
        match status {
            Some('A') => changes.added.push(file.clone()),
            Some('D') => changes.removed.push(file.clone()),
            _ => changes.modified.push(file.clone()),
        }
    }
    changes
}
