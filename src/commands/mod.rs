//! Command dispatch and handlers.

pub mod manifest;
pub mod run;
pub mod show;
pub mod status;
pub mod verify;

use std::env;
use std::path::Path;

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::VerifyConfig;
use crate::context::ServiceContext;

/// Description used when none is given on the command line.
pub const DEFAULT_DESCRIPTION: &str = "Task completed";

/// Dispatch a parsed command line to its handler.
///
/// When `ATTEST_RECORD` is set to a directory path, all port interactions are
/// recorded to per-port cassette files in a timestamped directory under it.
///
/// # Errors
///
/// Returns an error string if configuration fails or the handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = VerifyConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;

    let (ctx, session) = if let Ok(path) = env::var("ATTEST_RECORD") {
        let session = RecordingSession::new(Path::new(&path))?;
        let ctx = ServiceContext::recording(&config, &session)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let result = dispatch_with_context(&cli.command, &ctx, &config);

    // Finish recording even when the command failed.
    if let Some(session) = session {
        // The context holds the recorders' other Arc handles.
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &VerifyConfig,
) -> Result<(), String> {
    match command {
        Command::Manifest { description, files, output } => {
            manifest::run(ctx, config, description, files, output.as_deref())
        }
        Command::Verify { manifest, report } => {
            verify::run(ctx, config, manifest, report.as_deref())
        }
        Command::Run { description, files } => run::run(ctx, config, description, files),
        Command::Show { task_id } => show::run(ctx, config, task_id),
        Command::Status => status::run(ctx, config),
    }
}

/// Joins description words, defaulting to [`DEFAULT_DESCRIPTION`].
pub(crate) fn description_from(words: &[String]) -> String {
    let joined = words.join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        trimmed.to_string()
    }
}

fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
