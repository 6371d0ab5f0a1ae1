//! Core library entry for the `attest` CLI.
//!
//! A change set becomes a [`manifest::Manifest`], the manifest drives the
//! verification categories in [`verify`], and their results are folded into
//! a [`report::Report`] persisted by [`store`].

pub mod adapters;
pub mod cassette;
pub mod check;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod manifest;
pub mod ports;
pub mod report;
pub mod store;
pub mod verify;

#[cfg(test)]
pub(crate) mod testing;

pub use error::Error;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["attest", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_on_missing_config() {
        let result = run(["attest", "--config", "/nonexistent/attest.yaml", "status"]);
        assert!(result.unwrap_err().contains("invalid config"));
    }
}
