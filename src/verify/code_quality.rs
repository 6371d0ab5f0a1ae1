//! Type-check, lint and build.

use crate::check::{CheckOutcome, Evidence, FnCheck, ResultSet, Severity};
use crate::error::Error;
use crate::manifest::{Category, Manifest};

use super::{output_tail, run_command, VerifyEnv, Verifier};

/// Runs the configured type-check, lint and build commands.
pub struct CodeQuality;

impl Verifier for CodeQuality {
    fn category(&self) -> Category {
        Category::CodeQuality
    }

    fn verify(
        &self,
        env: &VerifyEnv<'_>,
        _manifest: &Manifest,
        results: &mut ResultSet,
    ) -> Result<(), Error> {
        let commands = &env.config.commands;
        let steps = [
            (
                "TypeScript Compilation",
                &commands.typecheck,
                "No type errors",
                "TypeScript compilation failed",
                Severity::Critical,
            ),
            ("ESLint", &commands.lint, "No lint errors", "Lint errors found", Severity::High),
            ("Build", &commands.build, "Build succeeded", "Build failed", Severity::Critical),
        ];

        for (name, command, passed, failed, severity) in steps {
            results.run(&FnCheck::new(name, || {
                let output = run_command(env, command)?;
                Ok(if output.success() {
                    CheckOutcome::pass(passed)
                } else {
                    CheckOutcome::fail(format!("{failed} (exit {})", output.exit_code), severity)
                        .with_evidence(Evidence::logs(output_tail(&output)))
                })
            }))?;
        }
        Ok(())
    }
}
