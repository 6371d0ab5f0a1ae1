//! Dependency audit.

use crate::check::{CheckOutcome, Evidence, FnCheck, ResultSet, Severity};
use crate::error::Error;
use crate::manifest::{Category, Manifest};

use super::{output_tail, run_command, VerifyEnv, Verifier};

/// Runs the audit command; any finding at or above its floor is critical.
pub struct Security;

impl Verifier for Security {
    fn category(&self) -> Category {
        Category::Security
    }

    fn verify(
        &self,
        env: &VerifyEnv<'_>,
        _manifest: &Manifest,
        results: &mut ResultSet,
    ) -> Result<(), Error> {
        results.run(&FnCheck::new("Security Audit", || {
            let output = run_command(env, &env.config.commands.audit)?;
            Ok(if output.success() {
                CheckOutcome::pass("No high severity vulnerabilities")
            } else {
                CheckOutcome::fail("Security vulnerabilities found", Severity::Critical)
                    .with_evidence(Evidence::logs(output_tail(&output)))
            })
        }))
    }
}
