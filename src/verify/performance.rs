//! Best-effort bundle-size analysis.

use crate::check::{CheckOutcome, FnCheck, ResultSet};
use crate::error::Error;
use crate::manifest::{Category, Manifest};

use super::{VerifyEnv, Verifier};

/// Runs the analyze command; anything short of a clean exit is a skip.
pub struct Performance;

impl Verifier for Performance {
    fn category(&self) -> Category {
        Category::Performance
    }

    fn verify(
        &self,
        env: &VerifyEnv<'_>,
        _manifest: &Manifest,
        results: &mut ResultSet,
    ) -> Result<(), Error> {
        results.run(&FnCheck::new("Bundle Size", || {
            let command = &env.config.commands.analyze;
            tracing::debug!(command = %command, "running");
            Ok(match env.ctx.shell.run(command) {
                Ok(output) if output.success() => CheckOutcome::pass("Bundle size within limits"),
                Ok(_) | Err(_) => CheckOutcome::skip("Bundle analysis not available"),
            })
        }))
    }
}
