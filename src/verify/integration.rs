//! Live HTTP probes of changed endpoints.

use crate::check::{CheckOutcome, FnCheck, ResultSet, Severity};
use crate::error::Error;
use crate::manifest::{Category, Manifest, ScenarioKind};
use crate::ports::ProbeError;

use super::{VerifyEnv, Verifier};

/// Issues one GET per `api` scenario target.
pub struct Integration;

impl Verifier for Integration {
    fn category(&self) -> Category {
        Category::Integration
    }

    fn verify(
        &self,
        env: &VerifyEnv<'_>,
        manifest: &Manifest,
        results: &mut ResultSet,
    ) -> Result<(), Error> {
        for (endpoint, _) in manifest.targets(ScenarioKind::Api) {
            let url = env.config.url_for(endpoint);
            results.run(&FnCheck::new(format!("API Integration - {endpoint}"), || {
                tracing::debug!(url = %url, "probing");
                Ok(match env.ctx.http.get(&url) {
                    Ok(status) if (200..300).contains(&status) => {
                        CheckOutcome::pass(format!("Endpoint accessible ({status})"))
                    }
                    Ok(status) => {
                        CheckOutcome::fail(format!("Endpoint returned {status}"), Severity::High)
                    }
                    Err(ProbeError::Timeout(e)) => {
                        CheckOutcome::fail(format!("Endpoint timed out: {e}"), Severity::High)
                    }
                    Err(ProbeError::Network(e)) => {
                        CheckOutcome::fail(format!("Endpoint unreachable: {e}"), Severity::Critical)
                    }
                })
            }))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::Status;
    use crate::config::VerifyConfig;
    use crate::manifest::Changes;
    use crate::testing::{test_context, FakeHttp};

    #[test]
    fn status_and_error_mapping() {
        let http = FakeHttp::new()
            .respond("http://localhost:3000/api/a", Ok(204))
            .respond("http://localhost:3000/api/b", Ok(500))
            .respond("http://localhost:3000/api/c", Err(ProbeError::Timeout("30s".into())))
            .respond("http://localhost:3000/api/d", Err(ProbeError::Network("refused".into())));
        let mut ctx = test_context();
        ctx.http = Box::new(http.clone());
        let config = VerifyConfig::default();
        let env = VerifyEnv { ctx: &ctx, config: &config };

        let files = ["a", "b", "c", "d"].map(|n| format!("frontend/src/app/api/{n}/route.ts"));
        let manifest = Manifest::assemble("t".into(), "", files.into(), Changes::default());

        let mut results = ResultSet::new();
        Integration.verify(&env, &manifest, &mut results).unwrap();

        let outcomes: Vec<_> =
            results.results().iter().map(|r| (r.check.as_str(), r.status, r.severity)).collect();
        assert_eq!(
            outcomes,
            [
                ("API Integration - /api/a", Status::Pass, None),
                ("API Integration - /api/b", Status::Fail, Some(Severity::High)),
                ("API Integration - /api/c", Status::Fail, Some(Severity::High)),
                ("API Integration - /api/d", Status::Fail, Some(Severity::Critical)),
            ]
        );
        assert_eq!(http.requested().len(), 4);
    }

    #[test]
    fn no_api_scenario_means_no_probes() {
        let http = FakeHttp::new();
        let mut ctx = test_context();
        ctx.http = Box::new(http.clone());
        let config = VerifyConfig::default();
        let env = VerifyEnv { ctx: &ctx, config: &config };
        let manifest = Manifest::assemble("t".into(), "add", vec!["src/x.ts".into()], Changes::default());

        let mut results = ResultSet::new();
        Integration.verify(&env, &manifest, &mut results).unwrap();
        assert!(results.results().is_empty());
        assert!(http.requested().is_empty());
    }
}
