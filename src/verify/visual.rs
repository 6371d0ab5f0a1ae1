//! Browser-rendered visual verification.
//!
//! One browser session serves the whole category and is closed on every
//! exit path, including a panicking check.

use std::path::PathBuf;

use crate::check::{CheckOutcome, Evidence, FnCheck, ResultSet, Severity};
use crate::error::Error;
use crate::manifest::{Category, Manifest, ScenarioKind, TestScenario};
use crate::ports::BrowserSession;

use super::{VerifyEnv, Verifier};

/// Viewport presets every page is rendered at.
pub const VIEWPORTS: [Viewport; 3] = [
    Viewport { name: "desktop", width: 1440, height: 900 },
    Viewport { name: "tablet", width: 768, height: 1024 },
    Viewport { name: "mobile", width: 375, height: 812 },
];

/// Minimum share of the viewport a dashboard's main container must fill.
pub const MIN_DASHBOARD_USAGE: f64 = 95.0;

/// A named browser window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Preset name used in check names and screenshot files.
    pub name: &'static str,
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
}

/// Screenshots every `visual` target at each viewport and checks layout.
pub struct Visual;

impl Verifier for Visual {
    fn category(&self) -> Category {
        Category::Visual
    }

    fn verify(
        &self,
        env: &VerifyEnv<'_>,
        manifest: &Manifest,
        results: &mut ResultSet,
    ) -> Result<(), Error> {
        let targets: Vec<_> = manifest.targets(ScenarioKind::Visual).collect();
        if targets.is_empty() {
            tracing::info!("no visual targets");
            return Ok(());
        }

        let session = SessionGuard::launch(env)?;
        for (page, scenario) in targets {
            for viewport in VIEWPORTS {
                let name = format!("Visual - {page} ({})", viewport.name);
                results.run(&FnCheck::new(name, || {
                    Ok(render_page(env, session.get(), &manifest.task_id, page, scenario, viewport)
                        .unwrap_or_else(|e| {
                            CheckOutcome::fail(format!("Visual verification failed: {e}"), Severity::High)
                        }))
                }))?;
            }
        }
        Ok(())
    }
}

/// Holds the browser session and closes it when dropped.
struct SessionGuard {
    session: Box<dyn BrowserSession>,
}

impl SessionGuard {
    fn launch(env: &VerifyEnv<'_>) -> Result<Self, Error> {
        let session = env
            .ctx
            .browser
            .launch()
            .map_err(|e| Error::ToolUnavailable { tool: "browser".into(), reason: e.to_string() })?;
        Ok(Self { session })
    }

    fn get(&self) -> &dyn BrowserSession {
        self.session.as_ref()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Err(e) = self.session.close() {
            tracing::warn!(error = %e, "failed to close browser session");
        }
    }
}

fn render_page(
    env: &VerifyEnv<'_>,
    session: &dyn BrowserSession,
    task_id: &str,
    page: &str,
    scenario: &TestScenario,
    viewport: Viewport,
) -> Result<CheckOutcome, Box<dyn std::error::Error + Send + Sync>> {
    session.set_viewport(viewport.width, viewport.height)?;
    session.navigate(&env.config.url_for(page))?;

    let png = session.screenshot()?;
    let path = screenshot_path(env, task_id, page, viewport);
    env.ctx.fs.write_bytes(&path, &png)?;
    let screenshots = Some(vec![path.display().to_string()]);

    if !scenario.wants("layout-metrics") {
        return Ok(CheckOutcome::pass("Visual verification passed")
            .with_evidence(Evidence { screenshots, ..Evidence::default() }));
    }

    let Some(metrics) = session.layout_metrics("main")? else {
        return Ok(CheckOutcome::pass("Visual verification passed").with_evidence(Evidence {
            screenshots,
            logs: Some(vec!["No main element found".to_string()]),
            ..Evidence::default()
        }));
    };

    let is_dashboard = page.contains("dashboard") || page.contains("executive");
    let outcome = if is_dashboard && metrics.viewport_usage < MIN_DASHBOARD_USAGE {
        CheckOutcome::fail(
            format!(
                "Dashboard only using {:.1}% of viewport (should be >{MIN_DASHBOARD_USAGE:.0}%)",
                metrics.viewport_usage
            ),
            Severity::High,
        )
    } else {
        CheckOutcome::pass("Visual verification passed")
    };
    Ok(outcome.with_evidence(Evidence { screenshots, metrics: Some(metrics), logs: None }))
}

/// `<screenshot_dir>/<task_id>/<page>-<viewport>.png`; the root page is `index`.
fn screenshot_path(env: &VerifyEnv<'_>, task_id: &str, page: &str, viewport: Viewport) -> PathBuf {
    let page = match page.trim_start_matches('/') {
        "" => "index",
        trimmed => trimmed,
    };
    env.config.screenshot_dir.join(task_id).join(format!("{page}-{}.png", viewport.name))
}
