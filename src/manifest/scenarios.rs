//! Test scenario generation: which pages and endpoints a change touches.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::TaskType;

/// What a scenario exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Rendered pages across viewports.
    Visual,
    /// HTTP endpoints.
    Api,
    /// End-to-end user flows. Descriptive only; nothing dispatches it.
    E2e,
}

/// Targets plus the sub-checks to run against each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestScenario {
    /// Scenario kind.
    #[serde(rename = "type")]
    pub kind: ScenarioKind,
    /// Page paths, endpoint paths or flow names.
    pub targets: Vec<String>,
    /// Sub-check identifiers, e.g. `layout-metrics`.
    pub checks: Vec<String>,
}

impl TestScenario {
    fn new(kind: ScenarioKind, targets: Vec<String>, checks: &[&str]) -> Self {
        Self { kind, targets, checks: checks.iter().map(|c| (*c).to_string()).collect() }
    }

    /// Whether the scenario asks for `check`.
    #[must_use]
    pub fn wants(&self, check: &str) -> bool {
        self.checks.iter().any(|c| c == check)
    }
}

/// Scenarios for a classified change set.
#[must_use]
pub fn test_scenarios(task_type: TaskType, files: &[String]) -> Vec<TestScenario> {
    let mut scenarios = Vec::new();

    if task_type == TaskType::UiChange || files.iter().any(|f| f.ends_with(".tsx")) {
        scenarios.push(TestScenario::new(
            ScenarioKind::Visual,
            affected_pages(files),
            &["layout-metrics", "responsive-behavior", "visual-regression"],
        ));
    }

    if task_type == TaskType::Api || files.iter().any(|f| f.contains("/api/")) {
        scenarios.push(TestScenario::new(
            ScenarioKind::Api,
            affected_endpoints(files),
            &["response-format", "error-handling", "performance"],
        ));
    }

    if task_type == TaskType::Feature {
        scenarios.push(TestScenario::new(
            ScenarioKind::E2e,
            vec!["user-flow".to_string()],
            &["happy-path", "edge-cases", "error-states"],
        ));
    }

    scenarios
}

/// Page routes touched by the change, deduplicated in first-seen order.
///
/// Route files (`.../app/<route>/page.tsx`) map directly; components whose
/// file stem contains `dashboard` or `executive` (case-sensitive) pull in
/// that page.
#[must_use]
pub fn affected_pages(files: &[String]) -> Vec<String> {
    let mut pages: Vec<String> = Vec::new();
    let mut push = |page: String| {
        if !pages.contains(&page) {
            pages.push(page);
        }
    };

    for file in files {
        if let Some(route) = page_route(file) {
            push(route);
        }

        if file.contains("/components/") {
            let stem = Path::new(file)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            if stem.contains("dashboard") {
                push("/dashboard".to_string());
            }
            if stem.contains("executive") {
                push("/executive".to_string());
            }
        }
    }

    pages
}

/// Endpoint paths of changed API route files.
#[must_use]
pub fn affected_endpoints(files: &[String]) -> Vec<String> {
    files
        .iter()
        .filter(|f| f.ends_with("route.ts"))
        .filter_map(|f| f.rfind("/api/").map(|idx| &f[idx..]))
        .map(|tail| convert_dynamic_segments(tail.strip_suffix("/route.ts").unwrap_or(tail)))
        .collect()
}

/// Route of a `page.tsx` under an `app` directory; `/` for the root page.
fn page_route(file: &str) -> Option<String> {
    let segments: Vec<&str> = file.split('/').collect();
    let (last, dirs) = segments.split_last()?;
    if *last != "page.tsx" {
        return None;
    }
    let app = dirs.iter().rposition(|s| *s == "app")?;
    let route = dirs[app + 1..].join("/");
    Some(convert_dynamic_segments(&format!("/{route}")))
}

/// `[id]` becomes `:id`.
fn convert_dynamic_segments(path: &str) -> String {
    static DYNAMIC: OnceLock<Regex> = OnceLock::new();
    let re = DYNAMIC.get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("valid regex"));
    re.replace_all(path, ":$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| (*p).to_string()).collect()
    }

    #[test]
    fn page_files_map_to_routes() {
        let pages = affected_pages(&files(&[
            "frontend/src/app/page.tsx",
            "frontend/src/app/projects/[projectId]/budget/page.tsx",
            "frontend/src/app/projects/[projectId]/budget/layout.tsx",
        ]));
        assert_eq!(pages, ["/", "/projects/:projectId/budget"]);
    }

    #[test]
    fn component_names_pull_in_dashboard_pages_once() {
        let pages = affected_pages(&files(&[
            "frontend/src/components/executive-dashboard.tsx",
            "frontend/src/components/dashboard/dashboard-card.tsx",
            "frontend/src/components/Table.tsx",
        ]));
        assert_eq!(pages, ["/dashboard", "/executive"]);
    }

    #[test]
    fn component_name_match_is_case_sensitive() {
        let pages = affected_pages(&files(&[
            "frontend/src/components/ExecutiveDashboard.tsx",
            "frontend/src/components/DashboardCard.tsx",
        ]));
        assert!(pages.is_empty());
    }

    #[test]
    fn endpoints_keep_api_prefix_and_convert_params() {
        let endpoints = affected_endpoints(&files(&[
            "frontend/src/app/api/projects/[id]/change-events/route.ts",
            "frontend/src/app/api/widgets/route.ts",
            "frontend/src/lib/api/client.ts",
        ]));
        assert_eq!(endpoints, ["/api/projects/:id/change-events", "/api/widgets"]);
    }

    #[test]
    fn scenario_selection_follows_task_type_and_files() {
        let ui = test_scenarios(TaskType::UiChange, &files(&["styles/globals.css"]));
        assert_eq!(ui.len(), 1);
        assert_eq!(ui[0].kind, ScenarioKind::Visual);
        assert!(ui[0].targets.is_empty());
        assert!(ui[0].wants("layout-metrics"));

        let feature = test_scenarios(
            TaskType::Feature,
            &files(&["frontend/src/app/reports/page.tsx", "frontend/src/app/api/reports/route.ts"]),
        );
        let kinds: Vec<_> = feature.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [ScenarioKind::Visual, ScenarioKind::Api, ScenarioKind::E2e]);
        assert_eq!(feature[2].targets, ["user-flow"]);
    }

    #[test]
    fn scenario_json_uses_type_key() {
        let scenario = TestScenario::new(ScenarioKind::E2e, vec!["user-flow".into()], &["happy-path"]);
        let json = serde_json::to_value(&scenario).unwrap();
        assert_eq!(json["type"], "e2e");
    }
}
