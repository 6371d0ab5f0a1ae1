//! Task-type classification.
//!
//! Description keywords are consulted strictly before file paths; the first
//! matching rule wins and `feature` is the fallback.

use super::TaskType;

/// Keyword rules applied to the lowercased description, in priority order.
const DESCRIPTION_RULES: &[(&[&str], TaskType)] = &[
    (&["layout", "spacing", "style"], TaskType::UiChange),
    (&["api", "endpoint"], TaskType::Api),
    (&["database", "migration", "schema"], TaskType::Database),
    (&["fix", "bug"], TaskType::BugFix),
    (&["refactor"], TaskType::Refactor),
];

/// Classifies a change set.
#[must_use]
pub fn classify(description: &str, files: &[String]) -> TaskType {
    let desc = description.to_lowercase();
    if let Some((_, task_type)) = DESCRIPTION_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| desc.contains(k)))
    {
        return *task_type;
    }

    let has_ui = files.iter().any(|f| is_ui_file(f));
    let has_api = files.iter().any(|f| is_api_file(f));
    let has_db = files.iter().any(|f| is_db_file(f));

    if has_ui && !has_api {
        TaskType::UiChange
    } else if has_api {
        TaskType::Api
    } else if has_db {
        TaskType::Database
    } else {
        TaskType::Feature
    }
}

/// React source or anything under a `components` directory.
pub(crate) fn is_ui_file(path: &str) -> bool {
    is_react_source(path) || path.contains("/components/")
}

/// `.tsx` or `.jsx` source.
pub(crate) fn is_react_source(path: &str) -> bool {
    path.ends_with(".tsx") || path.ends_with(".jsx")
}

pub(crate) fn is_api_file(path: &str) -> bool {
    path.contains("/api/") || path.contains("route.ts")
}

fn is_db_file(path: &str) -> bool {
    path.contains("migration") || path.contains("schema")
}
