//! Success criteria generation.

use super::TaskType;

/// Criteria every task must meet.
pub const BASELINE_CRITERIA: [&str; 3] = ["No type errors", "No lint errors", "Tests pass"];

/// Extra criteria injected when the description contains any keyword,
/// matched case-sensitively.
struct KeywordCriteria {
    task_type: TaskType,
    keywords: &'static [&'static str],
    criteria: &'static [&'static str],
}

const KEYWORD_CRITERIA: &[KeywordCriteria] = &[KeywordCriteria {
    task_type: TaskType::UiChange,
    keywords: &["dashboard", "executive"],
    criteria: &["Dashboard uses >95% of viewport width", "Edge padding between 8-24px"],
}];

fn type_criteria(task_type: TaskType) -> &'static [&'static str] {
    match task_type {
        TaskType::UiChange => &[
            "Visual appearance matches design requirements",
            "Responsive behavior works on all viewports",
            "No layout regressions",
        ],
        TaskType::Api => &[
            "API returns correct response format",
            "Error handling returns appropriate status codes",
            "Authentication/authorization works correctly",
        ],
        TaskType::Database => &[
            "Migration runs successfully",
            "Rollback works without data loss",
            "Query performance acceptable",
        ],
        TaskType::Feature | TaskType::BugFix | TaskType::Refactor | TaskType::Config => &[],
    }
}

/// Baseline, then type-specific, then keyword-triggered criteria.
#[must_use]
pub fn success_criteria(task_type: TaskType, description: &str) -> Vec<String> {
    let injected = KEYWORD_CRITERIA
        .iter()
        .filter(|rule| rule.task_type == task_type)
        .filter(|rule| rule.keywords.iter().any(|k| description.contains(k)))
        .flat_map(|rule| rule.criteria.iter());

    BASELINE_CRITERIA
        .iter()
        .chain(type_criteria(task_type))
        .chain(injected)
        .map(|c| (*c).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_comes_first_for_every_type() {
        let criteria = success_criteria(TaskType::Refactor, "tidy up");
        assert_eq!(criteria, BASELINE_CRITERIA);
    }

    #[test]
    fn dashboard_description_injects_layout_criteria_for_ui_changes() {
        let criteria = success_criteria(TaskType::UiChange, "Widen the Executive dashboard layout");
        assert_eq!(criteria.len(), 8);
        assert_eq!(criteria[6], "Dashboard uses >95% of viewport width");
        assert_eq!(criteria[7], "Edge padding between 8-24px");
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        let criteria = success_criteria(TaskType::UiChange, "Dashboard layout");
        assert_eq!(criteria.len(), 6);
        assert!(!criteria.iter().any(|c| c.contains("viewport width")));
    }

    #[test]
    fn keyword_criteria_are_scoped_to_their_task_type() {
        let criteria = success_criteria(TaskType::Api, "dashboard endpoint");
        assert!(!criteria.iter().any(|c| c.contains("viewport")));
        assert!(criteria.contains(&"API returns correct response format".to_string()));
    }
}
