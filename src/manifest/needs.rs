//! The verification-needed matrix over the six fixed categories.

use serde::{Deserialize, Serialize};

use super::classify::is_react_source;
use super::TaskType;

/// One verification domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Type-check, lint and build.
    CodeQuality,
    /// Browser-rendered screenshots and layout metrics.
    Visual,
    /// Colocated unit tests.
    Functional,
    /// Live HTTP probes of changed endpoints.
    Integration,
    /// Bundle-size analysis.
    Performance,
    /// Dependency audit.
    Security,
}

impl Category {
    /// Every category, in dispatch order.
    pub const ALL: [Self; 6] = [
        Self::CodeQuality,
        Self::Visual,
        Self::Functional,
        Self::Integration,
        Self::Performance,
        Self::Security,
    ];

    /// Snake-case name as it appears in manifests.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CodeQuality => "code_quality",
            Self::Visual => "visual",
            Self::Functional => "functional",
            Self::Integration => "integration",
            Self::Performance => "performance",
            Self::Security => "security",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which categories a run dispatches.
///
/// `code_quality` is always on, and flags can only ever be switched on:
/// there is no way to clear one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NeedsRecord")]
pub struct VerificationNeeds {
    code_quality: bool,
    visual: bool,
    functional: bool,
    integration: bool,
    performance: bool,
    security: bool,
}

/// Wire shape; missing flags read as `false`.
#[derive(Deserialize)]
struct NeedsRecord {
    #[serde(default)]
    visual: bool,
    #[serde(default)]
    functional: bool,
    #[serde(default)]
    integration: bool,
    #[serde(default)]
    performance: bool,
    #[serde(default)]
    security: bool,
}

impl From<NeedsRecord> for VerificationNeeds {
    fn from(record: NeedsRecord) -> Self {
        Self {
            code_quality: true,
            visual: record.visual,
            functional: record.functional,
            integration: record.integration,
            performance: record.performance,
            security: record.security,
        }
    }
}

impl Default for VerificationNeeds {
    fn default() -> Self {
        Self {
            code_quality: true,
            visual: false,
            functional: false,
            integration: false,
            performance: false,
            security: false,
        }
    }
}

impl VerificationNeeds {
    /// Only `code_quality` enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches a category on. Already-enabled categories stay enabled.
    pub fn enable(&mut self, category: Category) {
        *self.flag_mut(category) = true;
    }

    /// Whether `category` is dispatched.
    #[must_use]
    pub fn is_enabled(&self, category: Category) -> bool {
        match category {
            Category::CodeQuality => self.code_quality,
            Category::Visual => self.visual,
            Category::Functional => self.functional,
            Category::Integration => self.integration,
            Category::Performance => self.performance,
            Category::Security => self.security,
        }
    }

    /// Enabled categories in dispatch order.
    pub fn enabled(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.is_enabled(*c))
    }

    fn flag_mut(&mut self, category: Category) -> &mut bool {
        match category {
            Category::CodeQuality => &mut self.code_quality,
            Category::Visual => &mut self.visual,
            Category::Functional => &mut self.functional,
            Category::Integration => &mut self.integration,
            Category::Performance => &mut self.performance,
            Category::Security => &mut self.security,
        }
    }
}

/// Path substrings that switch a category on whatever the task type.
/// Matched case-sensitively, so `AuthProvider.tsx` does not hit `auth`.
const PATH_OVERRIDES: &[(&[&str], Category)] = &[
    (&["auth", "permission"], Category::Security),
    (&["query", "infinite"], Category::Performance),
];

/// Computes the matrix for a classified change set.
#[must_use]
pub fn verification_needs(task_type: TaskType, files: &[String]) -> VerificationNeeds {
    let mut needs = VerificationNeeds::new();

    let defaults: &[Category] = match task_type {
        TaskType::UiChange => &[Category::Visual, Category::Functional],
        TaskType::Api => &[Category::Functional, Category::Integration, Category::Security],
        TaskType::Database => &[Category::Integration, Category::Performance],
        TaskType::Feature => &[Category::Functional, Category::Integration],
        TaskType::BugFix | TaskType::Refactor | TaskType::Config => &[],
    };
    for category in defaults {
        needs.enable(*category);
    }
    if task_type == TaskType::Feature && files.iter().any(|f| is_react_source(f)) {
        needs.enable(Category::Visual);
    }

    for (needles, category) in PATH_OVERRIDES {
        if files.iter().any(|f| needles.iter().any(|n| f.contains(n))) {
            needs.enable(*category);
        }
    }

    needs
}
