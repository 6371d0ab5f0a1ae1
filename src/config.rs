//! Run configuration: where things live and which commands to run.
//!
//! Resolution order is `--config <path>`, then `attest.yaml` in the working
//! directory, then built-in defaults. `ATTEST_*` environment variables
//! override individual fields afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "attest.yaml";

/// Which browser the WebDriver endpoint drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserKind {
    /// Chrome / Chromium via chromedriver.
    #[default]
    Chrome,
    /// Firefox via geckodriver.
    Firefox,
}

/// Commands run by the shell-driven checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Static type check.
    pub typecheck: String,
    /// Linter.
    pub lint: String,
    /// Production build.
    pub build: String,
    /// Unit-test runner; related test file paths are appended.
    pub test: String,
    /// Bundle-size analysis.
    pub analyze: String,
    /// Dependency audit, including its minimum severity floor.
    pub audit: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            typecheck: "npm run typecheck --prefix frontend".to_string(),
            lint: "npm run lint --prefix frontend".to_string(),
            build: "npm run build --prefix frontend".to_string(),
            test: "npm test --".to_string(),
            analyze: "npm run analyze --prefix frontend".to_string(),
            audit: "npm audit --audit-level=high".to_string(),
        }
    }
}

/// Everything a manifest build or verification run needs to know about its
/// surroundings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Repository root; git, shell commands and test discovery run from here.
    pub project_root: PathBuf,
    /// Root of the manifest and report store.
    pub store_root: PathBuf,
    /// Directory receiving per-task screenshot folders.
    pub screenshot_dir: PathBuf,
    /// Origin of the running application under test.
    pub base_url: String,
    /// WebDriver server used for visual checks.
    pub webdriver_url: String,
    /// Browser requested from the WebDriver server.
    pub browser: BrowserKind,
    /// Timeout applied to HTTP probes and WebDriver commands.
    pub http_timeout_secs: u64,
    /// Shell commands for the command-driven checks.
    pub commands: CommandConfig,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            store_root: PathBuf::from(".verification"),
            screenshot_dir: PathBuf::from("tests/screenshots"),
            base_url: "http://localhost:3000".to_string(),
            webdriver_url: "http://localhost:4444".to_string(),
            browser: BrowserKind::default(),
            http_timeout_secs: 30,
            commands: CommandConfig::default(),
        }
    }
}

impl VerifyConfig {
    /// Resolves the configuration for this run.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read when present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a config file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parses a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config { path: path.to_path_buf(), reason: e.to_string() })
    }

    /// Applies `ATTEST_BASE_URL`, `ATTEST_WEBDRIVER_URL` and `ATTEST_STORE`
    /// overrides looked up through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("ATTEST_BASE_URL") {
            self.base_url = url;
        }
        if let Some(url) = var("ATTEST_WEBDRIVER_URL") {
            self.webdriver_url = url;
        }
        if let Some(store) = var("ATTEST_STORE") {
            self.store_root = PathBuf::from(store);
        }
    }

    /// Joins `path` under the base URL, avoiding a doubled slash.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}
