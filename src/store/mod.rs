//! Verification store: persistence for manifests and reports.
//!
//! All I/O goes through the `FileSystem` port. Layout:
//!
//! ```text
//! <root>/
//!   ├── manifests/<task_id>.json
//!   └── reports/<task_id>-report.json
//!               <task_id>-report.md
//! ```

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::error::Error;
use crate::manifest::Manifest;
use crate::report::{markdown, Report};

const REPORT_SUFFIX: &str = "-report.json";

/// Reads and writes manifests and reports under a store root.
pub struct VerificationStore<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> VerificationStore<'a> {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, root: root.to_path_buf() }
    }

    /// Path of the manifest for `task_id`.
    #[must_use]
    pub fn manifest_path(&self, task_id: &str) -> PathBuf {
        self.root.join("manifests").join(format!("{task_id}.json"))
    }

    /// Path of the JSON report for `task_id`.
    #[must_use]
    pub fn report_path(&self, task_id: &str) -> PathBuf {
        self.root.join("reports").join(format!("{task_id}{REPORT_SUFFIX}"))
    }

    /// Saves `manifest` at its default path and returns that path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if serialization or the write fails.
    pub fn save_manifest(&self, manifest: &Manifest) -> Result<PathBuf, Error> {
        let path = self.manifest_path(&manifest.task_id);
        self.save_manifest_to(manifest, &path)?;
        Ok(path)
    }

    /// Saves `manifest` as pretty JSON at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if serialization or the write fails.
    pub fn save_manifest_to(&self, manifest: &Manifest, path: &Path) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(manifest).map_err(|e| store_error(path, e))?;
        self.ctx.fs.write(path, &json).map_err(|e| store_error(path, e))?;
        tracing::info!(task_id = %manifest.task_id, path = %path.display(), "saved manifest");
        Ok(())
    }

    /// Loads the manifest stored for `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestRead`] or [`Error::ManifestParse`].
    pub fn load_manifest(&self, task_id: &str) -> Result<Manifest, Error> {
        Manifest::read(&*self.ctx.fs, &self.manifest_path(task_id))
    }

    /// Saves `report` at its default path and returns the JSON path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if either write fails.
    pub fn save_report(&self, report: &Report) -> Result<PathBuf, Error> {
        let path = self.report_path(&report.task.id);
        self.save_report_to(report, &path)?;
        Ok(path)
    }

    /// Saves `report` as JSON at `json_path` and its Markdown rendering next
    /// to it with an `.md` extension. Existing files are overwritten.
    ///
    /// Both documents are rendered before either file is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if serialization or either write fails.
    pub fn save_report_to(&self, report: &Report, json_path: &Path) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(report).map_err(|e| store_error(json_path, e))?;
        let md = markdown::render(report);
        let md_path = json_path.with_extension("md");

        self.ctx.fs.write(json_path, &json).map_err(|e| store_error(json_path, e))?;
        self.ctx.fs.write(&md_path, &md).map_err(|e| store_error(&md_path, e))?;

        tracing::info!(
            task_id = %report.task.id,
            path = %json_path.display(),
            recommendation = %report.recommendation,
            "saved report"
        );
        Ok(())
    }

    /// Lists task ids that have a stored report, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the reports directory cannot be listed.
    pub fn list_reports(&self) -> Result<Vec<String>, Error> {
        let dir = self.root.join("reports");
        if !self.ctx.fs.exists(&dir) {
            return Ok(Vec::new());
        }
        let entries = self.ctx.fs.list_dir(&dir).map_err(|e| store_error(&dir, e))?;
        let mut ids: Vec<String> = entries
            .into_iter()
            .filter_map(|name| name.strip_suffix(REPORT_SUFFIX).map(String::from))
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Loads the JSON report stored for `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the file cannot be read or parsed.
    pub fn load_report(&self, task_id: &str) -> Result<Report, Error> {
        let path = self.report_path(task_id);
        let content = self.ctx.fs.read_to_string(&path).map_err(|e| store_error(&path, e))?;
        serde_json::from_str(&content).map_err(|e| store_error(&path, e))
    }

    /// Loads the Markdown report for `task_id`, or `None` if none exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the file exists but cannot be read.
    pub fn load_markdown(&self, task_id: &str) -> Result<Option<String>, Error> {
        let path = self.report_path(task_id).with_extension("md");
        if !self.ctx.fs.exists(&path) {
            return Ok(None);
        }
        self.ctx.fs.read_to_string(&path).map(Some).map_err(|e| store_error(&path, e))
    }
}

fn store_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Store { path: path.to_path_buf(), reason: err.to_string() }
}
