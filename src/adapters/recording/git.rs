//! Recording adapter for the `GitRepo` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{DiffRange, GitRepo};

/// Records git interactions while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn GitRepo>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGitRepo {
    /// Creates a new recording git repo wrapping the given implementation.
    pub fn new(inner: Box<dyn GitRepo>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RangeInput {
    range: DiffRange,
}

#[derive(Serialize)]
struct StatusInput<'a> {
    range: DiffRange,
    path: &'a str,
}

impl GitRepo for RecordingGitRepo {
    fn changed_files(
        &self,
        range: DiffRange,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.changed_files(range);
        record_result(&self.recorder, "git", "changed_files", &RangeInput { range }, &result);
        result
    }

    fn change_status(
        &self,
        range: DiffRange,
        path: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.change_status(range, path);
        let input = StatusInput { range, path };
        record_result(&self.recorder, "git", "change_status", &input, &result);
        result
    }
}
