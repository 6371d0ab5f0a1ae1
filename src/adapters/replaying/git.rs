//! Replaying adapter for the `GitRepo` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{DiffRange, GitRepo};

/// Replays recorded git operations from a cassette.
pub struct ReplayingGitRepo {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingGitRepo {
    /// Creates a new replaying git repo from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl GitRepo for ReplayingGitRepo {
    fn changed_files(
        &self,
        _range: DiffRange,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        replay_result(next_output(&self.replayer, "git", "changed_files"), "git::changed_files")
    }

    fn change_status(
        &self,
        _range: DiffRange,
        _path: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        replay_result(next_output(&self.replayer, "git", "change_status"), "git::change_status")
    }
}
