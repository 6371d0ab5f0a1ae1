//! Replaying adapter for the `HttpProbe` port.

use std::sync::Mutex;

use super::{next_output, replay_value};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{HttpProbe, ProbeError};

/// Replays recorded probe outcomes, including typed timeouts and network errors.
pub struct ReplayingHttpProbe {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingHttpProbe {
    /// Creates a new replaying probe from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl HttpProbe for ReplayingHttpProbe {
    fn get(&self, _url: &str) -> Result<u16, ProbeError> {
        replay_value(next_output(&self.replayer, "http", "get"), "http::get")
    }
}
