//! Replaying adapter for the `BrowserDriver` port.

use std::sync::{Arc, Mutex};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{BrowserDriver, BrowserSession, LayoutMetrics};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Replays recorded browser sessions from a cassette.
///
/// Launched sessions share the driver's replayer, so interactions are
/// consumed in the order the recording made them.
pub struct ReplayingBrowserDriver {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingBrowserDriver {
    /// Creates a new replaying browser driver from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Arc::new(Mutex::new(replayer)) }
    }
}

impl BrowserDriver for ReplayingBrowserDriver {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, BoxError> {
        replay_result::<()>(next_output(&self.replayer, "browser", "launch"), "browser::launch")?;
        Ok(Box::new(ReplayingBrowserSession { replayer: Arc::clone(&self.replayer) }))
    }
}

struct ReplayingBrowserSession {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl BrowserSession for ReplayingBrowserSession {
    fn set_viewport(&self, _width: u32, _height: u32) -> Result<(), BoxError> {
        replay_result(next_output(&self.replayer, "browser", "set_viewport"), "browser::set_viewport")
    }

    fn navigate(&self, _url: &str) -> Result<(), BoxError> {
        replay_result(next_output(&self.replayer, "browser", "navigate"), "browser::navigate")
    }

    fn screenshot(&self) -> Result<Vec<u8>, BoxError> {
        let encoded: String =
            replay_result(next_output(&self.replayer, "browser", "screenshot"), "browser::screenshot")?;
        Ok(STANDARD.decode(encoded)?)
    }

    fn layout_metrics(&self, _selector: &str) -> Result<Option<LayoutMetrics>, BoxError> {
        replay_result(
            next_output(&self.replayer, "browser", "layout_metrics"),
            "browser::layout_metrics",
        )
    }

    fn close(&self) -> Result<(), BoxError> {
        replay_result(next_output(&self.replayer, "browser", "close"), "browser::close")
    }
}
