//! Recording adapter for the `HttpProbe` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{HttpProbe, ProbeError};

/// Records HTTP probes while delegating to an inner implementation.
///
/// The typed [`ProbeError`] is stored as-is so replay can tell a timeout
/// from a network failure.
pub struct RecordingHttpProbe {
    inner: Box<dyn HttpProbe>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHttpProbe {
    /// Creates a new recording probe wrapping the given implementation.
    pub fn new(inner: Box<dyn HttpProbe>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct UrlInput<'a> {
    url: &'a str,
}

impl HttpProbe for RecordingHttpProbe {
    fn get(&self, url: &str) -> Result<u16, ProbeError> {
        let result = self.inner.get(url);
        record_interaction(&self.recorder, "http", "get", &UrlInput { url }, &result);
        result
    }
}
