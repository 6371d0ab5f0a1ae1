//! Recording adapter for the `BrowserDriver` port.
//!
//! Sessions launched through the driver share its recorder, so a whole
//! visual run lands in one `browser` cassette.

use std::sync::{Arc, Mutex};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{BrowserDriver, BrowserSession, LayoutMetrics};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Records browser launches while delegating to an inner driver.
pub struct RecordingBrowserDriver {
    inner: Box<dyn BrowserDriver>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingBrowserDriver {
    /// Creates a new recording driver wrapping the given implementation.
    pub fn new(inner: Box<dyn BrowserDriver>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl BrowserDriver for RecordingBrowserDriver {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, BoxError> {
        let result = self.inner.launch();
        let outcome: Result<(), &BoxError> = result.as_ref().map(|_| ());
        record_result(&self.recorder, "browser", "launch", &(), &outcome);
        let session = result?;
        Ok(Box::new(RecordingBrowserSession { inner: session, recorder: Arc::clone(&self.recorder) }))
    }
}

struct RecordingBrowserSession {
    inner: Box<dyn BrowserSession>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

#[derive(Serialize)]
struct ViewportInput {
    width: u32,
    height: u32,
}

#[derive(Serialize)]
struct UrlInput<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct SelectorInput<'a> {
    selector: &'a str,
}

impl BrowserSession for RecordingBrowserSession {
    fn set_viewport(&self, width: u32, height: u32) -> Result<(), BoxError> {
        let result = self.inner.set_viewport(width, height);
        let input = ViewportInput { width, height };
        record_result(&self.recorder, "browser", "set_viewport", &input, &result);
        result
    }

    fn navigate(&self, url: &str) -> Result<(), BoxError> {
        let result = self.inner.navigate(url);
        record_result(&self.recorder, "browser", "navigate", &UrlInput { url }, &result);
        result
    }

    fn screenshot(&self) -> Result<Vec<u8>, BoxError> {
        let result = self.inner.screenshot();
        let encoded: Result<String, &BoxError> = result.as_ref().map(|png| STANDARD.encode(png));
        record_result(&self.recorder, "browser", "screenshot", &(), &encoded);
        result
    }

    fn layout_metrics(&self, selector: &str) -> Result<Option<LayoutMetrics>, BoxError> {
        let result = self.inner.layout_metrics(selector);
        let input = SelectorInput { selector };
        record_result(&self.recorder, "browser", "layout_metrics", &input, &result);
        result
    }

    fn close(&self) -> Result<(), BoxError> {
        let result = self.inner.close();
        record_result(&self.recorder, "browser", "close", &(), &result);
        result
    }
}
