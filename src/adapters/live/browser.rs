//! Live adapter for the `BrowserDriver` port speaking the W3C WebDriver protocol.
//!
//! Works against `chromedriver`, `geckodriver` or a Selenium endpoint. Screenshots
//! cover the full page: chromedriver through its CDP bridge
//! (`Page.captureScreenshot` with `captureBeyondViewport`), geckodriver through
//! its `moz/screenshot/full` extension.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use tokio::runtime::Runtime;

use super::current_thread_runtime;
use crate::config::BrowserKind;
use crate::ports::browser::{BrowserDriver, BrowserSession, LayoutMetrics};

const LAYOUT_SCRIPT: &str = r"
const main = document.querySelector(arguments[0]);
if (!main) { return null; }
const rect = main.getBoundingClientRect();
const style = window.getComputedStyle(main);
return {
  mainWidth: rect.width,
  viewportWidth: window.innerWidth,
  viewportUsage: (rect.width / window.innerWidth) * 100,
  paddingLeft: parseFloat(style.paddingLeft) || 0,
  paddingRight: parseFloat(style.paddingRight) || 0
};
";

/// Starts sessions on a WebDriver server.
pub struct WebDriverBrowser {
    endpoint: String,
    kind: BrowserKind,
    timeout: Duration,
}

impl WebDriverBrowser {
    /// Creates a driver for the WebDriver server at `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, kind: BrowserKind, timeout: Duration) -> Self {
        Self { endpoint: endpoint.into().trim_end_matches('/').to_string(), kind, timeout }
    }

    fn capabilities(&self) -> Value {
        match self.kind {
            BrowserKind::Chrome => json!({
                "capabilities": { "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": { "args": ["--headless=new", "--hide-scrollbars"] }
                }}
            }),
            BrowserKind::Firefox => json!({
                "capabilities": { "alwaysMatch": {
                    "browserName": "firefox",
                    "moz:firefoxOptions": { "args": ["-headless"] }
                }}
            }),
        }
    }
}

impl BrowserDriver for WebDriverBrowser {
    fn launch(&self) -> Result<Box<dyn BrowserSession>, Box<dyn std::error::Error + Send + Sync>> {
        let transport = Arc::new(Transport {
            client: Client::builder().timeout(self.timeout).build()?,
            runtime: current_thread_runtime()?,
        });
        let value = transport.call(
            Method::POST,
            &format!("{}/session", self.endpoint),
            Some(self.capabilities()),
        )?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or("WebDriver new-session response has no sessionId")?
            .to_string();
        tracing::debug!(session_id, endpoint = %self.endpoint, "browser session started");
        Ok(Box::new(WebDriverSession {
            base: format!("{}/session/{session_id}", self.endpoint),
            kind: self.kind,
            transport,
        }))
    }
}

/// Full-page screenshot command for `kind`: method, path under the session,
/// and body.
fn screenshot_command(kind: BrowserKind) -> (Method, &'static str, Option<Value>) {
    match kind {
        BrowserKind::Chrome => (
            Method::POST,
            "goog/cdp/execute",
            Some(json!({
                "cmd": "Page.captureScreenshot",
                "params": { "format": "png", "captureBeyondViewport": true }
            })),
        ),
        BrowserKind::Firefox => (Method::GET, "moz/screenshot/full", None),
    }
}

/// Base64 image data from a screenshot reply: a bare string (geckodriver) or
/// a CDP result object with a `data` member (chromedriver).
fn screenshot_data(value: &Value) -> Option<&str> {
    value.as_str().or_else(|| value.get("data").and_then(Value::as_str))
}

struct Transport {
    client: Client,
    runtime: Runtime,
}

impl Transport {
    /// Sends one WebDriver command and unwraps the `value` member of the reply.
    fn call(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        self.runtime.block_on(async {
            let mut request = self.client.request(method, url);
            if let Some(body) = body {
                request = request.json(&body);
            }
            let response = request.send().await?;
            let status = response.status();
            let payload: Value = response.json().await?;
            let value = payload.get("value").cloned().unwrap_or(Value::Null);
            if !status.is_success() {
                let error = value.get("error").and_then(Value::as_str).unwrap_or("unknown error");
                let message = value.get("message").and_then(Value::as_str).unwrap_or_default();
                return Err(format!("WebDriver {error} ({}): {message}", status.as_u16()).into());
            }
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(value)
        })
    }
}

struct WebDriverSession {
    base: String,
    kind: BrowserKind,
    transport: Arc<Transport>,
}

impl BrowserSession for WebDriverSession {
    fn set_viewport(
        &self,
        width: u32,
        height: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.transport.call(
            Method::POST,
            &format!("{}/window/rect", self.base),
            Some(json!({ "width": width, "height": height })),
        )?;
        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.transport.call(
            Method::POST,
            &format!("{}/url", self.base),
            Some(json!({ "url": url })),
        )?;
        Ok(())
    }

    fn screenshot(&self) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        let (method, path, body) = screenshot_command(self.kind);
        let value = self.transport.call(method, &format!("{}/{path}", self.base), body)?;
        let encoded =
            screenshot_data(&value).ok_or("WebDriver screenshot response has no image data")?;
        Ok(base64::engine::general_purpose::STANDARD.decode(encoded)?)
    }

    fn layout_metrics(
        &self,
        selector: &str,
    ) -> Result<Option<LayoutMetrics>, Box<dyn std::error::Error + Send + Sync>> {
        let value = self.transport.call(
            Method::POST,
            &format!("{}/execute/sync", self.base),
            Some(json!({ "script": LAYOUT_SCRIPT, "args": [selector] })),
        )?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    fn close(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.transport.call(Method::DELETE, &self.base, None)?;
        Ok(())
    }
}
