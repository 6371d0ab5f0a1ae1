//! Headless browser port for visual verification.

use serde::{Deserialize, Serialize};

/// Geometry of a page's primary content container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMetrics {
    /// Rendered width of the container in CSS pixels.
    pub main_width: f64,
    /// Width of the browser viewport in CSS pixels.
    pub viewport_width: f64,
    /// `main_width / viewport_width` as a percentage.
    pub viewport_usage: f64,
    /// Computed left padding of the container in pixels.
    pub padding_left: f64,
    /// Computed right padding of the container in pixels.
    pub padding_right: f64,
}

/// Launches headless browser sessions.
pub trait BrowserDriver: Send + Sync {
    /// Starts a new headless session.
    ///
    /// # Errors
    ///
    /// Returns an error if no browser could be started.
    fn launch(&self) -> Result<Box<dyn BrowserSession>, Box<dyn std::error::Error + Send + Sync>>;
}

/// One live headless browser session.
///
/// Sessions must be closed explicitly; callers hold them through a guard
/// that closes on drop.
pub trait BrowserSession {
    /// Resizes the viewport.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser rejects the resize.
    fn set_viewport(
        &self,
        width: u32,
        height: u32,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Navigates to `url` and waits for the page load to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if navigation fails.
    fn navigate(&self, url: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Captures a full-page PNG screenshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the screenshot cannot be taken.
    fn screenshot(&self) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;

    /// Measures the element matching `selector`, or `None` if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the measuring script cannot be evaluated.
    fn layout_metrics(
        &self,
        selector: &str,
    ) -> Result<Option<LayoutMetrics>, Box<dyn std::error::Error + Send + Sync>>;

    /// Ends the session and releases the browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser did not acknowledge the shutdown.
    fn close(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
