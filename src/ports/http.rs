//! HTTP probe port for live endpoint checks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an HTTP probe produced no status code.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// The request could not be sent or no response arrived.
    #[error("network error: {0}")]
    Network(String),
}

/// Issues HTTP GET requests and reports the response status.
pub trait HttpProbe: Send + Sync {
    /// Sends a GET to `url` and returns the HTTP status code.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Timeout`] or [`ProbeError::Network`] when no
    /// response status was obtained.
    fn get(&self, url: &str) -> Result<u16, ProbeError>;
}
