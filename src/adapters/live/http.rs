//! Live adapter for the `HttpProbe` port using `reqwest`.

use std::time::Duration;

use reqwest::Client;
use tokio::runtime::Runtime;

use super::current_thread_runtime;
use crate::ports::http::{HttpProbe, ProbeError};

/// Live HTTP probe that blocks on a private single-threaded runtime.
pub struct LiveHttpProbe {
    client: Client,
    runtime: Runtime,
}

impl LiveHttpProbe {
    /// Creates a probe whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or its runtime cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, runtime: current_thread_runtime()? })
    }
}

impl HttpProbe for LiveHttpProbe {
    fn get(&self, url: &str) -> Result<u16, ProbeError> {
        tracing::debug!(url, "probing endpoint");
        self.runtime.block_on(async {
            match self.client.get(url).send().await {
                Ok(response) => Ok(response.status().as_u16()),
                Err(e) if e.is_timeout() => Err(ProbeError::Timeout(e.to_string())),
                Err(e) => Err(ProbeError::Network(e.to_string())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_host_is_a_network_error() {
        let probe = LiveHttpProbe::new(Duration::from_secs(2)).unwrap();
        // Port 9 (discard) on localhost is closed in test environments.
        let result = probe.get("http://127.0.0.1:9/api/health");
        assert!(matches!(result, Err(ProbeError::Network(_) | ProbeError::Timeout(_))));
    }
}
