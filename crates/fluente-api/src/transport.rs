// HTTP transport construction
//
// Builds the shared `reqwest::Client` from a small config struct so the
// CLI and TUI configure timeouts in one place.

use std::time::Duration;

use crate::error::Error;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("fluente/", env!("CARGO_PKG_VERSION"));

/// Transport-level settings for the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Timeout for establishing the TCP connection.
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Transport with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Build the `reqwest::Client` for this configuration.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()?;
        Ok(client)
    }
}
