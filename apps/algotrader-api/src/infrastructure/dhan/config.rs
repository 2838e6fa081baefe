//! DhanHQ adapter configuration.

use std::time::Duration;

use crate::domain::IndexInstrument;
use crate::infrastructure::config::Secret;

/// Bound on a single market-feed call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Configuration for the DhanHQ market-feed client.
#[derive(Debug, Clone)]
pub struct DhanConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Sandbox bearer token.
    pub access_token: Secret,
    /// Index to quote.
    pub instrument: IndexInstrument,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl DhanConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(base_url: impl Into<String>, access_token: Secret) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
            instrument: IndexInstrument::Sensex,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Market-feed indices endpoint.
    #[must_use]
    pub fn indices_url(&self) -> String {
        format!("{}/market-feed/indices", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DhanConfig::new("https://api-sandbox.dhan.co/", Secret::new("t".into()));
        assert_eq!(config.timeout, Duration::from_secs(4));
        assert_eq!(config.instrument, IndexInstrument::Sensex);
        assert_eq!(
            config.indices_url(),
            "https://api-sandbox.dhan.co/market-feed/indices"
        );
    }

    #[test]
    fn with_timeout() {
        let config = DhanConfig::new("http://x", Secret::new("t".into()))
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
