//! Upstox adapter configuration.

use std::time::Duration;

use crate::infrastructure::config::Secret;

/// Bound on a single token exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Upstox OAuth client.
#[derive(Debug, Clone)]
pub struct UpstoxConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// App secret sent as `client_secret`.
    pub client_secret: Secret,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl UpstoxConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(base_url: impl Into<String>, client_secret: Secret) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_secret,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// OAuth token endpoint.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.base_url)
    }
}
