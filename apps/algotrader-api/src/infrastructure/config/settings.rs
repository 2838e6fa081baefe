//! Proxy Configuration Settings
//!
//! Loaded once at startup. A missing required variable aborts the process
//! before the listener is bound.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default DhanHQ sandbox base URL.
pub const DEFAULT_DHAN_API_URL: &str = "https://api-sandbox.dhan.co";

/// Default Upstox API base URL.
pub const DEFAULT_UPSTOX_API_URL: &str = "https://api.upstox.com";

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 8000;

/// A credential whose value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Borrow the raw value for use in an outbound request.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address to bind.
    pub bind_address: IpAddr,
    /// Port to bind.
    pub port: u16,
}

impl ServerSettings {
    /// Socket address to listen on.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

/// DhanHQ market-feed settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhanSettings {
    /// Base URL without trailing slash.
    pub api_url: String,
    /// Sandbox bearer token.
    pub token: Secret,
}

/// Upstox OAuth settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstoxSettings {
    /// Base URL without trailing slash.
    pub api_url: String,
    /// OAuth client secret.
    pub api_secret: Secret,
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerSettings,
    /// Market-feed provider.
    pub dhan: DhanSettings,
    /// OAuth provider.
    pub upstox: UpstoxSettings,
    /// Whether the Prometheus recorder is installed.
    pub metrics_enabled: bool,
}

impl AppConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or empty, or if a
    /// provided value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dhan_token = required(&lookup, "DHAN_SANDBOX_TOKEN")?;
        let upstox_secret = required(&lookup, "UPSTOX_API_SECRET")?;

        let dhan_url = optional(&lookup, "DHAN_API_URL", DEFAULT_DHAN_API_URL);
        let upstox_url = optional(&lookup, "UPSTOX_API_URL", DEFAULT_UPSTOX_API_URL);

        let port = match lookup("PORT").filter(|v| !v.is_empty()) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let bind_address = match lookup("BIND_ADDRESS").filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "BIND_ADDRESS".to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => ServerSettings::default().bind_address,
        };

        let metrics_enabled = lookup("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self {
            server: ServerSettings { bind_address, port },
            dhan: DhanSettings {
                api_url: trim_base_url(&dhan_url),
                token: Secret::new(dhan_token),
            },
            upstox: UpstoxSettings {
                api_url: trim_base_url(&upstox_url),
                api_secret: Secret::new(upstox_secret),
            },
            metrics_enabled,
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable could not be parsed.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(value)
}

fn optional<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
