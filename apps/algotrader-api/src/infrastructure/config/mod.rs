//! Configuration Module
//!
//! Environment-sourced settings for the proxy, validated at startup.

mod settings;

pub use settings::{
    AppConfig, ConfigError, DEFAULT_DHAN_API_URL, DEFAULT_PORT, DEFAULT_UPSTOX_API_URL,
    DhanSettings, Secret, ServerSettings, UpstoxSettings,
};
