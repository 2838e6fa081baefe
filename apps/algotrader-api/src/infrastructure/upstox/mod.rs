//! Upstox OAuth Adapter
//!
//! Trades an authorization code for an access token at the Upstox
//! `/oauth/token` endpoint.

mod client;
mod config;

pub use client::UpstoxClient;
pub use config::{DEFAULT_TIMEOUT, UpstoxConfig};
