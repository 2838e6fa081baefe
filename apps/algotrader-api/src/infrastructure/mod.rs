//! Infrastructure layer - adapters and external integrations.

pub mod config;
pub mod dhan;
pub mod http;
pub mod metrics;
pub mod telemetry;
pub mod upstox;
pub mod upstream;
