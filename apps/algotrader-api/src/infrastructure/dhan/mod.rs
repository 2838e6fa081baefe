//! DhanHQ Market Feed Adapter
//!
//! Implements `IndexPricePort` against the DhanHQ market-feed API:
//! - Bearer-token authentication
//! - 4 second bound on the whole call
//! - Shape-tolerant price extraction

mod client;
mod config;

pub use client::DhanHqClient;
pub use config::{DEFAULT_TIMEOUT, DhanConfig};
