#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! AlgoTrader API - Broker Proxy
//!
//! A small HTTP service that forwards two kinds of requests to Indian
//! brokerage APIs and normalizes what comes back.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: price extraction and OAuth exchange types
//!   - `market_data`: price quotes and the quoted index
//!   - `price_extraction`: ordered synonym lookup over loosely-typed JSON
//!   - `oauth`: validated exchange requests, verbatim token payloads
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: upstream provider interfaces and categorized failures
//!   - `use_cases`: one upstream call per inbound request
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `dhan`: DhanHQ market-feed client
//!   - `upstox`: Upstox OAuth token client
//!   - `http`: axum router, handlers and listener
//!   - `config`: environment configuration
//!   - `telemetry` / `metrics`: tracing and Prometheus
//!
//! # Data Flow
//!
//! ```text
//! GET  /api/dhanhq/sensex-price ──► FetchIndexPrice ──► DhanHQ  /market-feed/indices
//! POST /api/upstox/callback     ──► ExchangeToken   ──► Upstox  /oauth/token
//! ```
//!
//! Every upstream failure surfaces as 502 with a fixed detail message.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Normalization rules with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// HTTP error codes and the error envelope.
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::{PriceQuote, TokenExchangeRequest, TokenExchangeResult, extract_price};

// Application
pub use application::ports::{
    IndexPricePort, TokenExchangePort, UpstreamError, UpstreamFailureKind, UpstreamProvider,
};
pub use application::use_cases::{ExchangeTokenUseCase, FetchIndexPriceUseCase};

// Errors
pub use error::{ApiError, ErrorCode};

// Infrastructure
pub use infrastructure::config::{AppConfig, ConfigError};
pub use infrastructure::dhan::{DhanConfig, DhanHqClient};
pub use infrastructure::http::{AppState, HttpServer, create_router};
pub use infrastructure::metrics::init_metrics;
pub use infrastructure::upstox::{UpstoxClient, UpstoxConfig};
