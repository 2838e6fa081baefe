//! HTTP response types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{PriceQuote, TokenExchangeResult};

pub use crate::error::ApiErrorResponse;

/// Service name reported by the banner and health endpoints.
pub const SERVICE_NAME: &str = "AlgoTrader API";

/// Response for `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    /// Running banner.
    pub status: String,
    /// Time of the response.
    pub timestamp: DateTime<Utc>,
    /// Service version.
    pub version: String,
    /// Endpoint catalog path.
    pub docs: &'static str,
    /// Health check path.
    pub health: &'static str,
    /// Index price path.
    pub sensex: &'static str,
    /// Token exchange path.
    pub upstox_callback: &'static str,
}

impl RootResponse {
    /// Banner stamped with the current time.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            status: format!("{SERVICE_NAME} is running"),
            timestamp: Utc::now(),
            version: version.into(),
            docs: "/docs",
            health: "/api/health",
            sensex: "/api/dhanhq/sensex-price",
            upstox_callback: "/api/upstox/callback",
        }
    }
}

/// Response for `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "OK".
    pub status: &'static str,
    /// Time of the response.
    pub timestamp: DateTime<Utc>,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: String,
}

impl HealthResponse {
    /// Healthy response stamped with the current time.
    #[must_use]
    pub fn ok(version: impl Into<String>) -> Self {
        Self {
            status: "OK",
            timestamp: Utc::now(),
            service: SERVICE_NAME,
            version: version.into(),
        }
    }
}

/// One entry of the endpoint catalog.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EndpointDoc {
    /// HTTP method.
    pub method: &'static str,
    /// Route path.
    pub path: &'static str,
    /// What the endpoint does.
    pub description: &'static str,
}

/// Every route served.
pub const ENDPOINTS: [EndpointDoc; 6] = [
    EndpointDoc {
        method: "GET",
        path: "/",
        description: "Service banner with links",
    },
    EndpointDoc {
        method: "GET",
        path: "/docs",
        description: "This endpoint catalog",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/health",
        description: "Liveness check",
    },
    EndpointDoc {
        method: "GET",
        path: "/metrics",
        description: "Prometheus metrics",
    },
    EndpointDoc {
        method: "GET",
        path: "/api/dhanhq/sensex-price",
        description: "Latest SENSEX price from DhanHQ",
    },
    EndpointDoc {
        method: "POST",
        path: "/api/upstox/callback",
        description: "Exchange an Upstox authorization code for an access token",
    },
];

/// Response for `GET /docs`.
#[derive(Debug, Clone, Serialize)]
pub struct DocsResponse {
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: String,
    /// Route catalog.
    pub endpoints: &'static [EndpointDoc],
}

/// Response for `GET /api/dhanhq/sensex-price`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SensexPriceResponse {
    /// Last traded price.
    pub sensex: f64,
    /// When the price was fetched.
    pub timestamp: DateTime<Utc>,
}

impl From<PriceQuote> for SensexPriceResponse {
    fn from(quote: PriceQuote) -> Self {
        Self {
            sensex: quote.price,
            timestamp: quote.fetched_at,
        }
    }
}

/// Response for `POST /api/upstox/callback`.
#[derive(Debug, Clone, Serialize)]
pub struct UpstoxCallbackResponse {
    /// Always `true`.
    pub success: bool,
    /// Upstream token payload, verbatim.
    pub token_data: TokenExchangeResult,
    /// Time of the exchange.
    pub timestamp: DateTime<Utc>,
}

impl From<TokenExchangeResult> for UpstoxCallbackResponse {
    fn from(token_data: TokenExchangeResult) -> Self {
        Self {
            success: true,
            token_data,
            timestamp: Utc::now(),
        }
    }
}
