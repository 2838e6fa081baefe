//! DhanHQ market-feed client.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::application::ports::{IndexPricePort, UpstreamError, UpstreamProvider};
use crate::domain::{PriceQuote, extract_price};
use crate::infrastructure::metrics;
use crate::infrastructure::upstream::{
    ClientBuildError, body_preview, build_http_client, classify_transport_error,
};

use super::config::DhanConfig;

/// DhanHQ market-feed adapter.
///
/// One outbound GET per call, no retries, no caching.
#[derive(Debug, Clone)]
pub struct DhanHqClient {
    client: Client,
    config: DhanConfig,
}

impl DhanHqClient {
    /// Create a new client from config.
    pub fn new(config: DhanConfig) -> Result<Self, ClientBuildError> {
        let client = build_http_client(config.timeout)?;
        Ok(Self { client, config })
    }

    async fn fetch_price(&self) -> Result<f64, UpstreamError> {
        let url = self.config.indices_url();
        let index = self.config.instrument.feed_id();

        tracing::debug!(%url, index, "Fetching index price from DhanHQ");

        let response = self
            .client
            .get(&url)
            .query(&[("index", index)])
            .bearer_auth(self.config.access_token.expose())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if status != StatusCode::OK {
            tracing::error!(status = status.as_u16(), "DhanHQ returned non-success status");
            tracing::debug!(body = body_preview(&body), "DhanHQ error body");
            return Err(UpstreamError::status(status.as_u16()));
        }

        let payload: Value = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::unparseable(format!("invalid JSON: {e}")))?;

        extract_price(&payload).map_err(|e| {
            tracing::error!(error = %e, "Could not extract price from DhanHQ response");
            tracing::debug!(body = body_preview(&body), "DhanHQ response body");
            UpstreamError::unparseable(e.to_string())
        })
    }
}

#[async_trait]
impl IndexPricePort for DhanHqClient {
    async fn fetch_index_price(&self) -> Result<PriceQuote, UpstreamError> {
        let started = Instant::now();
        let result = self.fetch_price().await.map(PriceQuote::now);

        metrics::record_upstream_call(
            UpstreamProvider::DhanHq,
            result.as_ref().err().map(UpstreamError::kind),
            started.elapsed(),
        );

        result
    }
}
