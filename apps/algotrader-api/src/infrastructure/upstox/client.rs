//! Upstox OAuth token client.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::application::ports::{TokenExchangePort, UpstreamError, UpstreamProvider};
use crate::domain::{AUTHORIZATION_CODE_GRANT, TokenExchangeRequest, TokenExchangeResult};
use crate::infrastructure::metrics;
use crate::infrastructure::upstream::{
    ClientBuildError, body_preview, build_http_client, classify_transport_error,
};

use super::config::UpstoxConfig;

/// JSON body posted to the token endpoint.
#[derive(Serialize)]
struct TokenRequestBody<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'static str,
    code: &'a str,
    redirect_uri: &'a str,
}

/// Upstox OAuth adapter.
#[derive(Debug, Clone)]
pub struct UpstoxClient {
    client: Client,
    config: UpstoxConfig,
}

impl UpstoxClient {
    /// Create a new client from config.
    pub fn new(config: UpstoxConfig) -> Result<Self, ClientBuildError> {
        let client = build_http_client(config.timeout)?;
        Ok(Self { client, config })
    }

    async fn post_token_request(
        &self,
        request: &TokenExchangeRequest,
    ) -> Result<TokenExchangeResult, UpstreamError> {
        let body = TokenRequestBody {
            client_id: request.client_id(),
            client_secret: self.config.client_secret.expose(),
            grant_type: AUTHORIZATION_CODE_GRANT,
            code: request.code(),
            redirect_uri: request.redirect_uri(),
        };

        let response = self
            .client
            .post(self.config.token_url())
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        if status != StatusCode::OK {
            tracing::error!(status = status.as_u16(), "Upstox token endpoint returned non-success status");
            tracing::debug!(body = body_preview(&text), "Upstox error body");
            return Err(UpstreamError::status(status.as_u16()));
        }

        TokenExchangeResult::from_body(&text)
            .map_err(|e| UpstreamError::unparseable(format!("token payload is not a JSON object: {e}")))
    }
}

#[async_trait]
impl TokenExchangePort for UpstoxClient {
    async fn exchange_code(
        &self,
        request: &TokenExchangeRequest,
    ) -> Result<TokenExchangeResult, UpstreamError> {
        let started = Instant::now();
        let result = self.post_token_request(request).await;

        metrics::record_upstream_call(
            UpstreamProvider::Upstox,
            result.as_ref().err().map(UpstreamError::kind),
            started.elapsed(),
        );

        result
    }
}
