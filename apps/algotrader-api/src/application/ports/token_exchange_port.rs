//! Token Exchange Port (Driven Port)
//!
//! Interface for trading an OAuth authorization code for an access token.

use async_trait::async_trait;

use crate::domain::{TokenExchangeRequest, TokenExchangeResult};

use super::UpstreamError;

/// Port for the OAuth token provider.
#[async_trait]
pub trait TokenExchangePort: Send + Sync {
    /// Exchange an authorization code with a single outbound call.
    async fn exchange_code(
        &self,
        request: &TokenExchangeRequest,
    ) -> Result<TokenExchangeResult, UpstreamError>;
}
