//! Exchange Token Use Case

use std::sync::Arc;

use crate::application::ports::{TokenExchangePort, UpstreamError};
use crate::domain::{TokenExchangeRequest, TokenExchangeResult};

/// Trades an authorization code for an access token.
pub struct ExchangeTokenUseCase<T>
where
    T: TokenExchangePort,
{
    token_provider: Arc<T>,
}

impl<T> ExchangeTokenUseCase<T>
where
    T: TokenExchangePort,
{
    /// Create a new use case.
    pub const fn new(token_provider: Arc<T>) -> Self {
        Self { token_provider }
    }

    /// Execute the use case.
    ///
    /// The token payload is returned untouched; it is never logged.
    pub async fn execute(
        &self,
        request: &TokenExchangeRequest,
    ) -> Result<TokenExchangeResult, UpstreamError> {
        tracing::info!(client_id = request.client_id(), "Exchanging authorization code");

        match self.token_provider.exchange_code(request).await {
            Ok(result) => {
                tracing::info!(client_id = request.client_id(), "Authorization code exchanged");
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(
                    client_id = request.client_id(),
                    kind = e.kind().as_str(),
                    error = %e,
                    "Authorization code exchange failed"
                );
                Err(e)
            }
        }
    }
}
