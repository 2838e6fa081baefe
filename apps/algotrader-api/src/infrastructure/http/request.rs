//! HTTP request types.

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidTokenRequest, TokenExchangeRequest};

/// Body of `POST /api/upstox/callback`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstoxCallbackRequest {
    /// Authorization code from the OAuth redirect.
    pub code: String,
    /// API key of the registered app.
    pub client_id: String,
    /// Redirect URI the code was issued for.
    pub redirect_uri: String,
}

impl std::fmt::Debug for UpstoxCallbackRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstoxCallbackRequest")
            .field("code", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl TryFrom<UpstoxCallbackRequest> for TokenExchangeRequest {
    type Error = InvalidTokenRequest;

    fn try_from(request: UpstoxCallbackRequest) -> Result<Self, Self::Error> {
        Self::new(request.code, request.client_id, request.redirect_uri)
    }
}
