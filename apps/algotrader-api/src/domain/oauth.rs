//! OAuth authorization-code exchange types.

use serde::Serialize;
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use thiserror::Error;

/// Grant type sent with every code-for-token exchange.
pub const AUTHORIZATION_CODE_GRANT: &str = "authorization_code";

/// A token exchange request was rejected before reaching the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' must not be blank")]
pub struct InvalidTokenRequest {
    /// Name of the offending field.
    pub field: &'static str,
}

/// Caller-supplied parameters of an authorization-code exchange.
///
/// Immutable once built. The authorization code is a one-time credential
/// and is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenExchangeRequest {
    code: String,
    client_id: String,
    redirect_uri: String,
}

impl TokenExchangeRequest {
    /// Build a request, rejecting blank fields.
    pub fn new(
        code: impl Into<String>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self, InvalidTokenRequest> {
        let code = non_blank("code", code.into())?;
        let client_id = non_blank("client_id", client_id.into())?;
        let redirect_uri = non_blank("redirect_uri", redirect_uri.into())?;

        Ok(Self {
            code,
            client_id,
            redirect_uri,
        })
    }

    /// Authorization code returned by the OAuth redirect.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Client identifier (API key) of the registered app.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Redirect URI used when the code was issued.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}

impl std::fmt::Debug for TokenExchangeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenExchangeRequest")
            .field("code", &"[REDACTED]")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

fn non_blank(field: &'static str, value: String) -> Result<String, InvalidTokenRequest> {
    if value.trim().is_empty() {
        return Err(InvalidTokenRequest { field });
    }
    Ok(value)
}

/// Token payload returned by the OAuth endpoint, kept byte-for-byte.
///
/// The only check applied is that the body is a JSON object; no fields are
/// read or validated. Serializing writes the original JSON text unchanged.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct TokenExchangeResult(Box<RawValue>);

impl TokenExchangeResult {
    /// Wrap an upstream response body that must be a JSON object.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Map<String, Value>>(body)?;
        let raw = serde_json::from_str::<Box<RawValue>>(body)?;
        Ok(Self(raw))
    }

    /// The verbatim JSON text.
    #[must_use]
    pub fn as_json_str(&self) -> &str {
        self.0.get()
    }
}
