//! Error responses returned by the HTTP surface.
//!
//! Every failure that reaches a caller is an [`ApiError`]. Upstream failures
//! carry a fixed detail chosen by provider and kind; upstream bodies and
//! transport messages never leave the process.
//!
//! # Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `UPSTREAM_TIMEOUT` | 502 | Upstream call exceeded its timeout |
//! | `UPSTREAM_UNAVAILABLE` | 502 | Upstream could not be reached |
//! | `UPSTREAM_BAD_STATUS` | 502 | Upstream answered with a non-200 status |
//! | `UPSTREAM_UNPARSEABLE` | 502 | Upstream body could not be normalized |
//! | `INVALID_REQUEST` | 422 | Malformed or incomplete request body |
//! | `ROUTE_NOT_FOUND` | 404 | No route matched |
//! | `INTERNAL_ERROR` | 500 | Handler panicked |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{UpstreamError, UpstreamFailureKind, UpstreamProvider};
use crate::infrastructure::metrics;

/// Detail returned for a caught panic.
pub const INTERNAL_ERROR_DETAIL: &str = "An unexpected internal error occurred";

/// Error codes for the HTTP surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Upstream errors (502)
    /// Upstream call timed out.
    UpstreamTimeout,
    /// Upstream unreachable.
    UpstreamUnavailable,
    /// Upstream returned a non-success status.
    UpstreamBadStatus,
    /// Upstream body could not be normalized.
    UpstreamUnparseable,

    // Caller errors
    /// Invalid request format or missing fields.
    InvalidRequest,
    /// No route matched the request.
    RouteNotFound,

    // Internal errors (500)
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::UpstreamTimeout
            | Self::UpstreamUnavailable
            | Self::UpstreamBadStatus
            | Self::UpstreamUnparseable => StatusCode::BAD_GATEWAY,
            Self::InvalidRequest => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::UpstreamTimeout => "UPSTREAM_TIMEOUT",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamBadStatus => "UPSTREAM_BAD_STATUS",
            Self::UpstreamUnparseable => "UPSTREAM_UNPARSEABLE",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Short summary used as the envelope's `error` field.
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        match self {
            Self::UpstreamTimeout
            | Self::UpstreamUnavailable
            | Self::UpstreamBadStatus
            | Self::UpstreamUnparseable => "Upstream service unavailable",
            Self::InvalidRequest => "Invalid request body",
            Self::RouteNotFound => "Route not found",
            Self::InternalError => "Internal server error",
        }
    }

    /// Code for an upstream failure kind.
    #[must_use]
    pub const fn from_upstream(kind: UpstreamFailureKind) -> Self {
        match kind {
            UpstreamFailureKind::Timeout => Self::UpstreamTimeout,
            UpstreamFailureKind::Unreachable => Self::UpstreamUnavailable,
            UpstreamFailureKind::NonSuccessStatus => Self::UpstreamBadStatus,
            UpstreamFailureKind::UnparseableResponse => Self::UpstreamUnparseable,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Fixed caller-facing detail for an upstream failure.
#[must_use]
pub const fn upstream_detail(provider: UpstreamProvider, kind: UpstreamFailureKind) -> &'static str {
    match (provider, kind) {
        (UpstreamProvider::DhanHq, _) => "DhanHQ API unavailable",
        (UpstreamProvider::Upstox, UpstreamFailureKind::NonSuccessStatus) => {
            "Failed to exchange code for token with Upstox"
        }
        (UpstreamProvider::Upstox, UpstreamFailureKind::Timeout) => "Upstox API timeout",
        (UpstreamProvider::Upstox, UpstreamFailureKind::Unreachable) => "Upstox API unavailable",
        (UpstreamProvider::Upstox, UpstreamFailureKind::UnparseableResponse) => {
            "Token exchange failed"
        }
    }
}

/// An error returned to an HTTP caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: ErrorCode,
    detail: Option<String>,
    path: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    #[must_use]
    pub const fn new(code: ErrorCode) -> Self {
        Self {
            code,
            detail: None,
            path: None,
        }
    }

    /// Attach a caller-safe detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach the request path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the detail message.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Serializable envelope.
    #[must_use]
    pub fn to_body(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            success: false,
            error: self.code.summary().to_string(),
            code: self.code.reason().to_string(),
            detail: self.detail.clone(),
            path: self.path.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "[{}] {detail}", self.code.reason()),
            None => write!(f, "[{}] {}", self.code.reason(), self.code.summary()),
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience constructors for common errors.
impl ApiError {
    /// Upstream failure with its fixed detail. The upstream's own detail is dropped.
    #[must_use]
    pub fn upstream(provider: UpstreamProvider, error: &UpstreamError) -> Self {
        let kind = error.kind();
        Self::new(ErrorCode::from_upstream(kind)).with_detail(upstream_detail(provider, kind))
    }

    /// Invalid request body.
    #[must_use]
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest).with_detail(detail)
    }

    /// No route matched `path`.
    #[must_use]
    pub fn route_not_found(path: impl Into<String>) -> Self {
        Self::new(ErrorCode::RouteNotFound).with_path(path)
    }

    /// Sanitized internal error.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError).with_detail(INTERNAL_ERROR_DETAIL)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        metrics::record_http_error(self.code.reason());
        (self.code.http_status(), Json(self.to_body())).into_response()
    }
}

/// JSON error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Short summary.
    pub error: String,
    /// Stable reason code.
    pub code: String,
    /// Caller-safe detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Request path, for unmatched routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
