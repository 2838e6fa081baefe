//! Categorized upstream failures.

use thiserror::Error;

/// Third-party API a request was forwarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamProvider {
    /// DhanHQ market feed.
    DhanHq,
    /// Upstox OAuth.
    Upstox,
}

impl UpstreamProvider {
    /// Metric/log label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DhanHq => "dhanhq",
            Self::Upstox => "upstox",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::DhanHq => "DhanHQ",
            Self::Upstox => "Upstox",
        }
    }
}

impl std::fmt::Display for UpstreamProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Failure category without its detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamFailureKind {
    /// The call did not complete within its timeout.
    Timeout,
    /// The upstream could not be reached.
    Unreachable,
    /// The upstream answered with something other than 200.
    NonSuccessStatus,
    /// The body could not be parsed or normalized.
    UnparseableResponse,
}

impl UpstreamFailureKind {
    /// Metric/log label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Unreachable => "unreachable",
            Self::NonSuccessStatus => "bad_status",
            Self::UnparseableResponse => "unparseable",
        }
    }
}

/// A single categorized failure of an upstream call.
///
/// Details are for logs only and are never returned to inbound callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The call timed out.
    #[error("upstream timed out{}", fmt_detail(.detail.as_deref()))]
    Timeout {
        /// Optional context.
        detail: Option<String>,
    },

    /// Connection or other transport-level failure.
    #[error("upstream unreachable{}", fmt_detail(.detail.as_deref()))]
    Unreachable {
        /// Optional context.
        detail: Option<String>,
    },

    /// Upstream returned a non-success HTTP status.
    #[error("upstream returned status {status}{}", fmt_detail(.detail.as_deref()))]
    NonSuccessStatus {
        /// HTTP status code.
        status: u16,
        /// Optional context.
        detail: Option<String>,
    },

    /// The response body could not be parsed or normalized.
    #[error("upstream response unparseable{}", fmt_detail(.detail.as_deref()))]
    UnparseableResponse {
        /// Optional context.
        detail: Option<String>,
    },
}

impl UpstreamError {
    /// Timeout with context.
    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::Timeout {
            detail: Some(detail.into()),
        }
    }

    /// Transport failure with context.
    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self::Unreachable {
            detail: Some(detail.into()),
        }
    }

    /// Non-success status without context.
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self::NonSuccessStatus {
            status,
            detail: None,
        }
    }

    /// Unparseable body with context.
    pub fn unparseable(detail: impl Into<String>) -> Self {
        Self::UnparseableResponse {
            detail: Some(detail.into()),
        }
    }

    /// The failure category.
    #[must_use]
    pub const fn kind(&self) -> UpstreamFailureKind {
        match self {
            Self::Timeout { .. } => UpstreamFailureKind::Timeout,
            Self::Unreachable { .. } => UpstreamFailureKind::Unreachable,
            Self::NonSuccessStatus { .. } => UpstreamFailureKind::NonSuccessStatus,
            Self::UnparseableResponse { .. } => UpstreamFailureKind::UnparseableResponse,
        }
    }

    /// The optional detail string.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Timeout { detail }
            | Self::Unreachable { detail }
            | Self::NonSuccessStatus { detail, .. }
            | Self::UnparseableResponse { detail } => detail.as_deref(),
        }
    }
}

fn fmt_detail(detail: Option<&str>) -> String {
    detail.map_or_else(String::new, |d| format!(": {d}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            UpstreamError::timeout("4s").kind(),
            UpstreamFailureKind::Timeout
        );
        assert_eq!(
            UpstreamError::unreachable("refused").kind(),
            UpstreamFailureKind::Unreachable
        );
        assert_eq!(
            UpstreamError::status(500).kind(),
            UpstreamFailureKind::NonSuccessStatus
        );
        assert_eq!(
            UpstreamError::unparseable("eof").kind(),
            UpstreamFailureKind::UnparseableResponse
        );
    }

    #[test]
    fn display_includes_optional_detail() {
        assert_eq!(
            UpstreamError::status(503).to_string(),
            "upstream returned status 503"
        );
        assert_eq!(
            UpstreamError::unreachable("connection refused").to_string(),
            "upstream unreachable: connection refused"
        );
        assert_eq!(
            UpstreamError::Timeout { detail: None }.to_string(),
            "upstream timed out"
        );
    }

    #[test]
    fn detail_accessor() {
        assert_eq!(UpstreamError::unparseable("bad").detail(), Some("bad"));
        assert_eq!(UpstreamError::status(404).detail(), None);
    }

    #[test]
    fn labels() {
        assert_eq!(UpstreamProvider::DhanHq.as_str(), "dhanhq");
        assert_eq!(UpstreamProvider::Upstox.to_string(), "Upstox");
        assert_eq!(UpstreamFailureKind::NonSuccessStatus.as_str(), "bad_status");
    }
}
