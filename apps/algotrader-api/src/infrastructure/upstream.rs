//! Shared plumbing for outbound provider calls.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::application::ports::UpstreamError;

/// Longest slice of an upstream body written to debug logs.
const BODY_PREVIEW_CHARS: usize = 256;

/// The outbound HTTP client could not be constructed.
#[derive(Debug, Error)]
#[error("failed to build HTTP client: {0}")]
pub struct ClientBuildError(String);

/// Build a client whose every request is bounded by `timeout`.
///
/// The timeout covers connect, send and reading the full body.
pub fn build_http_client(timeout: Duration) -> Result<Client, ClientBuildError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClientBuildError(e.to_string()))
}

/// Map a transport-level reqwest error to its upstream category.
#[must_use]
pub fn classify_transport_error(err: &reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::timeout(err.to_string())
    } else {
        UpstreamError::unreachable(err.to_string())
    }
}

/// Leading part of an upstream body, cut on a char boundary.
#[must_use]
pub fn body_preview(body: &str) -> &str {
    body.char_indices()
        .nth(BODY_PREVIEW_CHARS)
        .map_or(body, |(idx, _)| &body[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::UpstreamFailureKind;

    #[test]
    fn preview_keeps_short_bodies() {
        assert_eq!(body_preview("{}"), "{}");
        assert_eq!(body_preview(""), "");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let body = "₹".repeat(BODY_PREVIEW_CHARS + 10);
        let preview = body_preview(&body);
        assert_eq!(preview.chars().count(), BODY_PREVIEW_CHARS);
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = build_http_client(Duration::from_secs(2)).unwrap();
        let err = client
            .get(format!("http://{addr}/"))
            .send()
            .await
            .unwrap_err();

        assert_eq!(
            classify_transport_error(&err).kind(),
            UpstreamFailureKind::Unreachable
        );
    }
}
