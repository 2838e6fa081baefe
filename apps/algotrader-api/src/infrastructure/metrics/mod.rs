//! Prometheus Metrics Module
//!
//! Counts and times every upstream call and every error response.
//!
//! # Metrics
//!
//! - `algotrader_upstream_requests_total{provider, outcome}`
//! - `algotrader_upstream_request_seconds{provider}`
//! - `algotrader_http_errors_total{code}`
//!
//! Exposed at `/metrics` when enabled. Recording before [`init_metrics`]
//! is a no-op.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::application::ports::{UpstreamFailureKind, UpstreamProvider};

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Outcome label for a successful upstream call.
const OUTCOME_SUCCESS: &str = "success";

/// Install the Prometheus recorder.
///
/// Later calls return the handle installed by the first one.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();

    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "algotrader_upstream_requests_total",
        "Upstream calls by provider and outcome"
    );
    describe_histogram!(
        "algotrader_upstream_request_seconds",
        "Upstream call latency including body read"
    );
    describe_counter!(
        "algotrader_http_errors_total",
        "Error responses returned to callers by error code"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Record one upstream call. `failure` is `None` on success.
pub fn record_upstream_call(
    provider: UpstreamProvider,
    failure: Option<UpstreamFailureKind>,
    elapsed: Duration,
) {
    let outcome = failure.map_or(OUTCOME_SUCCESS, |kind| kind.as_str());

    counter!(
        "algotrader_upstream_requests_total",
        "provider" => provider.as_str(),
        "outcome" => outcome
    )
    .increment(1);

    histogram!(
        "algotrader_upstream_request_seconds",
        "provider" => provider.as_str()
    )
    .record(elapsed.as_secs_f64());
}

/// Record an error response by its reason code.
pub fn record_http_error(code: &'static str) {
    counter!("algotrader_http_errors_total", "code" => code).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_noop() {
        record_upstream_call(
            UpstreamProvider::DhanHq,
            Some(UpstreamFailureKind::Timeout),
            Duration::from_millis(5),
        );
        record_upstream_call(UpstreamProvider::Upstox, None, Duration::ZERO);
        record_http_error("UPSTREAM_TIMEOUT");
    }

    #[test]
    fn init_is_idempotent() {
        assert!(init_metrics().is_ok());
        assert!(init_metrics().is_ok());
        assert!(get_metrics_handle().is_some());

        record_http_error("ROUTE_NOT_FOUND");
        let rendered = get_metrics_handle().unwrap().render();
        assert!(rendered.contains("algotrader_http_errors_total"));
    }
}
