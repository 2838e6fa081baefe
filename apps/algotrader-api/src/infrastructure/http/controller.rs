//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::application::ports::{IndexPricePort, TokenExchangePort, UpstreamProvider};
use crate::application::use_cases::{ExchangeTokenUseCase, FetchIndexPriceUseCase};
use crate::domain::TokenExchangeRequest;
use crate::error::ApiError;
use crate::infrastructure::metrics::get_metrics_handle;

use super::request::UpstoxCallbackRequest;
use super::response::{
    DocsResponse, ENDPOINTS, HealthResponse, RootResponse, SERVICE_NAME, SensexPriceResponse,
    UpstoxCallbackResponse,
};

/// Application state shared across handlers.
pub struct AppState<P, T>
where
    P: IndexPricePort,
    T: TokenExchangePort,
{
    /// Use case for the index price.
    pub fetch_index_price: Arc<FetchIndexPriceUseCase<P>>,
    /// Use case for the OAuth code exchange.
    pub exchange_token: Arc<ExchangeTokenUseCase<T>>,
    /// Application version.
    pub version: String,
}

impl<P, T> Clone for AppState<P, T>
where
    P: IndexPricePort,
    T: TokenExchangePort,
{
    fn clone(&self) -> Self {
        Self {
            fetch_index_price: Arc::clone(&self.fetch_index_price),
            exchange_token: Arc::clone(&self.exchange_token),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
///
/// Unmatched routes answer 404, handler panics answer a sanitized 500, and
/// CORS is open to any origin.
pub fn create_router<P, T>(state: AppState<P, T>) -> Router
where
    P: IndexPricePort + 'static,
    T: TokenExchangePort + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/docs", get(docs))
        .route("/api/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/dhanhq/sensex-price", get(sensex_price))
        .route("/api/upstox/callback", post(upstox_callback))
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Service banner.
async fn root<P, T>(State(state): State<AppState<P, T>>) -> impl IntoResponse
where
    P: IndexPricePort,
    T: TokenExchangePort,
{
    Json(RootResponse::new(state.version.clone()))
}

/// Endpoint catalog.
async fn docs<P, T>(State(state): State<AppState<P, T>>) -> impl IntoResponse
where
    P: IndexPricePort,
    T: TokenExchangePort,
{
    Json(DocsResponse {
        service: SERVICE_NAME,
        version: state.version.clone(),
        endpoints: &ENDPOINTS,
    })
}

/// Health check endpoint.
async fn health_check<P, T>(State(state): State<AppState<P, T>>) -> impl IntoResponse
where
    P: IndexPricePort,
    T: TokenExchangePort,
{
    Json(HealthResponse::ok(state.version.clone()))
}

/// Prometheus text, or 503 when the recorder is not installed.
async fn metrics() -> Response {
    get_metrics_handle().map_or_else(
        || (StatusCode::SERVICE_UNAVAILABLE, "Metrics not initialized").into_response(),
        |handle| {
            (
                StatusCode::OK,
                [(
                    header::CONTENT_TYPE,
                    "text/plain; version=0.0.4; charset=utf-8",
                )],
                handle.render(),
            )
                .into_response()
        },
    )
}

/// Index price endpoint.
async fn sensex_price<P, T>(
    State(state): State<AppState<P, T>>,
) -> Result<Json<SensexPriceResponse>, ApiError>
where
    P: IndexPricePort,
    T: TokenExchangePort,
{
    let quote = state
        .fetch_index_price
        .execute()
        .await
        .map_err(|e| ApiError::upstream(UpstreamProvider::DhanHq, &e))?;

    Ok(Json(quote.into()))
}

/// OAuth callback endpoint.
async fn upstox_callback<P, T>(
    State(state): State<AppState<P, T>>,
    body: Result<Json<UpstoxCallbackRequest>, JsonRejection>,
) -> Result<Json<UpstoxCallbackResponse>, ApiError>
where
    P: IndexPricePort,
    T: TokenExchangePort,
{
    let Json(body) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected token exchange body");
        ApiError::invalid_request(rejection.body_text())
    })?;

    let request = TokenExchangeRequest::try_from(body).map_err(|e| {
        tracing::warn!(field = e.field, "Rejected token exchange body");
        ApiError::invalid_request(e.to_string())
    })?;

    let token_data = state
        .exchange_token
        .execute(&request)
        .await
        .map_err(|e| ApiError::upstream(UpstreamProvider::Upstox, &e))?;

    Ok(Json(token_data.into()))
}

async fn not_found(uri: Uri) -> ApiError {
    tracing::warn!(path = uri.path(), "Route not found");
    ApiError::route_not_found(uri.path())
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    tracing::error!(panic = message, "Handler panicked");
    ApiError::internal().into_response()
}
