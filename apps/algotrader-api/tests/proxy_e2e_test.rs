//! End-to-end tests: real router and real upstream clients against mock
//! DhanHQ and Upstox servers.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use algotrader_api::infrastructure::config::Secret;
use algotrader_api::{
    AppState, DhanConfig, DhanHqClient, ExchangeTokenUseCase, FetchIndexPriceUseCase,
    UpstoxClient, UpstoxConfig, create_router,
};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Harness
// =============================================================================

struct Upstreams {
    dhan: MockServer,
    upstox: MockServer,
}

impl Upstreams {
    async fn start() -> Self {
        Self {
            dhan: MockServer::start().await,
            upstox: MockServer::start().await,
        }
    }

    fn router(&self) -> Router {
        self.router_with_timeouts(Duration::from_secs(4), Duration::from_secs(10))
    }

    fn router_with_timeouts(&self, dhan_timeout: Duration, upstox_timeout: Duration) -> Router {
        let dhan = DhanHqClient::new(
            DhanConfig::new(self.dhan.uri(), Secret::new("sandbox-token".into()))
                .with_timeout(dhan_timeout),
        )
        .unwrap();
        let upstox = UpstoxClient::new(
            UpstoxConfig::new(self.upstox.uri(), Secret::new("app-secret".into()))
                .with_timeout(upstox_timeout),
        )
        .unwrap();

        create_router(AppState {
            fetch_index_price: Arc::new(FetchIndexPriceUseCase::new(Arc::new(dhan))),
            exchange_token: Arc::new(ExchangeTokenUseCase::new(Arc::new(upstox))),
            version: "1.0.0".to_string(),
        })
    }
}

async fn call(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn sensex_request() -> Request<Body> {
    Request::builder()
        .uri("/api/dhanhq/sensex-price")
        .body(Body::empty())
        .unwrap()
}

fn callback_request() -> Request<Body> {
    let body = json!({
        "code": "auth-code",
        "client_id": "api-key",
        "redirect_uri": "https://app.example/callback"
    });
    Request::builder()
        .method("POST")
        .uri("/api/upstox/callback")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Index price
// =============================================================================

#[tokio::test]
async fn sensex_price_round_trip() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path("/market-feed/indices"))
        .and(query_param("index", "NSE:SENSEX"))
        .and(header("authorization", "Bearer sandbox-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"lastTradedPrice": 81_000, "ltp": 1})),
        )
        .expect(1)
        .mount(&upstreams.dhan)
        .await;

    let (status, body) = call(upstreams.router(), sensex_request()).await;
    let body: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sensex"], 81_000.0);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn sensex_price_each_request_goes_upstream() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path("/market-feed/indices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"ltp": 500}, {"ltp": 999}])))
        .expect(2)
        .mount(&upstreams.dhan)
        .await;

    for _ in 0..2 {
        let (status, body) = call(upstreams.router(), sensex_request()).await;
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sensex"], 500.0);
    }
}

#[tokio::test]
async fn sensex_price_unrecognized_payload_is_bad_gateway() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"foo": "bar"})))
        .mount(&upstreams.dhan)
        .await;

    let (status, body) = call(upstreams.router(), sensex_request()).await;
    let body: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["detail"], "DhanHQ API unavailable");
    assert_eq!(body["code"], "UPSTREAM_UNPARSEABLE");
}

#[tokio::test]
async fn sensex_price_timeout_is_bounded() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ltp": 1}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&upstreams.dhan)
        .await;

    let router =
        upstreams.router_with_timeouts(Duration::from_millis(300), Duration::from_secs(10));
    let started = Instant::now();
    let (status, body) = call(router, sensex_request()).await;
    let body: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "UPSTREAM_TIMEOUT");
    assert!(started.elapsed() < Duration::from_secs(3));
}

// =============================================================================
// Token exchange
// =============================================================================

#[tokio::test]
async fn token_data_is_byte_identical() {
    let upstreams = Upstreams::start().await;
    let upstream_body =
        r#"{"email":"trader@example.com","access_token":"eyJ0","expires_in":86400,"ratio":1.50,"poa":null}"#;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(upstream_body, "application/json"))
        .expect(1)
        .mount(&upstreams.upstox)
        .await;

    let (status, body) = call(upstreams.router(), callback_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!(r#""token_data":{upstream_body}"#)));
    assert!(body.starts_with(r#"{"success":true,"#));
}

#[tokio::test]
async fn upstream_error_body_is_never_echoed() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("stack trace: client_secret=app-secret at TokenService.java:42"),
        )
        .mount(&upstreams.upstox)
        .await;

    let (status, body) = call(upstreams.router(), callback_request()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Failed to exchange code for token with Upstox"));
    assert!(!body.contains("stack trace"));
    assert!(!body.contains("app-secret"));
}

#[tokio::test]
async fn blank_code_never_reaches_upstox() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&upstreams.upstox)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/upstox/callback")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"code": " ", "client_id": "id", "redirect_uri": "u"}).to_string(),
        ))
        .unwrap();
    let (status, _) = call(upstreams.router(), request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unreachable_upstox_is_bad_gateway() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let upstreams = Upstreams::start().await;
    let dhan = DhanHqClient::new(DhanConfig::new(
        upstreams.dhan.uri(),
        Secret::new("t".into()),
    ))
    .unwrap();
    let upstox = UpstoxClient::new(UpstoxConfig::new(
        format!("http://{addr}"),
        Secret::new("s".into()),
    ))
    .unwrap();
    let router = create_router(AppState {
        fetch_index_price: Arc::new(FetchIndexPriceUseCase::new(Arc::new(dhan))),
        exchange_token: Arc::new(ExchangeTokenUseCase::new(Arc::new(upstox))),
        version: "1.0.0".to_string(),
    });

    let (status, body) = call(router, callback_request()).await;
    let body: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["detail"], "Upstox API unavailable");
}
