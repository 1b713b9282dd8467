//! HTTP adapter tests: routes, parameter extraction, and the always-200
//! envelope contract, driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use query_gateway::adapters::{InMemoryLedger, RecordingRelay, StaticPeers};
use query_gateway::{codes, ApiGatewayService, GatewayConfig};
use serde_json::Value;
use shared_types::{Block, BlockHeader, Payload, Transaction};
use tower::ServiceExt;

fn make_service(config: GatewayConfig) -> ApiGatewayService {
    let ledger = Arc::new(InMemoryLedger::new());
    for height in 0..=10 {
        ledger.insert_block(Block {
            header: BlockHeader {
                height,
                ..Default::default()
            },
            transactions: vec![Transaction::new(Payload::BookKeeping {
                nonce: u64::from(height),
            })],
        });
    }
    ApiGatewayService::new(
        config,
        ledger,
        Arc::new(RecordingRelay::accepting()),
        Arc::new(StaticPeers::new(2)),
    )
    .unwrap()
}

fn app() -> Router {
    make_service(GatewayConfig::default()).router()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_get_with_query_params() {
    let (status, body) = send(app(), get("/api/v1/getblockheight")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Action"], "getblockheight");
    assert_eq!(body["Result"], 10);
    assert_eq!(body["Error"], 0);

    let (_, body) = send(app(), get("/api/v1/getblockhash?Height=11")).await;
    assert_eq!(body["Error"], codes::UNKNOWN_BLOCK);
}

#[tokio::test]
async fn test_post_json_body() {
    let request = post("/api/v1/getblocktxsbyheight", r#"{"Height":"2"}"#);
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Result"]["Height"], 2);
    assert_eq!(body["Result"]["Transactions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_errors_ride_in_the_envelope() {
    let (status, body) = send(app(), post("/api/v1/getblockhash", "{not json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Error"], codes::INVALID_PARAMS);
    assert_eq!(body["Result"], "");

    let (status, body) = send(app(), post("/api/v1/getblockhash", "[1,2]")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Error"], codes::INVALID_PARAMS);

    let (status, body) = send(app(), get("/api/v1/nosuchaction")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Error"], codes::INVALID_METHOD);
}

#[tokio::test]
async fn test_ambiguous_query_rides_in_the_envelope() {
    let (status, body) = send(app(), get("/api/v1/getblockhash?Height=1&Height=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Action"], "getblockhash");
    assert_eq!(body["Error"], codes::INVALID_PARAMS);
    assert_eq!(body["Result"], "");
}

#[tokio::test]
async fn test_unknown_action_beats_malformed_body() {
    let service = make_service(GatewayConfig::default());
    let router = service.router();

    let (status, body) = send(router.clone(), post("/api/v1/nosuchaction", "{not json")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Error"], codes::INVALID_METHOD);

    let (_, body) = send(router.clone(), get("/api/v1/nosuchaction?a=1&a=2")).await;
    assert_eq!(body["Error"], codes::INVALID_METHOD);

    let (_, metrics) = send(router, get("/metrics")).await;
    assert_eq!(metrics["requests"]["unknown_action"], 2);
    assert_eq!(metrics["requests"]["error"], 2);
}

#[tokio::test]
async fn test_action_index() {
    let (status, index) = send(app(), get("/api/v1")).await;
    assert_eq!(status, StatusCode::OK);
    let total: usize = index
        .as_object()
        .unwrap()
        .values()
        .map(|group| group.as_array().unwrap().len())
        .sum();
    assert_eq!(total, 19);

    let submit = &index["submit"][0];
    assert_eq!(submit["Action"], "sendrawtransaction");
    assert_eq!(submit["Params"], serde_json::json!(["Data", "Userid"]));
    assert!(!submit["Description"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_post_body_means_no_params() {
    let (_, body) = send(app(), post("/api/v1/getconnectioncount", "")).await;
    assert_eq!(body["Result"], 2);
}

#[tokio::test]
async fn test_health_and_metrics() {
    let service = make_service(GatewayConfig::default());
    let router = service.router();

    let (status, health) = send(router.clone(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["network"], "forum-ledger");
    assert_eq!(health["actions"], 19);

    send(router.clone(), get("/api/v1/getblockheight")).await;
    send(router.clone(), get("/api/v1/bogus")).await;

    let (_, metrics) = send(router, get("/metrics")).await;
    assert_eq!(metrics["requests"]["total"], 2);
    assert_eq!(metrics["requests"]["success"], 1);
    assert_eq!(metrics["requests"]["unknown_action"], 1);
}

#[tokio::test]
async fn test_oversized_body_is_refused() {
    let mut config = GatewayConfig::default();
    config.limits.max_request_size = 64;
    let router = make_service(config).router();

    let big = format!(r#"{{"Data":"{}"}}"#, "00".repeat(128));
    let response = router
        .oneshot(post("/api/v1/sendrawtransaction", &big))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
