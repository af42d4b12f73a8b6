//! End-to-end integration tests for the lookup bot.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::*;
use lookup_bot::health::{create_router, HealthState};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_invalid_text_makes_no_lookup() {
    let telegram = MockServer::start().await;
    let lookup = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&lookup)
        .await;

    Mock::given(method("POST"))
        .and(path(telegram_path("sendMessage")))
        .and(body_string_contains("didn't understand"))
        .respond_with(sent_message(1))
        .expect(1)
        .mount(&telegram)
        .await;

    let dispatcher = test_dispatcher(telegram.uri(), lookup.uri());
    dispatcher.dispatch(text_event("abc")).await;
}

#[tokio::test]
async fn test_lookup_e2e() {
    let telegram = MockServer::start().await;
    let lookup = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("key", "test-api-key"))
        .and(query_param("num", "919876543210"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "name": "Ravi Kumar",
            "mobile": "919876543210",
            "alt_mobile": "9000000001",
            "circle": "AIRTEL KARNATAKA"
        }])))
        .expect(1)
        .mount(&lookup)
        .await;

    Mock::given(method("POST"))
        .and(path(telegram_path("sendMessage")))
        .and(body_string_contains("Searching for information about"))
        .and(body_string_contains("`919876543210`"))
        .respond_with(sent_message(77))
        .expect(1)
        .mount(&telegram)
        .await;

    Mock::given(method("POST"))
        .and(path(telegram_path("editMessageText")))
        .and(body_string_contains("\"message_id\":77"))
        .and(body_string_contains("Ravi Kumar"))
        .and(body_string_contains("AIRTEL KARNATAKA"))
        .and(body_string_contains("\"callback_data\":\"lookup\""))
        .respond_with(sent_message(77))
        .expect(1)
        .mount(&telegram)
        .await;

    let dispatcher = test_dispatcher(telegram.uri(), lookup.uri());
    dispatcher.dispatch(text_event("+91 98765-43210")).await;

    let requests = telegram.received_requests().await.unwrap();
    let edit = requests
        .iter()
        .find(|r| r.url.path().ends_with("editMessageText"))
        .unwrap();
    let body = String::from_utf8_lossy(&edit.body);
    assert!(!body.contains("Primary Mobile"));
    assert!(body.contains("Alternative Mobile"));
}

#[tokio::test]
async fn test_sixth_request_rate_limited() {
    let telegram = MockServer::start().await;
    let lookup = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Someone"
        })))
        .expect(5)
        .mount(&lookup)
        .await;

    Mock::given(method("POST"))
        .and(path(telegram_path("sendMessage")))
        .and(body_string_contains("Searching"))
        .respond_with(sent_message(10))
        .expect(5)
        .mount(&telegram)
        .await;

    Mock::given(method("POST"))
        .and(path(telegram_path("sendMessage")))
        .and(body_string_contains("Rate Limit Exceeded"))
        .and(body_string_contains("5 requests per 60 seconds"))
        .respond_with(sent_message(11))
        .expect(1)
        .mount(&telegram)
        .await;

    Mock::given(method("POST"))
        .and(path(telegram_path("editMessageText")))
        .respond_with(sent_message(10))
        .expect(5)
        .mount(&telegram)
        .await;

    let dispatcher = test_dispatcher(telegram.uri(), lookup.uri());
    for _ in 0..6 {
        dispatcher.dispatch(text_event("1234567890")).await;
    }
}

#[tokio::test]
async fn test_not_found_edits_placeholder_once() {
    let telegram = MockServer::start().await;
    let lookup = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&lookup)
        .await;

    Mock::given(method("POST"))
        .and(path(telegram_path("sendMessage")))
        .respond_with(sent_message(31))
        .expect(1)
        .mount(&telegram)
        .await;

    Mock::given(method("POST"))
        .and(path(telegram_path("editMessageText")))
        .and(body_string_contains("\"message_id\":31"))
        .and(body_string_contains("Lookup failed: Number not found in database"))
        .respond_with(sent_message(31))
        .expect(1)
        .mount(&telegram)
        .await;

    let dispatcher = test_dispatcher(telegram.uri(), lookup.uri());
    dispatcher.dispatch(text_event("/lookup 1234567890")).await;
}

#[tokio::test]
async fn test_start_sends_main_menu() {
    let telegram = MockServer::start().await;
    let lookup = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(telegram_path("sendMessage")))
        .and(body_string_contains("\"parse_mode\":\"MarkdownV2\""))
        .and(body_string_contains("\"callback_data\":\"examples\""))
        .respond_with(sent_message(1))
        .expect(1)
        .mount(&telegram)
        .await;

    let dispatcher = test_dispatcher(telegram.uri(), lookup.uri());
    dispatcher.dispatch(text_event("/start")).await;
}

fn health_state() -> HealthState {
    HealthState::new(
        test_lookup_client("http://lookup.test/api".into()),
        Arc::new(test_settings(5, Duration::from_secs(60))),
    )
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(health_state());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "number-lookup-bot");
    assert_eq!(json["bot_status"], "running");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_api_status_endpoint() {
    let app = create_router(health_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["bot_online"], true);
    assert_eq!(json["api_endpoint"], "lookup.test");
    assert_eq!(json["has_api_key"], true);
    assert_eq!(json["rate_limit"], 5);
    assert_eq!(json["rate_window"], 60);
    assert_eq!(json["timeout"], 5);
    assert!(!body.windows(12).any(|w| w == b"test-api-key"));
}

#[tokio::test]
async fn test_landing_page() {
    let app = create_router(health_state());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains("<strong>Lookup API:</strong> lookup.test"));
    assert!(html.contains("5 requests per 60 seconds"));
    assert!(!html.contains("test-api-key"));
}

#[tokio::test]
async fn test_unknown_path_not_found() {
    let app = create_router(health_state());

    let response = app
        .oneshot(Request::builder().uri("/admin").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
