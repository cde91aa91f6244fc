// SPDX-FileCopyrightText: 2026 Routivate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the `/api` contract, driven through the router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use axum::Router;
use routivate_core::{Collection, RecordStore};
use routivate_gateway::{build_router, serve, AppState};
use routivate_test_utils::{InMemoryStore, StoreKind, TestHarness};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

fn app_for(harness: &TestHarness) -> Router {
    build_router(AppState::new(Arc::clone(&harness.store)))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("user-agent", "integration-test")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

#[tokio::test]
async fn root_describes_the_service() {
    let harness = TestHarness::with_store(StoreKind::InMemory).unwrap();
    let (status, body) = send(&app_for(&harness), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    insta::assert_json_snapshot!(body, @r#"
    {
      "message": "Routivate Backend API"
    }
    "#);
}

#[tokio::test]
async fn contact_submission_increments_form_submits() {
    let harness = TestHarness::new().unwrap();
    let app = app_for(&harness);

    let (_, before) = send(&app, get("/api/analytics")).await;
    assert_eq!(before["formSubmits"], 0);

    let (status, body) = send(
        &app,
        post_json(
            "/api/contact",
            json!({"name": "A", "email": "a@b.com", "mobile": "123", "message": "hi"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    insta::assert_json_snapshot!(body, @r#"
    {
      "message": "Message sent successfully",
      "success": true
    }
    "#);

    let (status, after) = send(&app, get("/api/analytics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["formSubmits"], 1);

    let stored = harness.contacts.all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, Some("A".into()));
    assert_eq!(stored[0].user_agent, "integration-test");
    assert!(stored[0].timestamp.ends_with('Z'));
}

#[tokio::test]
async fn page_views_and_clicks_are_counted() {
    let harness = TestHarness::new().unwrap();
    let app = app_for(&harness);

    for _ in 0..3 {
        let (status, body) = send(
            &app,
            post_json("/api/track", json!({"type": "page_view", "page": "/"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
    }
    send(&app, post_json("/api/track", json!({"type": "click", "page": "/"}))).await;
    send(&app, post_json("/api/track", json!({"type": "theme_change", "page": "/", "metadata": {"theme": "dark"}}))).await;

    let (status, body) = send(&app, get("/api/analytics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pageViews"], 3);
    assert_eq!(body["clicks"], 1);
    assert_eq!(body["formSubmits"], 0);
    assert_eq!(body["recentInteractions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn recent_interactions_are_newest_first_and_capped() {
    let store = Arc::new(InMemoryStore::new());
    let seeded: Vec<Value> = (0..12)
        .map(|i| {
            json!({
                "type": "click",
                "page": format!("/p{i}"),
                "timestamp": format!("2026-03-01T00:00:{i:02}.000Z"),
            })
        })
        .chain(std::iter::once(json!({"type": "click", "page": "/undated"})))
        .collect();
    store.seed(Collection::Interactions, seeded).await;

    let app = build_router(AppState::new(store));
    let (_, body) = send(&app, get("/api/analytics")).await;

    assert_eq!(body["clicks"], 13);
    let pages: Vec<&str> = body["recentInteractions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["page"].as_str().unwrap())
        .collect();
    let expected: Vec<String> = (2..12).rev().map(|i| format!("/p{i}")).collect();
    assert_eq!(pages, expected);
}

#[tokio::test]
async fn track_stores_absent_fields_as_given() {
    let harness = TestHarness::with_store(StoreKind::InMemory).unwrap();
    let app = app_for(&harness);

    let (status, _) = send(&app, post_json("/api/track", json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let raw = harness.store.read_all(Collection::Interactions).await.unwrap();
    assert_eq!(raw.len(), 1);
    assert!(raw[0].get("type").is_none());
    assert!(raw[0].get("page").is_none());
    assert_eq!(raw[0]["element"], "");
    assert_eq!(raw[0]["sessionId"], "");
    assert_eq!(raw[0]["metadata"], json!({}));
}

#[tokio::test]
async fn client_ip_comes_from_peer_address() {
    let harness = TestHarness::with_store(StoreKind::InMemory).unwrap();
    let app = app_for(&harness);

    let mut request = post_json("/api/track", json!({"type": "click", "page": "/", "sessionId": "s-9"}));
    let peer: SocketAddr = "192.0.2.10:40000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));
    send(&app, request).await;

    let stored = harness.interactions.all().await.unwrap();
    assert_eq!(stored[0].ip, "192.0.2.10");
    assert_eq!(stored[0].session_id, "s-9");
}

#[tokio::test]
async fn form_encoded_contact_is_accepted() {
    let harness = TestHarness::with_store(StoreKind::InMemory).unwrap();
    let app = app_for(&harness);

    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("name=Ann&email=ann%40example.com&mobile=555&message=hello+there"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let stored = harness.contacts.all().await.unwrap();
    assert_eq!(stored[0].email, Some("ann@example.com".into()));
    assert_eq!(stored[0].message, Some("hello there".into()));
}

#[tokio::test]
async fn malformed_json_gets_plain_text_500_without_storing() {
    let harness = TestHarness::with_store(StoreKind::InMemory).unwrap();
    let app = app_for(&harness);

    let request = Request::builder()
        .method("POST")
        .uri("/api/track")
        .header("content-type", "application/json")
        .body(Body::from("{\"type\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, Value::String("Something broke!".to_string()));
    assert_eq!(harness.contacts.count().await.unwrap(), 0);
    assert!(harness.interactions.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn wrong_typed_track_fields_are_stored_as_sent() {
    let harness = TestHarness::with_store(StoreKind::InMemory).unwrap();
    let app = app_for(&harness);

    for body in [
        json!({"type": 5, "page": "/"}),
        json!({"type": "click", "metadata": "x"}),
        json!({"type": "click", "sessionId": 123, "metadata": false}),
    ] {
        let (status, response) = send(&app, post_json("/api/track", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({"success": true}));
    }

    let raw = harness.store.read_all(Collection::Interactions).await.unwrap();
    assert_eq!(raw.len(), 3);
    assert_eq!(raw[0]["type"], 5);
    assert_eq!(raw[1]["metadata"], json!({}));
    assert_eq!(raw[2]["sessionId"], 123);
    assert_eq!(raw[2]["metadata"], json!({}));

    // A numeric type is kept but never counted as a click or page view.
    let (_, analytics) = send(&app, get("/api/analytics")).await;
    assert_eq!(analytics["clicks"], 2);
    assert_eq!(analytics["pageViews"], 0);
    assert_eq!(analytics["recentInteractions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn wrong_typed_contact_fields_are_stored_as_sent() {
    let harness = TestHarness::with_store(StoreKind::InMemory).unwrap();
    let app = app_for(&harness);

    let (status, body) = send(
        &app,
        post_json(
            "/api/contact",
            json!({"name": 42, "email": "a@b.com", "mobile": 5551234, "message": "call me"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Message sent successfully");

    let raw = harness.store.read_all(Collection::Contacts).await.unwrap();
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0]["name"], 42);
    assert_eq!(raw[0]["mobile"], 5551234);
    assert_eq!(raw[0]["message"], "call me");

    let (_, analytics) = send(&app, get("/api/analytics")).await;
    assert_eq!(analytics["formSubmits"], 1);
}

#[tokio::test]
async fn storage_failures_use_error_envelopes() {
    let harness = TestHarness::with_store(StoreKind::Failing).unwrap();
    let app = app_for(&harness);

    let (status, body) = send(&app, post_json("/api/track", json!({"type": "click"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "Failed to log interaction"}));

    let (status, body) = send(&app, post_json("/api/contact", json!({"name": "A"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "Failed to send message"}));

    let (status, body) = send(&app, get("/api/analytics")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch analytics"}));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let harness = TestHarness::with_store(StoreKind::InMemory).unwrap();
    let (status, _) = send(&app_for(&harness), get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let harness = TestHarness::with_store(StoreKind::InMemory).unwrap();
    let (status, _) = send(&app_for(&harness), get("/api/track")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let harness = TestHarness::with_store(StoreKind::InMemory).unwrap();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/track")
        .header("origin", "https://example.com")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let response = app_for(&harness).oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert!(response.headers().contains_key("access-control-allow-origin"));
}

/// Sends a raw HTTP/1.1 request and returns the status code.
async fn send_raw(addr: SocketAddr, method: &str, path: &str, body: &str) -> u16 {
    let mut stream = tokio::net::TcpStream::connect(addr).await.expect("connect server");
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\nUser-Agent: raw-client\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(request.as_bytes()).await.expect("write request");
    let mut response = String::new();
    stream.read_to_string(&mut response).await.expect("read response");
    response
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status")
}

#[tokio::test]
async fn served_over_tcp_records_peer_ip() {
    let harness = TestHarness::new().unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

    let state = AppState::new(Arc::clone(&harness.store));
    let server = tokio::spawn(serve(listener, state, async move {
        let _ = stop_rx.await;
    }));

    let status = send_raw(addr, "POST", "/api/track", r#"{"type":"page_view","page":"/"}"#).await;
    assert_eq!(status, 200);

    let stored = harness.interactions.all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].ip, "127.0.0.1");
    assert_eq!(stored[0].user_agent, "raw-client");

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
