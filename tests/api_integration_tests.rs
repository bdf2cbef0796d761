//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use product_cache::{api::create_router, models::Product, AppState, BoundedCache, PolicyKind};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_state(capacity: usize, policy: PolicyKind) -> AppState {
    AppState::new(BoundedCache::new(capacity, policy))
}

fn create_test_app() -> Router {
    create_router(create_state(100, PolicyKind::Lfu))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn put_product(id: u64, name: &str, price: f64) -> Request<Body> {
    let body = serde_json::json!({ "name": name, "price": price }).to_string();
    Request::builder()
        .method("PUT")
        .uri(format!("/cache/{}", id))
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn invalidate(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/cache/invalidate")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

// == Lookup Tests ==

#[tokio::test]
async fn test_get_seeded_product() {
    let state = create_state(100, PolicyKind::Lfu);
    state.seed(vec![Product::new(1, "Cached Product LFU", 10.0)]);
    let app = create_router(state);

    let response = app.oneshot(get("/cache/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], 1);
    assert_eq!(json["name"], "Cached Product LFU");
    assert_eq!(json["price"], 10.0);
}

#[tokio::test]
async fn test_get_not_found() {
    let app = create_test_app();

    let response = app.oneshot(get("/cache/404")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_get_rejects_non_positive_key() {
    for uri in ["/cache/0", "/cache/-1", "/cache/abc"] {
        let response = create_test_app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
    }
}

// == Populate Tests ==

#[tokio::test]
async fn test_put_then_get() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(put_product(7, "Keyboard", 49.99))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/cache/7")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "Keyboard");
}

#[tokio::test]
async fn test_put_invalid_payload() {
    let app = create_test_app();

    let response = app.oneshot(put_product(7, "", 1.0)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Invalidation Tests ==

#[tokio::test]
async fn test_invalidate_removes_product() {
    let state = create_state(100, PolicyKind::Lfu);
    state.seed(vec![
        Product::new(1, "First", 10.0),
        Product::new(2, "Second", 50.0),
    ]);
    let app = create_router(state);

    let response = app.clone().oneshot(invalidate(r#"{"id":1}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_string(response.into_body()).await, "Invalidated ID: 1");

    let response = app.clone().oneshot(get("/cache/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/cache/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalidate_absent_key_is_ok() {
    let app = create_test_app();

    let response = app.oneshot(invalidate(r#"{"id":99}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_string(response.into_body()).await, "Invalidated ID: 99");
}

#[tokio::test]
async fn test_invalidate_non_positive_id_is_noop() {
    let state = create_state(100, PolicyKind::Lfu);
    state.seed(vec![Product::new(1, "First", 10.0)]);
    let app = create_router(state);

    for (body, expected) in [
        (r#"{"id":-5}"#, "Invalidated ID: -5"),
        (r#"{"id":0}"#, "Invalidated ID: 0"),
    ] {
        let response = app.clone().oneshot(invalidate(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_string(response.into_body()).await, expected);
    }

    let response = app.oneshot(get("/cache/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalidate_malformed_body() {
    for body in ["{not json", r#"{"id":"one"}"#, r#"{}"#, ""] {
        let response = create_test_app().oneshot(invalidate(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
    }
}

#[tokio::test]
async fn test_invalidate_without_content_type() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/invalidate")
                .body(Body::from(r#"{"id":5}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalidate_wrong_method() {
    for method in ["GET", "PUT", "DELETE"] {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/cache/invalidate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "method {}",
            method
        );
    }
}

// == Eviction Tests ==

#[tokio::test]
async fn test_lfu_eviction_via_api() {
    let app = create_router(create_state(2, PolicyKind::Lfu));

    app.clone().oneshot(put_product(1, "One", 1.0)).await.unwrap();
    app.clone().oneshot(put_product(2, "Two", 2.0)).await.unwrap();
    let response = app.clone().oneshot(get("/cache/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    app.clone().oneshot(put_product(3, "Three", 3.0)).await.unwrap();

    let response = app.clone().oneshot(get("/cache/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app.clone().oneshot(get("/cache/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.clone().oneshot(get("/cache/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/stats")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["evictions"], 1);
    assert_eq!(json["total_entries"], 2);
    assert_eq!(json["policy"], "lfu");
}

// == Stats & Health Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_router(create_state(10, PolicyKind::Arc));

    app.clone().oneshot(put_product(1, "One", 1.0)).await.unwrap();
    app.clone().oneshot(get("/cache/1")).await.unwrap();
    app.clone().oneshot(get("/cache/2")).await.unwrap();
    app.clone().oneshot(invalidate(r#"{"id":1}"#)).await.unwrap();

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["invalidations"], 1);
    assert_eq!(json["total_entries"], 0);
    assert_eq!(json["capacity"], 10);
    assert_eq!(json["policy"], "arc");
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Live Server Test ==

#[tokio::test]
async fn test_live_server_round_trip() {
    let state = create_state(10, PolicyKind::Lfu);
    state.seed(vec![Product::new(1, "Cached Product LFU", 10.0)]);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let product: Product = client
        .get(format!("{}/cache/1", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(product, Product::new(1, "Cached Product LFU", 10.0));

    let response = client
        .post(format!("{}/cache/invalidate", base))
        .json(&serde_json::json!({ "id": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Invalidated ID: 1");

    let response = client
        .get(format!("{}/cache/1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    server.abort();
}
