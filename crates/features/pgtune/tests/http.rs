#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use psf_domain::config::ApiConfig;
use psf_kernel::server::ApiState;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let mut cfg = ApiConfig::default();
    cfg.pgtune.total_memory = Some("8388608kB".into());

    let state = ApiState::builder()
        .config(cfg.clone())
        .register_slice(psf_pgtune::init(&cfg).unwrap())
        .build()
        .unwrap();

    let (router, _) = psf_pgtune::handlers::router().with_state(state).split_for_parts();
    router
}

async fn post(body: Value) -> (StatusCode, Value) {
    let request = Request::post("/api/pgtune")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn tunes_with_configured_defaults() {
    let (status, body) = post(json!({ "dbType": "web" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["max_connections"], 200);
    assert_eq!(body["memory"]["shared_buffers"], "2GB");
    assert_eq!(body["wal_buffers"], "-1");
}

#[tokio::test]
async fn rejects_invalid_workload_with_bad_request() {
    let (status, body) = post(json!({ "dbType": "batch" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Bad value (batch)"));
}

#[tokio::test]
async fn rejects_memory_too_large_to_size() {
    let (status, body) =
        post(json!({ "dbType": "web", "totalMemory": "99999999999999999kB", "machine": "sparc64" }))
            .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("pgtune.total_memory"));
}
