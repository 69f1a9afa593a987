use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use psf::domain::config::{ApiConfig, SslConfig};
use psf_server::Server;
use serde_json::{Value, json};
use std::io::Write;
use tower::ServiceExt;

fn server() -> Server {
    let mut catalog = tempfile::NamedTempFile::new().unwrap();
    catalog
        .write_all(
            br#"{
                "benefits": [ { "id": "logo" }, { "id": "booth" }, { "id": "blog", "cost": 300 } ],
                "packages": [ { "id": "gold", "cost": 5000, "benefits": ["logo", "booth"] } ]
            }"#,
        )
        .unwrap();

    let mut cfg = ApiConfig::default();
    cfg.sponsorship.catalog = Some(catalog.path().to_path_buf());
    cfg.pgtune.total_memory = Some("4194304kB".into());

    Server::builder().config(cfg).build().unwrap()
}

async fn call(request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = server().router().oneshot(request).await.unwrap();
    let status = response.status();
    (status, to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec())
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, bytes) = call(request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn registers_every_slice() {
    let server = server();
    let names = server.state().slice_names();
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|name| name.ends_with("Sponsorship")));
    assert!(names.iter().any(|name| name.ends_with("Pgtune")));
}

#[test]
fn missing_certificate_fails_the_build() {
    let mut cfg = ApiConfig::default();
    cfg.server.ssl = Some(SslConfig { cert: "/nonexistent/cert.pem".into(), key: "/nonexistent/key.pem".into() });

    let err = Server::builder().config(cfg).build().unwrap_err();
    assert!(err.to_string().contains("SSL certificate not found"));
}

#[tokio::test]
async fn health_reports_up() {
    let (status, bytes) = call(Request::get("/health").body(Body::empty()).unwrap()).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
}

#[tokio::test]
async fn serves_sponsorship_and_tuning_routes() {
    let (status, body) =
        post_json("/api/sponsorship/cost", json!({ "package": "gold", "benefits": ["logo", "booth"] }))
            .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cost"], 5000);

    let (status, body) = post_json("/api/pgtune", json!({ "dbType": "oltp" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["max_connections"], 300);
    assert_eq!(body["memory"]["shared_buffers"], "1GB");
}

#[tokio::test]
async fn openapi_document_lists_feature_paths() {
    let (status, bytes) = call(Request::get("/api").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);

    let page = String::from_utf8(bytes).unwrap();
    assert!(page.contains("/api/sponsorship/cost"));
    assert!(page.contains("/api/pgtune"));
}
