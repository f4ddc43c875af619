//! HTTP API tests, driving the router directly with `oneshot`.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use verif_qr::{
    RenderConfig, Renderer, logger,
    server::{AppState, ServerConfig, router},
};

struct TestServer {
    tmp: TempDir,
    app: Router,
}

impl TestServer {
    fn new() -> Self {
        logger::init_for_testing();
        let tmp = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            images_dir: tmp.path().join("qr-images"),
            images_base_url: "http://localhost:8080/images".to_string(),
            pdf_dir: tmp.path().join("pdfs"),
            download_base_url: "http://localhost:8080/download/".to_string(),
            static_dir: tmp.path().join("static"),
        };
        let renderer = Renderer::with_logo(
            RenderConfig {
                logo_path: None,
                ..Default::default()
            },
            None,
        );
        let app = router(Arc::new(AppState::new(config, renderer)));
        Self { tmp, app }
    }

    async fn get(&self, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body)
    }

    async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, headers, body) = self.get(uri).await;
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        (status, serde_json::from_slice(&body).unwrap())
    }
}

#[tokio::test]
async fn test_generate_image() {
    let server = TestServer::new();
    let (status, json) = server.get_json("/generate-qr-image?reference=att-doc-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert_eq!(data["reference"], "ATT-DOC-1");

    let name = data["imageName"].as_str().unwrap();
    assert!(name.starts_with("QR_IMG_ATT-DOC-1_"), "{}", name);
    assert!(name.ends_with(".png"));
    assert_eq!(
        data["accessUrl"],
        format!("http://localhost:8080/images/{}", name)
    );

    let base64_image = data["base64Image"].as_str().unwrap();
    assert_eq!(data["base64Size"], base64_image.len());
    let png = STANDARD.decode(base64_image).unwrap();
    assert_eq!(&png[1..4], b"PNG");

    // The stored file is the same PNG.
    let stored = std::fs::read(server.tmp.path().join("qr-images").join(name)).unwrap();
    assert_eq!(stored, png);

    // And it is served back.
    let (status, headers, body) = server.get(&format!("/images/{}", name)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=3600");
    assert_eq!(body.as_ref(), png.as_slice());
}

#[tokio::test]
async fn test_generate_pdf_download_and_list() {
    let server = TestServer::new();
    let (status, json) = server.get_json("/generate-qr?reference=ATT-DOCUMENT-001").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["reference"], "ATT-DOCUMENT-001");
    let name = data["fileName"].as_str().unwrap().to_string();
    assert!(name.starts_with("QR_ATT-DOCUMENT-001_"));
    assert_eq!(
        data["pdfUrl"],
        format!("http://localhost:8080/download/{}", name)
    );

    let path = server.tmp.path().join("pdfs").join(&name);
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(data["fileSize"], bytes.len() as u64);
    assert_eq!(data["filePath"], path.display().to_string());

    let (status, headers, body) = server.get(&format!("/download/{}", name)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        format!("inline; filename=\"{}\"", name).as_str()
    );
    assert_eq!(body.as_ref(), bytes.as_slice());

    let (status, json) = server.get_json("/list-generated").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!([name]));
}

#[tokio::test]
async fn test_invalid_references_are_rejected() {
    let server = TestServer::new();
    let too_long = format!("/generate-qr?reference={}", "A".repeat(51));

    for uri in [
        "/generate-qr",
        "/generate-qr-image",
        "/generate-qr?reference=",
        "/generate-qr-image?reference=%20%20",
        "/generate-qr?reference=a.b",
        "/generate-qr-image?reference=ref%2Fpath",
        too_long.as_str(),
    ] {
        let (status, json) = server.get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["success"], false, "{}", uri);
        assert!(json.get("data").is_none(), "{}", uri);
    }

    // Nothing was written.
    assert!(!server.tmp.path().join("pdfs").exists());
    assert!(!server.tmp.path().join("qr-images").exists());
}

#[tokio::test]
async fn test_download_validation() {
    let server = TestServer::new();

    let (status, _, _) = server.get("/download/invalid-file.pdf").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = server.get("/download/..%2Fsecret.pdf").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = server
        .get("/download/QR_ATT-TEST123_20240101_120000.pdf")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_image_validation() {
    let server = TestServer::new();

    let (status, _, _) = server.get("/images/evil.png").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = server.get("/images/QR_ATT_20240101_120000.png").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = server
        .get("/images/QR_IMG_ATT-DOCUMENT-001_20240321_143022.png")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_without_directory() {
    let server = TestServer::new();
    let (status, json) = server.get_json("/list-generated").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::new();
    let (status, json) = server.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "UP");
    assert_eq!(json["data"]["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_images_health() {
    let server = TestServer::new();

    let (status, headers, body) = server.get("/images/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("Exists: no"), "{}", text);

    server.get("/generate-qr-image?reference=HEALTH").await;
    let (_, _, body) = server.get("/images/health").await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("Exists: yes"), "{}", text);
    assert!(text.contains("Writable: yes"), "{}", text);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = TestServer::new();
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://example.org")
        .body(Body::empty())
        .unwrap();
    let response = server.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_static_files() {
    let server = TestServer::new();
    let dir = server.tmp.path().join("static");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("hello.txt"), "hello").unwrap();

    let (status, _, body) = server.get("/static/hello.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_ref(), b"hello");
}
