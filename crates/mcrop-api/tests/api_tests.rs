//! API integration tests.
//!
//! These exercise the router without ffmpeg/ffprobe: every scenario here is
//! rejected by validation before the pipeline would shell out.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

use mcrop_api::{create_router, ApiConfig, AppState};
use mcrop_storage::SequentialIds;

async fn test_state(dir: &TempDir) -> AppState {
    let config = ApiConfig {
        data_dir: dir.path().join("data"),
        ..ApiConfig::default()
    };
    AppState::with_ids(config, Arc::new(SequentialIds::default()))
        .await
        .unwrap()
}

async fn body_string(body: Body) -> String {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir).await);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response.into_body()).await;
    assert!(body.contains("healthy"));
}

#[tokio::test]
async fn test_download_missing_artifact_is_404() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir).await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/download/processed_0.mp4")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_rejects_traversal_names() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir).await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/download/..secret..")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_serves_stored_artifact() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir).await;
    let output = dir.path().join("data").join("output");
    tokio::fs::write(output.join("processed_00.jpg"), b"jpeg bytes")
        .await
        .unwrap();
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/download/processed_00.jpg")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/jpeg"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert_eq!(body_string(response.into_body()).await, "jpeg bytes");
}

#[tokio::test]
async fn test_process_with_missing_upload_prompts_reupload() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir).await);

    let payload = serde_json::json!({
        "uploadPath": "/nonexistent/upload",
        "originalName": "clip.mp4",
        "cropX": 0, "cropY": 0, "cropW": 100, "cropH": 100,
        "origW": 800, "origH": 600
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response.into_body()).await;
    assert!(body.contains("re-upload"), "got: {body}");
}

#[tokio::test]
async fn test_process_with_zero_client_space_is_rejected_and_cleans_up() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir).await;
    let upload = state.store.save_upload(b"not really media").await.unwrap();
    let app = create_router(state);

    // sourceW/sourceH are supplied so the pipeline never probes; the
    // division guard fires first.
    let payload = serde_json::json!({
        "uploadPath": upload.to_str().unwrap(),
        "originalName": "clip.mp4",
        "cropX": 0, "cropY": 0, "cropW": 100, "cropH": 100,
        "origW": 0, "origH": 600,
        "sourceW": 1920, "sourceH": 1080
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!upload.exists(), "failed request must clean up its upload");
}

#[tokio::test]
async fn test_process_with_degenerate_crop_is_rejected() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir).await;
    let upload = state.store.save_upload(b"not really media").await.unwrap();
    let app = create_router(state);

    // Scaled rect lands on the last source pixel: clamps to 1x1, even-aligns
    // to 0x0, rejected.
    let payload = serde_json::json!({
        "uploadPath": upload.to_str().unwrap(),
        "originalName": "photo.jpg",
        "cropX": 99, "cropY": 99, "cropW": 50, "cropH": 50,
        "origW": 100, "origH": 100,
        "sourceW": 100, "sourceH": 100
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preview_without_multipart_body_is_client_error() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir).await);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/preview")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_preview_rejects_disallowed_extension() {
    let dir = TempDir::new().unwrap();
    let app = create_router(test_state(&dir).await);

    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"payload.exe\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         MZ\r\n\
         --{boundary}--\r\n"
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/preview")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response.into_body()).await;
    assert!(body.contains("Unsupported file type"), "got: {body}");
}
