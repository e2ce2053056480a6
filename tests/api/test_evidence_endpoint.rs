// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Evidence endpoint tests for POST /v1/evidence
//!
//! These tests verify that the upload handler:
//! - Accepts JPEG and PNG evidence and creates a session
//! - Rejects other containers before any external call is possible
//! - Surfaces corrupt uploads as visible errors
//! - Replaces a session's evidence (and discards its result) on re-upload

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use ghost_trace::api::http_server::{create_app, AppState};
use ghost_trace::session::SessionPhase;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use tower::util::ServiceExt;

const BOUNDARY: &str = "ghost-trace-test-boundary";

fn encode_test_image(format: ImageFormat, w: u32, h: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, image::Rgb([40, 40, 120])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).expect("encode test image");
    buf.into_inner()
}

/// Build a multipart/form-data body with a `file` part and an optional
/// `sessionId` part.
fn multipart_body(
    file: Option<(&str, &[u8])>, // (content type, bytes)
    session_id: Option<&str>,
) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some((content_type, bytes)) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"file\"; filename=\"evidence\"\r\n",
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(id) = session_id {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"sessionId\"\r\n\r\n");
        body.extend_from_slice(id.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/v1/evidence")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn upload(app: &Router, body: Vec<u8>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(upload_request(body)).await.unwrap();
    let status = response.status();
    (status, response_json(response).await)
}

#[tokio::test]
async fn test_upload_jpeg_creates_session() {
    let app = create_app(AppState::new_for_test());

    let jpeg = encode_test_image(ImageFormat::Jpeg, 100, 100);
    let (status, body) = upload(&app, multipart_body(Some(("image/jpeg", &jpeg)), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["width"], 100);
    assert_eq!(body["height"], 100);
    assert_eq!(body["format"], "jpg");
    assert_eq!(body["sizeBytes"], jpeg.len());
    assert!(body["sessionId"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
}

#[tokio::test]
async fn test_upload_png_creates_session() {
    let app = create_app(AppState::new_for_test());

    let png = encode_test_image(ImageFormat::Png, 64, 32);
    let (status, body) = upload(&app, multipart_body(Some(("image/png", &png)), None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["width"], 64);
    assert_eq!(body["height"], 32);
    assert_eq!(body["format"], "png");
}

#[tokio::test]
async fn test_upload_gif_rejected() {
    let app = create_app(AppState::new_for_test());

    // Declared as PNG but carrying GIF magic bytes; the magic-byte gate wins
    let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00";
    let (status, body) = upload(&app, multipart_body(Some(("image/png", gif)), None)).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error_type"], "unsupported_media_type");
}

#[tokio::test]
async fn test_upload_wrong_content_type_rejected() {
    let app = create_app(AppState::new_for_test());

    let (status, body) = upload(
        &app,
        multipart_body(Some(("application/pdf", b"%PDF-1.4")), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["message"].as_str().unwrap().contains("application/pdf"));
}

#[tokio::test]
async fn test_upload_corrupt_png_rejected() {
    let app = create_app(AppState::new_for_test());

    // PNG magic bytes followed by garbage
    let corrupt = [0x89, 0x50, 0x4E, 0x47, 0x00, 0x00, 0x00, 0x00];
    let (status, body) = upload(&app, multipart_body(Some(("image/png", &corrupt)), None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_request");
}

#[tokio::test]
async fn test_upload_missing_file_rejected() {
    let app = create_app(AppState::new_for_test());

    let (status, body) = upload(&app, multipart_body(None, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
    assert!(body["message"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn test_upload_ignores_unknown_field() {
    let app = create_app(AppState::new_for_test());

    let png = encode_test_image(ImageFormat::Png, 10, 10);

    // A field the handler has no use for, ahead of the real file part
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"note\"\r\n\r\n");
    body.extend_from_slice(b"dashcam frame 0231\r\n");
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"evidence\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(&png);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let (status, body) = upload(&app, body).await;

    assert_eq!(status, StatusCode::OK, "unknown fields must not fail the upload");
    assert_eq!(body["width"], 10);
    assert!(body["sessionId"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());
}

#[tokio::test]
async fn test_upload_invalid_session_id_rejected() {
    let app = create_app(AppState::new_for_test());

    let png = encode_test_image(ImageFormat::Png, 4, 4);
    let (status, body) = upload(
        &app,
        multipart_body(Some(("image/png", &png)), Some("not-a-uuid")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn test_reupload_replaces_evidence_and_clears_result() {
    let state = AppState::new_for_test();
    let app = create_app(state.clone());

    let jpeg = encode_test_image(ImageFormat::Jpeg, 100, 100);
    let (status, body) = upload(&app, multipart_body(Some(("image/jpeg", &jpeg)), None)).await;
    assert_eq!(status, StatusCode::OK);
    let id: uuid::Uuid = body["sessionId"].as_str().unwrap().parse().unwrap();

    // Simulate a completed run
    let stored = state
        .sessions
        .set_result(
            &id,
            ghost_trace::session::AnalysisResult {
                report: "Plate: XY-123".to_string(),
                enhanced: None,
            },
        )
        .await;
    assert!(stored);
    assert_eq!(
        state.sessions.get(&id).await.unwrap().phase(),
        SessionPhase::Done
    );

    // Re-upload a different image into the same session
    let png = encode_test_image(ImageFormat::Png, 50, 50);
    let (status, body) = upload(
        &app,
        multipart_body(Some(("image/png", &png)), Some(&id.to_string())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sessionId"], id.to_string());
    assert_eq!(body["format"], "png");

    // Session is back in the pre-run state
    let session = state.sessions.get(&id).await.unwrap();
    assert_eq!(session.phase(), SessionPhase::Loaded);
    assert!(session.result.is_none());
    assert_eq!(session.evidence.width, 50);
}

#[tokio::test]
async fn test_session_endpoint_unknown_id() {
    let app = create_app(AppState::new_for_test());

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/v1/session/{}", uuid::Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_endpoint_reports_loaded_phase() {
    let app = create_app(AppState::new_for_test());

    let png = encode_test_image(ImageFormat::Png, 8, 8);
    let (_, body) = upload(&app, multipart_body(Some(("image/png", &png)), None)).await;
    let id = body["sessionId"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/v1/session/{}", id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["phase"], "loaded");
    assert!(body["result"].is_null());
}
