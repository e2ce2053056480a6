// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests
//!
//! These tests verify that:
//! - The single-page UI is served at /
//! - The health probe responds
//! - Evidence and analyze routes exist and enforce their methods
//! - Unknown routes return 404

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use ghost_trace::api::http_server::{create_app, AppState};
use tower::util::ServiceExt; // for `oneshot`

#[tokio::test]
async fn test_index_serves_page() {
    let app = create_app(AppState::new_for_test());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Ghost-Trace"));
    assert!(html.contains("Run Ghost-Trace Analysis"));
    assert!(
        html.contains("No enhanced image returned"),
        "page must carry the explicit absence notice"
    );
}

#[tokio::test]
async fn test_health_route() {
    let app = create_app(AppState::new_for_test());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_route_rejects_get() {
    let app = create_app(AppState::new_for_test());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/analyze")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_evidence_route_rejects_get() {
    let app = create_app(AppState::new_for_test());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/evidence")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_404() {
    let app = create_app(AppState::new_for_test());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/nothing-here")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
