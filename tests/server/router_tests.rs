use std::sync::Arc;

use super::get_json;
use crate::common::MockProber;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;
use website_status_checker::config::ServiceConfig;
use website_status_checker::server::handlers::ROOT_MESSAGE;
use website_status_checker::server::{build_router, AppState};

fn state() -> AppState {
    AppState::new(Arc::new(MockProber::responding(200)))
}

#[tokio::test]
async fn test_root_liveness() {
    let (status, body) = get_json(build_router(state(), &ServiceConfig::default()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], ROOT_MESSAGE);
    assert!(ROOT_MESSAGE.ends_with("running!"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get_json(build_router(state(), &ServiceConfig::default()), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let router = build_router(state(), &ServiceConfig::default());
    let response = router
        .oneshot(
            Request::builder()
                .uri("/check?url=example.com")
                .header(header::ORIGIN, "https://frontend.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_allow_list() {
    let config = ServiceConfig {
        cors_allowed_origins: vec!["https://allowed.example/".to_string()],
        ..Default::default()
    };

    let allowed = build_router(state(), &config)
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "https://allowed.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://allowed.example"
    );

    let denied = build_router(state(), &config)
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_cors_skips_unusable_origin() {
    let config = ServiceConfig {
        cors_allowed_origins: vec!["https://bad\u{1}.example".to_string(), "https://ok.example".to_string()],
        ..Default::default()
    };

    let response = build_router(state(), &config)
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "https://ok.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://ok.example"
    );
}

#[tokio::test]
async fn test_cors_preflight() {
    let response = build_router(state(), &ServiceConfig::default())
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/check")
                .header(header::ORIGIN, "https://frontend.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("GET"));
}

#[test]
fn test_allows_any_origin() {
    let mut config = ServiceConfig::default();
    assert!(config.allows_any_origin());

    config.cors_allowed_origins = vec!["https://a.example".to_string()];
    assert!(!config.allows_any_origin());

    config.cors_allowed_origins.push("*".to_string());
    assert!(config.allows_any_origin());
}
