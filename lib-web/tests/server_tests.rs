// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use beacon_hid::{Color, ColorDriver, HidOutputReport, LightError, LightTransport};
use beacon_web::router;
use lib_base::BlinkController;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// Transport that records the exact on-wire frames
#[derive(Default)]
struct RecordingTransport {
    frames: Mutex<Vec<Vec<u8>>>,
}

impl RecordingTransport {
    fn frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().unwrap().clone()
    }
}

impl LightTransport for RecordingTransport {
    fn write_report(&self, report: &dyn HidOutputReport) -> Result<usize, LightError> {
        let mut frame = vec![report.report_id()];
        frame.extend_from_slice(&report.to_buffer());
        let len = frame.len();
        self.frames.lock().unwrap().push(frame);
        Ok(len)
    }
}

fn frame_for(color: &Color) -> Vec<u8> {
    let rgb = color.to_rgb();
    vec![0x00, 0x01, 0xFF, rgb[0], rgb[1], rgb[2], 0x00, 0x00, 0x00]
}

fn test_app() -> (Router, Arc<RecordingTransport>, BlinkController) {
    let transport = Arc::new(RecordingTransport::default());
    let controller = BlinkController::new(ColorDriver::new(transport.clone()));
    (router(controller.clone()), transport, controller)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_color_command_sets_steady_color() {
    let (app, transport, _controller) = test_app();

    let response = app
        .oneshot(post_json("/command/color", r#"{"color":"blue"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
    assert_eq!(transport.frames(), vec![frame_for(&Color::Blue)]);
}

#[tokio::test]
async fn test_color_command_accepts_unknown_color() {
    let (app, transport, _controller) = test_app();

    let response = app
        .oneshot(post_json("/command/color", r#"{"color":"turquoise"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(transport.frames(), vec![frame_for(&Color::Off)]);
}

#[tokio::test]
async fn test_color_command_missing_field_is_bad_request() {
    let (app, transport, _controller) = test_app();

    let response = app
        .oneshot(post_json("/command/color", r#"{"colour":"red"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(transport.frames().is_empty());
}

#[tokio::test]
async fn test_color_command_invalid_json_is_bad_request() {
    let (app, transport, _controller) = test_app();

    let response = app
        .oneshot(post_json("/command/color", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(transport.frames().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_blink_command_acknowledges_immediately() {
    let (app, transport, controller) = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/command/blink",
            r#"{"color":"red","onDuration":500,"offDuration":500,"count":0}"#,
        ))
        .await
        .unwrap();

    // Acknowledged without waiting for the (infinite) blink
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
    assert!(!controller.is_idle().await);

    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert!(transport.frames().len() >= 3);
}

#[tokio::test(start_paused = true)]
async fn test_finite_blink_over_http() {
    let (app, transport, controller) = test_app();

    let response = app
        .oneshot(post_json(
            "/command/blink",
            r#"{"color":"red","onDuration":500,"offDuration":500,"count":3}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(3500)).await;

    // Exactly 3 on/off cycles, then idle
    let expected = vec![
        frame_for(&Color::Red),
        frame_for(&Color::Off),
        frame_for(&Color::Red),
        frame_for(&Color::Off),
        frame_for(&Color::Red),
        frame_for(&Color::Off),
    ];
    assert_eq!(transport.frames(), expected);
    assert!(controller.is_idle().await);
}

#[tokio::test(start_paused = true)]
async fn test_stop_blink_over_http() {
    let (app, transport, controller) = test_app();

    app.clone()
        .oneshot(post_json(
            "/command/blink",
            r#"{"color":"green","onDuration":100,"offDuration":100,"count":0}"#,
        ))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(450)).await;

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/command/stop-blink")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(controller.is_idle().await);
    assert_eq!(transport.frames().last().unwrap(), &frame_for(&Color::Off));

    let settled = transport.frames().len();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(transport.frames().len(), settled);
}

#[tokio::test(start_paused = true)]
async fn test_color_command_supersedes_blink() {
    let (app, transport, controller) = test_app();

    app.clone()
        .oneshot(post_json(
            "/command/blink",
            r#"{"color":"red","onDuration":500,"offDuration":500,"count":0}"#,
        ))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let response = app
        .oneshot(post_json("/command/color", r#"{"color":"blue"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(controller.is_idle().await);

    let frames = transport.frames();
    assert_eq!(frames.last().unwrap(), &frame_for(&Color::Blue));

    // Steady blue thereafter
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(transport.frames().len(), frames.len());
}

#[tokio::test]
async fn test_api_prefix_alias() {
    let (app, transport, _controller) = test_app();

    let response = app
        .oneshot(post_json("/api/v1.5/command/color", r#"{"color":"green"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(transport.frames(), vec![frame_for(&Color::Green)]);
}

#[tokio::test]
async fn test_health() {
    let (app, _transport, _controller) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (app, _transport, _controller) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/command/unknown")
                .method(Method::POST)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preflight_is_answered() {
    let (app, _transport, _controller) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/command/color")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
