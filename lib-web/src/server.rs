// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use beacon_hid::{Color, LightError};
use lib_base::{BlinkController, BlinkSpec};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Steady color command
#[derive(Debug, Deserialize)]
pub struct ColorCommand {
    pub color: Color,
}

/// Blink command. Field names match the wire format used by existing clients.
#[derive(Debug, Deserialize)]
pub struct BlinkCommand {
    pub color: Color,
    #[serde(rename = "onDuration")]
    pub on_duration: i64,
    #[serde(rename = "offDuration")]
    pub off_duration: i64,
    pub count: i32,
}

/// Errors reported to HTTP callers
#[derive(Debug)]
pub enum ApiError {
    /// Missing or invalid JSON fields; does not affect server state
    Malformed(String),
    /// Device write failed; the command was still applied to the controller
    Device(LightError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<LightError> for ApiError {
    fn from(err: LightError) -> Self {
        ApiError::Device(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Malformed(message) => {
                log::warn!("Malformed request: {}", message);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Device(err) => {
                log::error!("Device error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// Shared server state
struct ServerState {
    controller: BlinkController,
}

/// HTTP command server for the status light
pub struct WebServer {
    controller: BlinkController,
    bind_address: String,
    port: u16,
}

impl WebServer {
    /// Create a new web server
    pub fn new(controller: BlinkController, bind_address: impl Into<String>, port: u16) -> Self {
        Self {
            controller,
            bind_address: bind_address.into(),
            port,
        }
    }

    /// Run the web server
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.controller);

        let addr = format!("{}:{}", self.bind_address, self.port);
        log::info!("Starting command server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Build the command router. Routes are mounted both at `/command` and at the
/// `/api/v1.5/command` prefix used by existing clients.
pub fn router(controller: BlinkController) -> Router {
    let state = Arc::new(ServerState { controller });

    let commands = Router::new()
        .route("/color", post(color_handler))
        .route("/blink", post(blink_handler))
        .route("/stop-blink", post(stop_blink_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/command", commands.clone())
        .nest("/api/v1.5/command", commands)
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Supersede any blink and assert a steady color
async fn color_handler(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<ColorCommand>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(command) = payload?;

    state.controller.set_steady(&command.color).await?;
    Ok("OK")
}

/// Supersede any blink and start a new one. Acknowledged immediately; the
/// blink runs in the background.
async fn blink_handler(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<BlinkCommand>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(command) = payload?;

    let spec = BlinkSpec::new(
        command.color,
        command.on_duration,
        command.off_duration,
        command.count,
    );
    state.controller.start_blink(spec).await;
    Ok("OK")
}

/// Cancel any blink and force the light dark
async fn stop_blink_handler(
    State(state): State<Arc<ServerState>>,
) -> Result<&'static str, ApiError> {
    state.controller.stop_blink().await?;
    Ok("OK")
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    "OK"
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
