// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/homeward

//! HTTP transport - maps sensor update, status and reset requests onto the engine

mod error;


pub use error::ApiError;

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::Uri;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{DecisionEngine, EngineStatus};
use crate::sensors::{Channel, SensorReading};

/// Routes served by the controller, as (method, path, description)
pub const ROUTES: &[(&str, &str, &str)] = &[
    ("POST", "/api/v1/sensor/update", "Send sensor data"),
    ("GET", "/api/v1/status", "Get current status"),
    ("POST", "/api/v1/reset", "Reset controller"),
    ("GET", "/health", "Liveness probe"),
];

/// How an update request marks a channel as absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldEncoding {
    /// Missing or `null` means absent; every number is ingested, zero included
    #[default]
    Optional,
    /// Legacy sensor clients: any value `<= 0` means absent
    ZeroSentinel,
}

impl FieldEncoding {
    /// The value to ingest for a field, if any
    pub fn accept(&self, value: Option<f64>) -> Option<f64> {
        match self {
            FieldEncoding::Optional => value,
            FieldEncoding::ZeroSentinel => value.filter(|v| *v > 0.0),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub field_encoding: FieldEncoding,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            field_encoding: FieldEncoding::Optional,
        }
    }
}

/// Partial sensor update; each sensor only fills in its own channel
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SensorUpdateRequest {
    #[serde(default)]
    pub battery_percent: Option<f64>,
    #[serde(default, alias = "distance_to_home")]
    pub distance_to_home_km: Option<f64>,
    #[serde(default, alias = "wind_speed")]
    pub wind_speed_kmh: Option<f64>,
}

impl SensorUpdateRequest {
    /// Readings to ingest, in battery, distance, wind order
    pub fn readings(&self, encoding: FieldEncoding) -> Vec<SensorReading> {
        Channel::ALL
            .into_iter()
            .filter_map(|channel| {
                let raw = match channel {
                    Channel::Battery => self.battery_percent,
                    Channel::Distance => self.distance_to_home_km,
                    Channel::Wind => self.wind_speed_kmh,
                };
                encoding
                    .accept(raw)
                    .map(|value| SensorReading::new(channel, value))
            })
            .collect()
    }
}

/// Readings joined for a single log line, e.g. `battery=19.0%, wind=40.0km/h`
fn summarize(readings: &[SensorReading]) -> String {
    readings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub status: String,
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
    pub field_encoding: FieldEncoding,
}

impl AppState {
    pub fn new(engine: Arc<DecisionEngine>, field_encoding: FieldEncoding) -> Self {
        Self {
            engine,
            field_encoding,
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn update_sensors(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EngineStatus>, ApiError> {
    let req: SensorUpdateRequest = serde_json::from_slice(&body)?;
    let readings = req.readings(state.field_encoding);
    if readings.is_empty() {
        debug!("Update carried no channel values, nothing ingested");
    } else {
        info!("Received sensor update: {}", summarize(&readings));
    }
    for reading in readings {
        state.engine.ingest_reading(reading);
    }

    Ok(Json(state.engine.status()))
}

async fn get_status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.engine.status())
}

async fn reset(State(state): State<AppState>) -> Json<ResetResponse> {
    state.engine.reset();
    Json(ResetResponse {
        status: "reset".to_string(),
    })
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/sensor/update", post(update_sensors))
        .route("/api/v1/status", get(get_status))
        .route("/api/v1/reset", post(reset))
        .fallback(not_found)
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn serve<F>(config: &ServerConfig, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Controller listening on http://{}", listener.local_addr()?);
    for (method, path, about) in ROUTES {
        info!("   {:<4} {:<22} - {}", method, path, about);
    }
    info!("Field encoding: {:?}", state.field_encoding);

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
