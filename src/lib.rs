// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/homeward

//! Homeward - Return-to-Home Safety Monitor
//!
//! A rule-based monitor for unmanned aircraft. Battery, distance-from-home and
//! wind readings arrive independently; the decision engine folds them into a
//! single flight mode that latches into `EMERGENCY_RETURN` once the battery is
//! critical and the aircraft is either too far out or in too much wind.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌────────────────┐
//! │ HTTP server  │ → │ DecisionEngine │ → │   Event Bus    │
//! │ (axum)       │   │ RwLock<State>  │   │ (broadcast)    │
//! └──────────────┘   └────────────────┘   └────────────────┘
//! ```

pub mod config;
pub mod core;
pub mod sensors;
pub mod server;

// Re-exports for convenience
pub use config::Config;
pub use self::core::{DecisionEngine, EngineStatus, EventBus, FlightMode, Thresholds};
pub use sensors::{Channel, SensorReading};
pub use server::{AppState, FieldEncoding, ServerConfig};

/// Homeward version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Homeward name
pub const NAME: &str = "Homeward";
