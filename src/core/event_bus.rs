// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/homeward

//! Event bus for engine notifications

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::FlightMode;
use crate::sensors::SensorReading;

/// What happened inside the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEventKind {
    Reading(SensorReading),
    ModeChanged { from: FlightMode, to: FlightMode },
    Reset,
}

/// Engine event with sequence id and wall-clock time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineEvent {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub kind: EngineEventKind,
}

/// Broadcast bus for engine events.
///
/// Publishing never blocks; events sent with no subscribers are dropped.
pub struct EventBus {
    event_tx: broadcast::Sender<EngineEvent>,
    event_counter: AtomicU64,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity);

        Self {
            event_tx,
            event_counter: AtomicU64::new(0),
        }
    }

    pub fn publish_reading(&self, reading: SensorReading) {
        self.publish(EngineEventKind::Reading(reading));
    }

    pub fn publish_mode_change(&self, from: FlightMode, to: FlightMode) {
        self.publish(EngineEventKind::ModeChanged { from, to });
    }

    pub fn publish_reset(&self) {
        self.publish(EngineEventKind::Reset);
    }

    fn publish(&self, kind: EngineEventKind) {
        let id = self.event_counter.fetch_add(1, Ordering::Relaxed);
        let event = EngineEvent {
            id,
            timestamp: Utc::now(),
            kind,
        };
        let _ = self.event_tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
