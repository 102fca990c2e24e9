// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/homeward

//! Decision engine - turns independent sensor updates into a sticky flight mode

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::{EngineStatus, EventBus, FlightMode, LastValues, Thresholds};
use crate::sensors::{Channel, SensorReading};

/// State guarded by the engine lock
#[derive(Debug, Clone, Default)]
struct EngineState {
    mode: FlightMode,
    return_triggered: bool,
    last: LastValues,
}

/// Emergency-return decision engine.
///
/// Mutators (`ingest`, `reset`) take the write lock; `status` takes the read
/// lock. Every call is O(1) and never fails.
pub struct DecisionEngine {
    thresholds: Thresholds,
    state: RwLock<EngineState>,
    event_bus: Option<Arc<EventBus>>,
}

impl DecisionEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            state: RwLock::new(EngineState::default()),
            event_bus: None,
        }
    }

    /// Publish readings, transitions and resets on `event_bus`
    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Record `value` as the latest reading on `channel`, then re-evaluate.
    pub fn ingest(&self, channel: Channel, value: f64) -> FlightMode {
        let reading = SensorReading::new(channel, value);
        let mut state = self.state.write();

        info!("Sensor update: {}", reading);
        state.last.set(channel, value);
        if let Some(bus) = &self.event_bus {
            bus.publish_reading(reading);
        }

        self.evaluate(&mut state)
    }

    pub fn ingest_reading(&self, reading: SensorReading) -> FlightMode {
        self.ingest(reading.channel, reading.value)
    }

    pub fn update_battery(&self, percent: f64) -> FlightMode {
        self.ingest(Channel::Battery, percent)
    }

    pub fn update_distance(&self, km: f64) -> FlightMode {
        self.ingest(Channel::Distance, km)
    }

    pub fn update_wind(&self, kmh: f64) -> FlightMode {
        self.ingest(Channel::Wind, kmh)
    }

    pub fn status(&self) -> EngineStatus {
        let state = self.state.read();
        EngineStatus {
            mode: state.mode,
            return_triggered: state.return_triggered,
            thresholds: self.thresholds,
            last_values: state.last,
        }
    }

    pub fn mode(&self) -> FlightMode {
        self.state.read().mode
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Full re-initialisation; the only way out of `EmergencyReturn`.
    pub fn reset(&self) {
        let mut state = self.state.write();

        info!("Resetting controller");
        *state = EngineState::default();
        if let Some(bus) = &self.event_bus {
            bus.publish_reset();
        }
    }

    // Battery critical is necessary; distance or wind over the limit is sufficient.
    fn evaluate(&self, state: &mut EngineState) -> FlightMode {
        if state.mode.is_emergency() {
            debug!("Already in emergency mode, staying");
            return state.mode;
        }

        let t = &self.thresholds;
        let last = &state.last;

        let battery_critical = last.battery < t.critical_battery;
        debug!(
            "Battery critical? {} ({:.1} < {:.1})",
            battery_critical, last.battery, t.critical_battery
        );
        if !battery_critical {
            debug!("Battery not critical, staying in normal mode");
            return state.mode;
        }

        let distance_exceeded = last.distance > t.max_distance;
        let wind_exceeded = last.wind > t.max_wind;
        debug!(
            "Distance exceeded? {} ({:.2} > {:.1})",
            distance_exceeded, last.distance, t.max_distance
        );
        debug!(
            "Wind exceeded? {} ({:.1} > {:.1})",
            wind_exceeded, last.wind, t.max_wind
        );

        if distance_exceeded || wind_exceeded {
            warn!(
                "EMERGENCY RETURN TRIGGERED (battery={:.1}%, distance={:.2}km, wind={:.1}km/h)",
                last.battery, last.distance, last.wind
            );
            let from = state.mode;
            state.mode = FlightMode::EmergencyReturn;
            state.return_triggered = true;
            if let Some(bus) = &self.event_bus {
                bus.publish_mode_change(from, state.mode);
            }
        } else {
            debug!("Secondary conditions not met, staying in normal mode");
        }

        state.mode
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}
