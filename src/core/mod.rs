//! Core decision engine - flight mode state and the emergency-return rule

mod engine;
mod event_bus;

pub use engine::DecisionEngine;
pub use event_bus::{EngineEvent, EngineEventKind, EventBus};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sensors::Channel;

/// Authoritative flight mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightMode {
    #[default]
    Normal,
    /// Terminal until an explicit reset
    EmergencyReturn,
}

impl FlightMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightMode::Normal => "NORMAL",
            FlightMode::EmergencyReturn => "EMERGENCY_RETURN",
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, FlightMode::EmergencyReturn)
    }
}

impl fmt::Display for FlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escalation thresholds, fixed for the lifetime of an engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Battery percentage below which the battery is critical
    pub critical_battery: f64,
    /// Distance from home (km) above which return is required
    pub max_distance: f64,
    /// Wind speed (km/h) above which return is required
    pub max_wind: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical_battery: 20.0,
            max_distance: 2.0,
            max_wind: 35.0,
        }
    }
}

/// Most recent value seen on each channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastValues {
    pub battery: f64,
    pub distance: f64,
    pub wind: f64,
}

impl LastValues {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Battery => self.battery,
            Channel::Distance => self.distance,
            Channel::Wind => self.wind,
        }
    }

    fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::Battery => self.battery = value,
            Channel::Distance => self.distance = value,
            Channel::Wind => self.wind = value,
        }
    }
}

impl Default for LastValues {
    fn default() -> Self {
        Self {
            battery: Channel::Battery.default_value(),
            distance: Channel::Distance.default_value(),
            wind: Channel::Wind.default_value(),
        }
    }
}

/// Consistent snapshot of the engine, taken under one read lock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub mode: FlightMode,
    pub return_triggered: bool,
    pub thresholds: Thresholds,
    pub last_values: LastValues,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_mode_wire_names() {
        assert_eq!(serde_json::to_string(&FlightMode::Normal).unwrap(), "\"NORMAL\"");
        assert_eq!(
            serde_json::to_string(&FlightMode::EmergencyReturn).unwrap(),
            "\"EMERGENCY_RETURN\""
        );
        assert_eq!(FlightMode::EmergencyReturn.to_string(), "EMERGENCY_RETURN");
    }

    #[test]
    fn test_flight_mode_default_and_severity() {
        assert_eq!(FlightMode::default(), FlightMode::Normal);
        assert!(!FlightMode::Normal.is_emergency());
        assert!(FlightMode::EmergencyReturn.is_emergency());
    }

    #[test]
    fn test_default_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.critical_battery, 20.0);
        assert_eq!(t.max_distance, 2.0);
        assert_eq!(t.max_wind, 35.0);
    }

    #[test]
    fn test_last_values_by_channel() {
        let mut values = LastValues::default();
        values.set(Channel::Wind, 12.5);
        assert_eq!(values.get(Channel::Wind), 12.5);
        assert_eq!(values.get(Channel::Battery), 100.0);
        assert_eq!(values.get(Channel::Distance), 0.0);
    }
}
