//! Property-based tests for the decision engine.
//!
//! Random reading sequences are replayed against a fresh engine and the
//! escalation rule is checked against a straightforward model.

use homeward::{Channel, DecisionEngine, FlightMode, SensorReading};
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_channel()(variant in 0..3u8) -> Channel {
        match variant {
            0 => Channel::Battery,
            1 => Channel::Distance,
            _ => Channel::Wind,
        }
    }
}

prop_compose! {
    fn arbitrary_reading()(channel in arbitrary_channel(), value in -50.0..500.0f64) -> SensorReading {
        SensorReading::new(channel, value)
    }
}

proptest! {
    #[test]
    fn emergency_is_sticky(
        before in prop::collection::vec(arbitrary_reading(), 0..20),
        after in prop::collection::vec(arbitrary_reading(), 1..20),
    ) {
        let engine = DecisionEngine::default();
        for reading in &before {
            engine.ingest_reading(*reading);
        }
        engine.update_battery(10.0);
        engine.update_distance(10.0);
        prop_assert_eq!(engine.mode(), FlightMode::EmergencyReturn);

        for reading in &after {
            prop_assert_eq!(engine.ingest_reading(*reading), FlightMode::EmergencyReturn);
        }
        prop_assert!(engine.status().return_triggered);
    }

    #[test]
    fn healthy_battery_never_escalates(
        battery in 20.0..=100.0f64,
        distance in 0.0..1e6f64,
        wind in 0.0..1e6f64,
    ) {
        let engine = DecisionEngine::default();
        engine.update_distance(distance);
        engine.update_wind(wind);
        prop_assert_eq!(engine.update_battery(battery), FlightMode::Normal);
        prop_assert!(!engine.status().return_triggered);
    }

    #[test]
    fn critical_battery_escalates_on_either_aggravator(
        battery in 0.0..19.99f64,
        distance in 0.0..10.0f64,
        wind in 0.0..80.0f64,
    ) {
        let engine = DecisionEngine::default();
        engine.update_distance(distance);
        engine.update_wind(wind);

        let expected = if distance > 2.0 || wind > 35.0 {
            FlightMode::EmergencyReturn
        } else {
            FlightMode::Normal
        };
        prop_assert_eq!(engine.update_battery(battery), expected);
    }

    #[test]
    fn mode_and_flag_agree(readings in prop::collection::vec(arbitrary_reading(), 0..40)) {
        let engine = DecisionEngine::default();
        for reading in readings {
            engine.ingest_reading(reading);
            let status = engine.status();
            prop_assert_eq!(status.return_triggered, status.mode == FlightMode::EmergencyReturn);
            prop_assert_eq!(status.last_values.get(reading.channel), reading.value);
        }
    }

    #[test]
    fn reset_restores_construction_state(readings in prop::collection::vec(arbitrary_reading(), 0..40)) {
        let fresh = DecisionEngine::default().status();
        let engine = DecisionEngine::default();
        for reading in readings {
            engine.ingest_reading(reading);
        }
        engine.reset();
        prop_assert_eq!(engine.status(), fresh);
        engine.reset();
        prop_assert_eq!(engine.status(), fresh);
    }
}
