// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/homeward

//! Sensor channels and readings

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three independent sensor input streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Battery charge remaining
    Battery,
    /// GPS distance from the home point
    Distance,
    /// Anemometer wind speed
    Wind,
}

impl Channel {
    /// All channels, in the order the transport ingests them
    pub const ALL: [Channel; 3] = [Channel::Battery, Channel::Distance, Channel::Wind];

    /// Physical unit of the channel's values
    pub fn unit(&self) -> &'static str {
        match self {
            Channel::Battery => "%",
            Channel::Distance => "km",
            Channel::Wind => "km/h",
        }
    }

    /// Value assumed before the first reading arrives ("no adverse reading yet")
    pub fn default_value(&self) -> f64 {
        match self {
            Channel::Battery => 100.0,
            Channel::Distance => 0.0,
            Channel::Wind => 0.0,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Battery => "battery",
            Channel::Distance => "distance",
            Channel::Wind => "wind",
        };
        f.write_str(name)
    }
}

/// A single reading on one channel.
///
/// Values are not range checked: negative or absurdly large readings are
/// carried through to the engine unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub channel: Channel,
    pub value: f64,
}

impl SensorReading {
    pub fn new(channel: Channel, value: f64) -> Self {
        Self { channel, value }
    }

    pub fn battery(percent: f64) -> Self {
        Self::new(Channel::Battery, percent)
    }

    pub fn distance(km: f64) -> Self {
        Self::new(Channel::Distance, km)
    }

    pub fn wind(kmh: f64) -> Self {
        Self::new(Channel::Wind, kmh)
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel {
            Channel::Distance => write!(f, "{}={:.2}{}", self.channel, self.value, self.channel.unit()),
            _ => write!(f, "{}={:.1}{}", self.channel, self.value, self.channel.unit()),
        }
    }
}
