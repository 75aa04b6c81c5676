//! Core data types for the sensorlog storage layer
//!
//! This module defines the fundamental types used throughout the crate:
//! - `MeasurementKind`: The physical quantity a sensor reports
//! - `SensorIdentity`: Names one logged reading series
//! - `Reading`: A single (timestamp, value) sample

use serde::{Deserialize, Serialize};

/// The physical quantity reported in a sensor event
///
/// Wireless sensor hubs report measurements as one of seven well-known
/// quantities, but firmware updates can introduce new ones. Tokens the hub
/// sends that are not in the table are carried through as `Other` rather
/// than rejected, so their logs stay readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Temperature,
    Humidity,
    RainRate,
    RainTotal,
    WindDirection,
    WindAverage,
    WindGust,
    /// A measurement token not in the fixed table, preserved as stored
    #[serde(untagged)]
    Other(String),
}

impl MeasurementKind {
    /// The lowercase token used in storage keys and API payloads
    pub fn token(&self) -> &str {
        match self {
            MeasurementKind::Temperature => "temperature",
            MeasurementKind::Humidity => "humidity",
            MeasurementKind::RainRate => "rainrate",
            MeasurementKind::RainTotal => "raintotal",
            MeasurementKind::WindDirection => "winddirection",
            MeasurementKind::WindAverage => "windaverage",
            MeasurementKind::WindGust => "windgust",
            MeasurementKind::Other(token) => token,
        }
    }

    /// Parse a token, matching the fixed table case-insensitively.
    ///
    /// Unrecognized tokens are not an error; they become `Other` with the
    /// original casing preserved.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "temperature" => MeasurementKind::Temperature,
            "humidity" => MeasurementKind::Humidity,
            "rainrate" => MeasurementKind::RainRate,
            "raintotal" => MeasurementKind::RainTotal,
            "winddirection" => MeasurementKind::WindDirection,
            "windaverage" => MeasurementKind::WindAverage,
            "windgust" => MeasurementKind::WindGust,
            _ => MeasurementKind::Other(token.to_string()),
        }
    }

    /// Map the sensor hub's bitmask datatype code to a kind.
    ///
    /// The hub reports datatypes as single-bit codes; anything else is a
    /// code this crate does not know about and the caller should drop.
    pub fn from_hub_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(MeasurementKind::Temperature),
            2 => Some(MeasurementKind::Humidity),
            4 => Some(MeasurementKind::RainRate),
            8 => Some(MeasurementKind::RainTotal),
            16 => Some(MeasurementKind::WindDirection),
            32 => Some(MeasurementKind::WindAverage),
            64 => Some(MeasurementKind::WindGust),
            _ => None,
        }
    }
}

impl std::fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // f.pad so width/alignment flags apply to the token
        f.pad(self.token())
    }
}

/// Names one logged reading series
///
/// One physical sensor may report several measurement kinds; each
/// (protocol, model, id, kind) tuple is its own series with its own log
/// file. Locations, by contrast, are shared across a sensor id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SensorIdentity {
    /// Radio protocol the sensor speaks (e.g. "oregon")
    pub protocol: String,
    /// Hardware model identifier (e.g. "1a2d")
    pub model: String,
    /// Numeric sensor id assigned by the hub
    pub id: u32,
    /// Which quantity this series logs
    pub kind: MeasurementKind,
}

impl SensorIdentity {
    pub fn new(
        protocol: impl Into<String>,
        model: impl Into<String>,
        id: u32,
        kind: MeasurementKind,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            model: model.into(),
            id,
            kind,
        }
    }
}

/// A single sensor sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    /// Unix timestamp in whole seconds
    pub timestamp: i64,
    /// The measured value
    pub value: f64,
}

impl Reading {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}
