//! Core record types for flightplot.
//!
//! This module defines the flight telemetry record and its wire format:
//! one JSON object per log line, carrying a timestamp plus nested altitude
//! and flight readings.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// The fixed timestamp format used by the flight log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A single flight telemetry record.
///
/// Records keep the order they appear in the log file; the log is assumed
/// chronological and is never re-sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    /// When this reading was taken. The log carries no zone; naive
    /// timestamps are interpreted as UTC.
    pub timestamp: DateTime<Utc>,

    /// The current altitude reading, in the logger's raw units.
    pub current_altitude: i64,

    /// The zero-reference altitude reading.
    pub zero_altitude: i64,

    /// Ground speed.
    pub speed: f64,

    /// Whether the exceeded-speed alarm was raised at this instant.
    pub speed_alarm: bool,
}

impl FlightRecord {
    /// Parse one log line into a record.
    ///
    /// `line` is the 1-based line number, used only for error context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLine`] if the line is not valid JSON or is
    /// missing a required field, and [`Error::TimestampFormat`] if the
    /// timestamp string does not match [`TIMESTAMP_FORMAT`].
    pub fn parse(line: usize, text: &str) -> Result<Self> {
        let raw: RawRecord =
            serde_json::from_str(text).map_err(|source| Error::malformed_line(line, source))?;

        let timestamp = NaiveDateTime::parse_from_str(&raw.timestamp, TIMESTAMP_FORMAT)
            .map_err(|source| Error::timestamp_format(line, raw.timestamp.as_str(), source))?
            .and_utc();

        Ok(Self {
            timestamp,
            current_altitude: raw.message.altitude.current,
            zero_altitude: raw.message.altitude.zero,
            speed: raw.message.flight.speed,
            speed_alarm: raw.message.flight.speed_alarm,
        })
    }

    /// The altitude relative to the zero reference.
    #[must_use]
    pub fn relative_altitude(&self) -> i64 {
        self.current_altitude - self.zero_altitude
    }
}

/// Wire format of one log line.
///
/// Numeric fields arrive either as JSON numbers or as numeric strings;
/// both forms occur in real logs, so the deserializers below take either.
#[derive(Debug, Deserialize)]
struct RawRecord {
    timestamp: String,
    message: RawMessage,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(rename = "Altitude")]
    altitude: RawAltitude,
    #[serde(rename = "Flight")]
    flight: RawFlight,
}

#[derive(Debug, Deserialize)]
struct RawAltitude {
    #[serde(deserialize_with = "int_flexible")]
    current: i64,
    #[serde(deserialize_with = "int_flexible")]
    zero: i64,
}

#[derive(Debug, Deserialize)]
struct RawFlight {
    #[serde(deserialize_with = "float_flexible")]
    speed: f64,
    #[serde(rename = "speedAlarm", deserialize_with = "alarm_flexible")]
    speed_alarm: bool,
}

/// Deserialize an integer that may arrive as a number or a numeric string.
fn int_flexible<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        String(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(i) => Ok(i),
        IntOrString::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("invalid integer value {s:?}"))),
    }
}

/// Deserialize a float that may arrive as a number or a numeric string.
fn float_flexible<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FloatOrString {
        Float(f64),
        String(String),
    }

    match FloatOrString::deserialize(deserializer)? {
        FloatOrString::Float(f) => Ok(f),
        FloatOrString::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid float value {s:?}"))),
    }
}

/// Deserialize the 0/1 alarm flag. Accepts `0`/`1` numbers, `"0"`/`"1"`
/// strings, and JSON booleans.
fn alarm_flexible<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AlarmValue {
        Bool(bool),
        Int(i64),
        String(String),
    }

    let flag = match AlarmValue::deserialize(deserializer)? {
        AlarmValue::Bool(b) => b,
        AlarmValue::Int(0) => false,
        AlarmValue::Int(1) => true,
        AlarmValue::Int(other) => {
            return Err(D::Error::custom(format!(
                "invalid speed alarm value {other}, expected 0 or 1"
            )))
        }
        AlarmValue::String(s) => match s.trim() {
            "0" => false,
            "1" => true,
            other => {
                return Err(D::Error::custom(format!(
                    "invalid speed alarm value {other:?}, expected 0 or 1"
                )))
            }
        },
    };
    Ok(flag)
}
