//! Epoch keys in the OEM native timestamp format
//!
//! The feed stamps every state vector with a UTC time written as year,
//! day-of-year and time of day, e.g. `2024-045T12:04:00.000Z`. The key string
//! is kept verbatim so exact lookups match what clients copy out of
//! `/epochs`, while the parsed instant drives all time arithmetic.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DatasetError;

/// Day-of-year layout used by the feed. `%.f` also accepts a missing fraction.
pub const OEM_EPOCH_FORMAT: &str = "%Y-%jT%H:%M:%S%.f";

/// A state vector timestamp
///
/// Serialized as the original key string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Epoch {
    key: String,
    instant: DateTime<Utc>,
}

impl Epoch {
    /// Parse an OEM timestamp, keeping the original text as the lookup key
    pub fn parse(key: &str) -> Result<Self, DatasetError> {
        let instant = parse_oem_timestamp(key).ok_or_else(|| DatasetError::InvalidEpoch {
            epoch: key.to_string(),
        })?;
        Ok(Self {
            key: key.to_string(),
            instant,
        })
    }

    /// Build an epoch from an instant, rendering the key with millisecond precision
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self {
            key: instant.format("%Y-%jT%H:%M:%S%.3fZ").to_string(),
            instant,
        }
    }

    /// Original key text
    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Absolute distance between this epoch and a reference instant
    pub fn distance_to(&self, reference: DateTime<Utc>) -> Duration {
        (self.instant - reference).abs()
    }
}

/// Parse `YYYY-DDDTHH:MM:SS[.fff][Z]` into a UTC instant.
pub fn parse_oem_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    let body = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    NaiveDateTime::parse_from_str(body, OEM_EPOCH_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

impl FromStr for Epoch {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Epoch::parse(s)
    }
}

impl TryFrom<String> for Epoch {
    type Error = DatasetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Epoch::parse(&value)
    }
}

impl From<Epoch> for String {
    fn from(epoch: Epoch) -> Self {
        epoch.key
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}
