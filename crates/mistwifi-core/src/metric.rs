// ── Metric point types ──
//
// What a collector hands to an accumulator: a measurement name, ordered
// tag and field maps, and the time the point was accepted.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Tag set, in insertion order.
pub type Tags = IndexMap<String, String>;

/// Field set, in insertion order.
pub type Fields = IndexMap<String, FieldValue>;

/// A numeric field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        Self::Unsigned(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// One metric point as received by an accumulator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEvent {
    pub measurement: String,
    pub tags: Tags,
    pub fields: Fields,
    pub timestamp: DateTime<Utc>,
}

impl MetricEvent {
    /// Stamp a new event with the current time.
    pub fn new(measurement: impl Into<String>, fields: Fields, tags: Tags) -> Self {
        Self {
            measurement: measurement.into(),
            tags,
            fields,
            timestamp: Utc::now(),
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn field(&self, key: &str) -> Option<FieldValue> {
        self.fields.get(key).copied()
    }
}
