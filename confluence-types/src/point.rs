//! Timestamped observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Quality flag attached to every sampled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Quality {
    /// The value is valid.
    #[default]
    Good,
    /// The value must not be used for computations.
    Bad,
}

impl Quality {
    /// Combine two qualities: GOOD only if both are GOOD.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Good, Self::Good) => Self::Good,
            _ => Self::Bad,
        }
    }
}

/// One `(timestamp, value, quality)` observation.
///
/// Timestamps are milliseconds since the Unix epoch. Within one series
/// timestamps are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledPoint {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Payload.
    pub value: Value,
    /// Quality flag.
    pub quality: Quality,
}

impl SampledPoint {
    /// Construct a point.
    #[must_use]
    pub fn new(timestamp: i64, value: impl Into<Value>, quality: Quality) -> Self {
        Self {
            timestamp,
            value: value.into(),
            quality,
        }
    }

    /// Construct a GOOD point.
    #[must_use]
    pub fn good(timestamp: i64, value: impl Into<Value>) -> Self {
        Self::new(timestamp, value, Quality::Good)
    }

    /// Construct a BAD point carrying the NaN sentinel.
    #[must_use]
    pub const fn bad(timestamp: i64) -> Self {
        Self {
            timestamp,
            value: Value::NAN,
            quality: Quality::Bad,
        }
    }

    /// True if the quality is GOOD.
    #[must_use]
    pub const fn is_good(&self) -> bool {
        matches!(self.quality, Quality::Good)
    }

    /// Copy of this point relocated to `timestamp`.
    #[must_use]
    pub fn at(&self, timestamp: i64) -> Self {
        Self {
            timestamp,
            value: self.value.clone(),
            quality: self.quality,
        }
    }

    /// Numeric view of a GOOD point; `None` for BAD points and non-numeric payloads.
    #[must_use]
    pub fn good_f64(&self) -> Option<f64> {
        if self.is_good() {
            self.value.as_f64()
        } else {
            None
        }
    }

    /// Wall-clock view of the timestamp; `None` if out of chrono's range.
    #[must_use]
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
