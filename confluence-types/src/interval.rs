//! Half-open time intervals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfluenceError;

/// Half-open interval `[start, end)` of millisecond timestamps.
///
/// An interval is empty iff `end <= start`. Empty intervals are legal values
/// (results of intersections, for instance); builders that take a window use
/// [`TimeInterval::try_new`] to reject reversed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Inclusive start.
    pub start: i64,
    /// Exclusive end.
    pub end: i64,
}

impl TimeInterval {
    /// Interval covering every representable timestamp except `i64::MAX`.
    pub const ALL: Self = Self {
        start: i64::MIN,
        end: i64::MAX,
    };

    /// Construct `[start, end)` without validation.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Construct `[start, end)`, rejecting `end < start`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the bounds are reversed.
    pub fn try_new(start: i64, end: i64) -> Result<Self, ConfluenceError> {
        if end < start {
            return Err(ConfluenceError::InvalidArg(format!(
                "interval end {end} precedes start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Closed interval `[start, end]`, represented as `[start, end + 1)`.
    #[must_use]
    pub const fn closed(start: i64, end: i64) -> Self {
        Self {
            start,
            end: end.saturating_add(1),
        }
    }

    /// Build from wall-clock bounds.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `end` precedes `start`.
    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ConfluenceError> {
        Self::try_new(start.timestamp_millis(), end.timestamp_millis())
    }

    /// True iff `end <= start`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True iff the interval contains at least one timestamp.
    #[must_use]
    pub const fn exists(&self) -> bool {
        !self.is_empty()
    }

    /// Length in milliseconds; zero for empty intervals.
    #[must_use]
    pub const fn length(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.end.saturating_sub(self.start)
        }
    }

    /// True if `t` lies in `[start, end)`.
    #[must_use]
    pub const fn contains(&self, t: i64) -> bool {
        t >= self.start && t < self.end
    }

    /// True if `other` is empty or lies completely inside `self`.
    #[must_use]
    pub const fn contains_interval(&self, other: &Self) -> bool {
        other.is_empty() || (other.start >= self.start && other.end <= self.end)
    }

    /// Intersection of two intervals; may be empty.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }
}
