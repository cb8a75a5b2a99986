//! In-memory mutable series.

use std::collections::BTreeMap;

use confluence_types::{ConfluenceError, InterpolationMode, SampledPoint, TimeInterval, ValueKind};

use crate::cursor::Cursor;
use crate::series::ReadOnlyTimeSeries;

/// Sorted in-memory series keyed by timestamp.
///
/// Timestamps are unique: adding a point at an occupied timestamp replaces
/// the old point. Writers need `&mut self`; callers that share a series
/// across threads wrap it themselves (e.g. `Arc<RwLock<MemoryTimeSeries>>`).
///
/// [`MemoryTimeSeries::replace_values`] is a clear followed by inserts and is
/// not atomic with respect to readers observing the store between the two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTimeSeries {
    points: BTreeMap<i64, SampledPoint>,
    mode: InterpolationMode,
    kind: Option<ValueKind>,
}

impl MemoryTimeSeries {
    /// Empty series with the given interpolation mode.
    #[must_use]
    pub fn new(mode: InterpolationMode) -> Self {
        Self {
            points: BTreeMap::new(),
            mode,
            kind: None,
        }
    }

    /// Restrict the series to one payload kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Build a series from points in any order.
    ///
    /// # Errors
    /// Returns `InvalidArg` if a point does not match the declared kind.
    pub fn from_points<I>(mode: InterpolationMode, points: I) -> Result<Self, ConfluenceError>
    where
        I: IntoIterator<Item = SampledPoint>,
    {
        let mut s = Self::new(mode);
        s.add_values(points)?;
        Ok(s)
    }

    fn check_kind(&self, p: &SampledPoint) -> Result<(), ConfluenceError> {
        match self.kind {
            Some(kind) if p.value.kind() != kind => Err(ConfluenceError::invalid_arg(format!(
                "point at {} has kind {:?}, series holds {:?}",
                p.timestamp,
                p.value.kind(),
                kind
            ))),
            _ => Ok(()),
        }
    }

    /// Insert or replace a single point.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the point does not match the declared kind.
    pub fn add_value(&mut self, point: SampledPoint) -> Result<(), ConfluenceError> {
        self.check_kind(&point)?;
        self.points.insert(point.timestamp, point);
        Ok(())
    }

    /// Insert or replace several points. Points are validated one by one;
    /// those preceding an invalid point remain inserted.
    ///
    /// # Errors
    /// Returns `InvalidArg` on the first point not matching the declared kind.
    pub fn add_values<I>(&mut self, points: I) -> Result<(), ConfluenceError>
    where
        I: IntoIterator<Item = SampledPoint>,
    {
        points.into_iter().try_for_each(|p| self.add_value(p))
    }

    /// Remove every point in `interval`; returns the number removed.
    pub fn delete_values(&mut self, interval: TimeInterval) -> usize {
        if interval.is_empty() {
            return 0;
        }
        let doomed: Vec<i64> = self
            .points
            .range(interval.start..interval.end)
            .map(|(&t, _)| t)
            .collect();
        for t in &doomed {
            self.points.remove(t);
        }
        doomed.len()
    }

    /// Clear `interval`, then insert those of `points` that fall inside it.
    ///
    /// # Errors
    /// Returns `InvalidArg` if a point does not match the declared kind; the
    /// interval has already been cleared at that point.
    pub fn replace_values<I>(&mut self, interval: TimeInterval, points: I) -> Result<(), ConfluenceError>
    where
        I: IntoIterator<Item = SampledPoint>,
    {
        self.delete_values(interval);
        self.add_values(points.into_iter().filter(|p| interval.contains(p.timestamp)))
    }

    /// Replace the content with a copy of `other` restricted to `interval`,
    /// adopting its interpolation mode.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `other` yields points of a kind this series rejects.
    pub fn read<S>(&mut self, other: &S, interval: TimeInterval) -> Result<(), ConfluenceError>
    where
        S: ReadOnlyTimeSeries + ?Sized,
    {
        self.points.clear();
        self.mode = other.interpolation_mode();
        self.add_values(other.values(interval))
    }

    /// Change the interpolation mode.
    pub const fn set_interpolation_mode(&mut self, mode: InterpolationMode) {
        self.mode = mode;
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the series holds no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest point.
    #[must_use]
    pub fn first(&self) -> Option<&SampledPoint> {
        self.points.values().next()
    }

    /// Latest point.
    #[must_use]
    pub fn last(&self) -> Option<&SampledPoint> {
        self.points.values().next_back()
    }
}

impl ReadOnlyTimeSeries for MemoryTimeSeries {
    fn previous_value(&self, t: i64) -> Option<SampledPoint> {
        self.points.range(..=t).next_back().map(|(_, p)| p.clone())
    }

    fn next_value(&self, t: i64) -> Option<SampledPoint> {
        self.points.range(t..).next().map(|(_, p)| p.clone())
    }

    fn values(&self, interval: TimeInterval) -> Vec<SampledPoint> {
        if interval.is_empty() {
            return Vec::new();
        }
        self.points
            .range(interval.start..interval.end)
            .map(|(_, p)| p.clone())
            .collect()
    }

    fn interpolation_mode(&self) -> InterpolationMode {
        self.mode
    }

    fn value_kind(&self) -> Option<ValueKind> {
        self.kind
    }

    fn iter(&self, interval: TimeInterval) -> Cursor<'_> {
        if interval.is_empty() {
            return Cursor::empty();
        }
        Cursor::new(
            self.points
                .range(interval.start..interval.end)
                .map(|(_, p)| p.clone()),
        )
    }
}
