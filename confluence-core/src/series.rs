//! Read-only time-series capability consumed by every operation in this crate.

use std::sync::Arc;

use confluence_types::{InterpolationMode, SampledPoint, TimeInterval, ValueKind};

use crate::cursor::Cursor;
use crate::interpolation::function_for;

/// A sorted, read-only sequence of sampled points with an interpolation mode.
///
/// Implementors provide neighbour lookups and range reads; point evaluation
/// and cursors have default implementations on top of them.
pub trait ReadOnlyTimeSeries {
    /// Latest literal point with `timestamp <= t`.
    fn previous_value(&self, t: i64) -> Option<SampledPoint>;

    /// Earliest literal point with `timestamp >= t`.
    fn next_value(&self, t: i64) -> Option<SampledPoint>;

    /// Literal points in `interval`, ascending.
    fn values(&self, interval: TimeInterval) -> Vec<SampledPoint>;

    /// The series' own interpolation mode.
    fn interpolation_mode(&self) -> InterpolationMode;

    /// Declared payload kind, if the series commits to one.
    fn value_kind(&self) -> Option<ValueKind> {
        None
    }

    /// Cursor over the literal points in `interval`.
    fn iter(&self, interval: TimeInterval) -> Cursor<'_> {
        Cursor::new(self.values(interval))
    }

    /// Value at `t` under the series' own interpolation mode.
    fn value_at(&self, t: i64) -> Option<SampledPoint> {
        value_for_mode(self, t, self.interpolation_mode())
    }

    /// True if the series has no literal point in `interval`.
    fn is_empty_in(&self, interval: TimeInterval) -> bool {
        if interval.is_empty() {
            return true;
        }
        self.next_value(interval.start)
            .is_none_or(|p| p.timestamp >= interval.end)
    }
}

/// Value of `series` at `t` under `mode` rather than its own mode.
pub fn value_for_mode<S>(series: &S, t: i64, mode: InterpolationMode) -> Option<SampledPoint>
where
    S: ReadOnlyTimeSeries + ?Sized,
{
    let previous = series.previous_value(t);
    if let Some(p) = previous.as_ref()
        && p.timestamp == t
    {
        return previous;
    }
    let next = series.next_value(t);
    function_for(mode).interpolate(previous.as_ref(), next.as_ref(), t)
}

macro_rules! forward_series {
    ($($ptr:ty),* $(,)?) => {$(
        impl<T: ReadOnlyTimeSeries + ?Sized> ReadOnlyTimeSeries for $ptr {
            fn previous_value(&self, t: i64) -> Option<SampledPoint> {
                (**self).previous_value(t)
            }
            fn next_value(&self, t: i64) -> Option<SampledPoint> {
                (**self).next_value(t)
            }
            fn values(&self, interval: TimeInterval) -> Vec<SampledPoint> {
                (**self).values(interval)
            }
            fn interpolation_mode(&self) -> InterpolationMode {
                (**self).interpolation_mode()
            }
            fn value_kind(&self) -> Option<ValueKind> {
                (**self).value_kind()
            }
            fn iter(&self, interval: TimeInterval) -> Cursor<'_> {
                (**self).iter(interval)
            }
            fn value_at(&self, t: i64) -> Option<SampledPoint> {
                (**self).value_at(t)
            }
            fn is_empty_in(&self, interval: TimeInterval) -> bool {
                (**self).is_empty_in(interval)
            }
        }
    )*};
}

forward_series!(&T, Box<T>, Arc<T>);
