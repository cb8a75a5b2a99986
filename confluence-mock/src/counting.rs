use std::cell::Cell;

use confluence_core::{
    Cursor, InterpolationMode, ReadOnlyTimeSeries, SampledPoint, TimeInterval, ValueKind,
};

/// Wrapper that counts every read reaching the inner series.
pub struct CountingSeries<S> {
    inner: S,
    reads: Cell<usize>,
}

impl<S> CountingSeries<S> {
    /// Wrap `inner` with a zeroed counter.
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            reads: Cell::new(0),
        }
    }

    /// Number of lookups, range reads and cursors served so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Zero the counter.
    pub fn reset(&self) {
        self.reads.set(0);
    }

    fn hit(&self) {
        self.reads.set(self.reads.get() + 1);
    }
}

impl<S: ReadOnlyTimeSeries> ReadOnlyTimeSeries for CountingSeries<S> {
    fn previous_value(&self, t: i64) -> Option<SampledPoint> {
        self.hit();
        self.inner.previous_value(t)
    }

    fn next_value(&self, t: i64) -> Option<SampledPoint> {
        self.hit();
        self.inner.next_value(t)
    }

    fn values(&self, interval: TimeInterval) -> Vec<SampledPoint> {
        self.hit();
        self.inner.values(interval)
    }

    fn interpolation_mode(&self) -> InterpolationMode {
        self.inner.interpolation_mode()
    }

    fn value_kind(&self) -> Option<ValueKind> {
        self.inner.value_kind()
    }

    fn iter(&self, interval: TimeInterval) -> Cursor<'_> {
        self.hit();
        self.inner.iter(interval)
    }
}
