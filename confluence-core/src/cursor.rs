//! Forward cursors over a single sorted series.

use std::iter::Peekable;

use confluence_types::{ConfluenceError, SampledPoint, TimeInterval};

type Points<'a> = Box<dyn Iterator<Item = SampledPoint> + 'a>;

/// Lazy forward iterator over one series with strictly increasing timestamps.
///
/// A cursor never yields a point whose timestamp does not exceed the one
/// yielded before it; such points are skipped. Besides the [`Iterator`]
/// protocol it offers the explicit `has_next`/`advance` pair, where advancing
/// past the end is a usage error.
pub struct Cursor<'a> {
    inner: Peekable<Points<'a>>,
    last: Option<i64>,
}

impl<'a> Cursor<'a> {
    /// Cursor over an already sorted sequence of points.
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator<Item = SampledPoint>,
        I::IntoIter: 'a,
    {
        let boxed: Points<'a> = Box::new(points.into_iter());
        Self {
            inner: boxed.peekable(),
            last: None,
        }
    }

    /// Cursor that yields nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Restrict the cursor to `[window.start, window.end)`.
    #[must_use]
    pub fn bounded(self, window: TimeInterval) -> Self {
        let Self { inner, last } = self;
        let boxed: Points<'a> = Box::new(
            inner
                .skip_while(move |p| p.timestamp < window.start)
                .take_while(move |p| p.timestamp < window.end),
        );
        Self {
            inner: boxed.peekable(),
            last,
        }
    }

    /// Attach fallback points emitted around the literal points.
    ///
    /// `lower` is emitted first iff it precedes the first remaining point (or
    /// the cursor is empty); `upper` is emitted last iff it follows the last
    /// point.
    #[must_use]
    pub fn with_boundaries(mut self, lower: Option<SampledPoint>, upper: Option<SampledPoint>) -> Self {
        let lower = match (lower, self.peek()) {
            (Some(l), Some(first)) if l.timestamp >= first.timestamp => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    boundary = l.timestamp,
                    first = first.timestamp,
                    "lower boundary does not precede series; dropped"
                );
                None
            }
            (l, _) => l,
        };
        let Self { inner, last } = self;
        let boxed: Points<'a> = Box::new(lower.into_iter().chain(inner).chain(upper));
        Self {
            inner: boxed.peekable(),
            last,
        }
    }

    fn skip_non_advancing(&mut self) {
        let Some(last) = self.last else { return };
        while let Some(_dropped) = self.inner.next_if(|p| p.timestamp <= last) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                ts = _dropped.timestamp,
                last,
                "dropping non-advancing point"
            );
        }
    }

    /// True if another point is available.
    pub fn has_next(&mut self) -> bool {
        self.peek().is_some()
    }

    /// The next point, without consuming it.
    pub fn peek(&mut self) -> Option<&SampledPoint> {
        self.skip_non_advancing();
        self.inner.peek()
    }

    /// Timestamp of the next point.
    pub fn peek_timestamp(&mut self) -> Option<i64> {
        self.peek().map(|p| p.timestamp)
    }

    /// Consume the next point.
    ///
    /// # Errors
    /// Returns `Exhausted` if no point remains.
    pub fn advance(&mut self) -> Result<SampledPoint, ConfluenceError> {
        self.next().ok_or(ConfluenceError::Exhausted)
    }
}

impl Iterator for Cursor<'_> {
    type Item = SampledPoint;

    fn next(&mut self) -> Option<SampledPoint> {
        self.skip_non_advancing();
        let p = self.inner.next()?;
        self.last = Some(p.timestamp);
        Some(p)
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor").field("last", &self.last).finish_non_exhaustive()
    }
}
