use std::collections::BTreeMap;
use std::rc::Rc;

use confluence_types::{ConfluenceError, SampledPoint};

use crate::timeseries::datapoint::DataPoint;
use crate::timeseries::merge::MultiSeriesMerger;

/// Per-series differences between two consecutive data points.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffPoint {
    /// Timestamp between the two data points, placed by the iterator's factor.
    pub timestamp: i64,
    /// `current - previous` for every series stored in the later data point.
    pub elements: BTreeMap<usize, SampledPoint>,
}

/// Iterator over the differences of consecutive merged data points.
///
/// For each pair `(previous, current)` one [`DiffPoint`] is produced at
/// `previous.t + factor * (current.t - previous.t)`. Each series stored in
/// `current` contributes its value minus its value at `previous` (stored or
/// interpolated); a series without a GOOD earlier value yields BAD NaN.
pub struct DiffIterator<'a> {
    merger: MultiSeriesMerger<'a>,
    factor: f64,
    last: Option<Rc<DataPoint>>,
}

impl<'a> DiffIterator<'a> {
    /// Wrap `merger`, placing outputs at `factor` in `[0, 1]`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `factor` lies outside `[0, 1]`.
    pub fn new(merger: MultiSeriesMerger<'a>, factor: f64) -> Result<Self, ConfluenceError> {
        if !(0.0..=1.0).contains(&factor) {
            return Err(ConfluenceError::invalid_arg(format!(
                "diff factor must lie in [0, 1], got {factor}"
            )));
        }
        Ok(Self {
            merger,
            factor,
            last: None,
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn diff(&self, previous: &DataPoint, current: &DataPoint) -> DiffPoint {
        let (t0, t1) = (previous.timestamp(), current.timestamp());
        let offset = (self.factor * (t1 as f64 - t0 as f64)).round() as i128;
        let placed = (i128::from(t0) + offset).clamp(i128::from(t0), i128::from(t1));
        let timestamp = i64::try_from(placed).unwrap_or(t1);
        let elements = current
            .elements()
            .iter()
            .map(|(&idx, p)| {
                let before = previous.value(idx).and_then(|e| e.good_f64());
                let point = match (p.good_f64(), before) {
                    (Some(now), Some(then)) => SampledPoint::good(timestamp, now - then),
                    _ => SampledPoint::bad(timestamp),
                };
                (idx, point)
            })
            .collect();
        DiffPoint { timestamp, elements }
    }
}

impl Iterator for DiffIterator<'_> {
    type Item = DiffPoint;

    fn next(&mut self) -> Option<DiffPoint> {
        loop {
            let current = self.merger.next()?;
            if let Some(previous) = self.last.replace(Rc::clone(&current)) {
                return Some(self.diff(&previous, &current));
            }
        }
    }
}
