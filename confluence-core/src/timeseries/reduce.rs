use std::rc::Rc;

use confluence_types::{ReductionKind, SampledPoint, Value};

use crate::timeseries::datapoint::DataPoint;
use crate::timeseries::merge::MultiSeriesMerger;

/// Folds the GOOD values of one cross-section into a single value.
///
/// Returning `None` marks the result as undefined; the reduction iterator
/// then emits a BAD NaN point.
pub trait Reducer {
    /// Reduce the contributing values, in series order.
    fn reduce(&self, values: &[SampledPoint]) -> Option<Value>;
}

impl<F> Reducer for F
where
    F: Fn(&[SampledPoint]) -> Option<Value>,
{
    fn reduce(&self, values: &[SampledPoint]) -> Option<Value> {
        self(values)
    }
}

impl Reducer for ReductionKind {
    fn reduce(&self, values: &[SampledPoint]) -> Option<Value> {
        match self {
            Self::Sum => values
                .iter()
                .map(|p| p.value.as_f64())
                .sum::<Option<f64>>()
                .map(Value::Float),
            Self::Average => {
                let sum: f64 = values.iter().map(|p| p.value.as_f64()).sum::<Option<f64>>()?;
                #[allow(clippy::cast_precision_loss)]
                let n = values.len() as f64;
                Some(Value::Float(sum / n))
            }
            Self::And => values
                .iter()
                .map(|p| p.value.as_bool())
                .try_fold(true, |acc, b| Some(acc && b?))
                .map(Value::Boolean),
            Self::Or => values
                .iter()
                .map(|p| p.value.as_bool())
                .try_fold(false, |acc, b| Some(acc || b?))
                .map(Value::Boolean),
        }
    }
}

/// Applies a [`Reducer`] to every data point of a merger.
///
/// For each data point one value per series is gathered: the stored point,
/// else the value interpolated under the series' effective mode. A series
/// without a GOOD value is a gap. With `ignore_gaps` gaps are skipped;
/// otherwise a single gap makes the output point BAD NaN. A point with no
/// contributing series at all is BAD NaN as well.
pub struct ReductionIterator<'a, R> {
    merger: MultiSeriesMerger<'a>,
    reducer: R,
    ignore_gaps: bool,
    scratch: Vec<SampledPoint>,
}

impl<'a, R: Reducer> ReductionIterator<'a, R> {
    /// Wrap `merger`.
    #[must_use]
    pub const fn new(merger: MultiSeriesMerger<'a>, reducer: R, ignore_gaps: bool) -> Self {
        Self {
            merger,
            reducer,
            ignore_gaps,
            scratch: Vec::new(),
        }
    }

    /// The wrapped merger.
    #[must_use]
    pub const fn merger(&self) -> &MultiSeriesMerger<'a> {
        &self.merger
    }

    fn reduce_point(&mut self, dp: &Rc<DataPoint>) -> SampledPoint {
        let t = dp.timestamp();
        self.scratch.clear();
        for idx in 0..dp.size() {
            match dp.value(idx).filter(SampledPoint::is_good) {
                Some(v) => self.scratch.push(v),
                None if self.ignore_gaps => {}
                None => return SampledPoint::bad(t),
            }
        }
        if self.scratch.is_empty() {
            return SampledPoint::bad(t);
        }
        match self.reducer.reduce(&self.scratch) {
            Some(value) => SampledPoint::good(t, value),
            None => SampledPoint::bad(t),
        }
    }
}

impl<R: Reducer> Iterator for ReductionIterator<'_, R> {
    type Item = SampledPoint;

    fn next(&mut self) -> Option<SampledPoint> {
        let dp = self.merger.next()?;
        Some(self.reduce_point(&dp))
    }
}
