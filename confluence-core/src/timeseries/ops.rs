//! Numeric operations over a single series.

use confluence_types::{ConfluenceError, InterpolationMode, SampledPoint, TimeInterval};

use crate::interpolation::function_for;
use crate::series::ReadOnlyTimeSeries;

fn ordered(t0: i64, t1: i64) -> (i64, i64, f64) {
    if t1 < t0 { (t1, t0, -1.0) } else { (t0, t1, 1.0) }
}

fn require_linear<S: ReadOnlyTimeSeries + ?Sized>(
    series: &S,
    operation: &str,
) -> Result<(), ConfluenceError> {
    match series.interpolation_mode() {
        InterpolationMode::Linear => Ok(()),
        other => Err(ConfluenceError::unsupported(format!("{operation}/{other}"))),
    }
}

/// Interpolated value at `lo`, the literal points strictly inside
/// `(lo, hi)` and the interpolated value at `hi`, skipping undefined ends.
fn segment_points<S: ReadOnlyTimeSeries + ?Sized>(series: &S, lo: i64, hi: i64) -> Vec<SampledPoint> {
    let mut points = Vec::new();
    points.extend(series.value_at(lo));
    points.extend(
        series
            .iter(TimeInterval::new(lo, hi))
            .filter(|p| p.timestamp > lo),
    );
    if hi > lo {
        points.extend(series.value_at(hi));
    }
    points
}

fn extreme<S, F>(series: &S, t0: i64, t1: i64, better: F) -> SampledPoint
where
    S: ReadOnlyTimeSeries + ?Sized,
    F: Fn(f64, f64) -> bool,
{
    let (lo, hi, _) = ordered(t0, t1);
    let candidates = series
        .value_at(lo)
        .into_iter()
        .chain(series.iter(TimeInterval::closed(lo, hi)))
        .chain(series.value_at(hi));
    let mut best: Option<(f64, SampledPoint)> = None;
    for p in candidates {
        let Some(v) = p.good_f64().filter(|v| !v.is_nan()) else {
            continue;
        };
        if best.as_ref().is_none_or(|(b, _)| better(v, *b)) {
            best = Some((v, p));
        }
    }
    best.map_or_else(|| SampledPoint::bad(lo), |(_, p)| p)
}

/// Numeric operations available on every [`ReadOnlyTimeSeries`].
///
/// Integrals are in value·milliseconds and use the series' own interpolation
/// mode. BAD points contribute nothing.
pub trait FloatSeriesExt: ReadOnlyTimeSeries {
    /// Definite integral from `t0` to `t1`; negated if `t1 < t0`, zero if equal.
    fn integrate(&self, t0: i64, t1: i64) -> f64 {
        if t0 == t1 {
            return 0.0;
        }
        let (lo, hi, sign) = ordered(t0, t1);
        let f = function_for(self.interpolation_mode());
        let total: f64 = segment_points(self, lo, hi)
            .windows(2)
            .map(|w| f.integrate(&w[0], &w[1]))
            .sum();
        sign * total
    }

    /// Integral of `|f|` from `t0` to `t1`, negated if `t1 < t0`.
    ///
    /// # Errors
    /// Returns `Unsupported` unless the series interpolates linearly.
    fn integrate_absolute(&self, t0: i64, t1: i64) -> Result<f64, ConfluenceError> {
        require_linear(self, "integrate-absolute")?;
        let (lo, hi, sign) = ordered(t0, t1);
        let f = function_for(InterpolationMode::Linear);
        let mut total = 0.0;
        for w in segment_points(self, lo, hi).windows(2) {
            total += f.integrate_absolute(&w[0], &w[1])?;
        }
        Ok(sign * total)
    }

    /// Integral of `max(f, 0)` from `t0` to `t1`, negated if `t1 < t0`.
    ///
    /// # Errors
    /// Returns `Unsupported` unless the series interpolates linearly.
    fn integrate_positive(&self, t0: i64, t1: i64) -> Result<f64, ConfluenceError> {
        require_linear(self, "integrate-positive")?;
        let (lo, hi, sign) = ordered(t0, t1);
        let f = function_for(InterpolationMode::Linear);
        let mut total = 0.0;
        for w in segment_points(self, lo, hi).windows(2) {
            total += f.integrate_positive(&w[0], &w[1])?;
        }
        Ok(sign * total)
    }

    /// Time-weighted average over `[t0, t1)`.
    ///
    /// A degenerate interval yields the value at `t0`. Series interpolated
    /// with NONE or NEAREST average their GOOD literal points instead.
    /// Undefined results are NaN.
    fn average(&self, t0: i64, t1: i64) -> f64 {
        let (lo, hi, _) = ordered(t0, t1);
        if lo == hi {
            return self
                .value_at(lo)
                .and_then(|p| p.good_f64())
                .unwrap_or(f64::NAN);
        }
        match self.interpolation_mode() {
            InterpolationMode::None | InterpolationMode::Nearest => {
                let (sum, n) = self
                    .iter(TimeInterval::new(lo, hi))
                    .filter_map(|p| p.good_f64())
                    .fold((0.0, 0_u32), |(s, n), v| (s + v, n + 1));
                if n == 0 { f64::NAN } else { sum / f64::from(n) }
            }
            InterpolationMode::Steps | InterpolationMode::Linear => {
                #[allow(clippy::cast_precision_loss)]
                let span = hi as f64 - lo as f64;
                self.integrate(lo, hi) / span
            }
        }
    }

    /// Largest GOOD value on the closed range between `t0` and `t1`,
    /// including interpolated values at both ends. Ties keep the earliest
    /// point; if no GOOD value exists the result is BAD NaN at the start.
    fn max_value(&self, t0: i64, t1: i64) -> SampledPoint {
        extreme(self, t0, t1, |v, best| v > best)
    }

    /// Smallest GOOD value; see [`FloatSeriesExt::max_value`].
    fn min_value(&self, t0: i64, t1: i64) -> SampledPoint {
        extreme(self, t0, t1, |v, best| v < best)
    }

    /// Thin the points in `[t0, t1)` so that retained points are at least
    /// `minimum_interval` apart, always keeping the first and the last one.
    fn downsample(&self, t0: i64, t1: i64, minimum_interval: i64) -> Vec<SampledPoint> {
        let raw = self.values(TimeInterval::new(t0, t1));
        if minimum_interval <= 0 || raw.len() <= 2 {
            return raw;
        }
        let total = raw.len();
        let mut kept: Vec<SampledPoint> = Vec::new();
        for (i, p) in raw.into_iter().enumerate() {
            let due = kept.last().is_none_or(|last| {
                p.timestamp.abs_diff(last.timestamp) >= minimum_interval.unsigned_abs()
            });
            if due || i + 1 == total {
                kept.push(p);
            }
        }
        kept
    }

    /// Maximal sub-intervals of `search` on which the series is strictly
    /// positive, ascending and disjoint.
    ///
    /// # Errors
    /// Returns `Unsupported` unless the series interpolates linearly.
    fn positive_domain(&self, search: TimeInterval) -> Result<Vec<TimeInterval>, ConfluenceError> {
        require_linear(self, "positive-domain")?;
        if search.is_empty() {
            return Ok(Vec::new());
        }
        let f = function_for(InterpolationMode::Linear);
        let mut points: Vec<SampledPoint> = Vec::new();
        points.extend(
            self.previous_value(search.start)
                .filter(|p| p.timestamp < search.start),
        );
        points.extend(self.iter(search));
        points.extend(self.next_value(search.end));

        let mut merged: Vec<TimeInterval> = Vec::new();
        for w in points.windows(2) {
            let Some(iv) = f.positive_interval(&w[0], &w[1])? else {
                continue;
            };
            match merged.last_mut() {
                Some(last) if iv.start <= last.end => last.end = last.end.max(iv.end),
                _ => merged.push(iv),
            }
        }
        Ok(merged
            .into_iter()
            .map(|iv| iv.intersect(&search))
            .filter(TimeInterval::exists)
            .collect())
    }
}

impl<T: ReadOnlyTimeSeries + ?Sized> FloatSeriesExt for T {}
