//! Per-mode interpolation and definite integration between bracketing points.
//!
//! Each [`InterpolationMode`] has a stateless strategy implementing
//! [`InterpolationFunction`]; [`function_for`] maps a mode to its strategy.
//! Integrals are expressed in value·milliseconds and are antisymmetric in
//! their arguments. A BAD or non-numeric endpoint contributes nothing.

use confluence_types::{ConfluenceError, InterpolationMode, SampledPoint, TimeInterval, Value};

/// Strategy computing values between two bracketing points and the definite
/// integral over the segment they span.
pub trait InterpolationFunction {
    /// The mode this strategy implements.
    fn mode(&self) -> InterpolationMode;

    /// Value at `t` given the nearest literal point at or before `t` (`left`)
    /// and at or after `t` (`right`).
    ///
    /// A side whose timestamp equals `t` is returned as is. Returns `None` if
    /// the mode defines no value at `t`.
    fn interpolate(
        &self,
        left: Option<&SampledPoint>,
        right: Option<&SampledPoint>,
        t: i64,
    ) -> Option<SampledPoint>;

    /// Integral over the segment from `earlier` to `later`; callers guarantee
    /// `earlier.timestamp <= later.timestamp`.
    fn segment_integral(&self, earlier: &SampledPoint, later: &SampledPoint) -> f64;

    /// Integral from `a` to `b`, negated if `b` precedes `a`.
    fn integrate(&self, a: &SampledPoint, b: &SampledPoint) -> f64 {
        if b.timestamp < a.timestamp {
            -self.segment_integral(b, a)
        } else {
            self.segment_integral(a, b)
        }
    }

    /// Integral of `|f|` from `a` to `b`, negated if `b` precedes `a`.
    ///
    /// # Errors
    /// Returns `Unsupported` for modes without a sign-crossing rule.
    fn integrate_absolute(&self, a: &SampledPoint, b: &SampledPoint) -> Result<f64, ConfluenceError> {
        let _ = (a, b);
        Err(ConfluenceError::unsupported(format!(
            "integrate-absolute/{}",
            self.mode()
        )))
    }

    /// Integral of `max(f, 0)` from `a` to `b`, negated if `b` precedes `a`.
    ///
    /// # Errors
    /// Returns `Unsupported` for modes without a sign-crossing rule.
    fn integrate_positive(&self, a: &SampledPoint, b: &SampledPoint) -> Result<f64, ConfluenceError> {
        let _ = (a, b);
        Err(ConfluenceError::unsupported(format!(
            "integrate-positive/{}",
            self.mode()
        )))
    }

    /// Sub-interval of the segment on which the series is strictly positive.
    ///
    /// # Errors
    /// Returns `Unsupported` for modes without a sign-crossing rule.
    fn positive_interval(
        &self,
        earlier: &SampledPoint,
        later: &SampledPoint,
    ) -> Result<Option<TimeInterval>, ConfluenceError> {
        let _ = (earlier, later);
        Err(ConfluenceError::unsupported(format!(
            "positive-domain/{}",
            self.mode()
        )))
    }
}

/// Strategy for `mode`.
#[must_use]
pub fn function_for(mode: InterpolationMode) -> &'static dyn InterpolationFunction {
    match mode {
        InterpolationMode::None => &NoInterpolation,
        InterpolationMode::Steps => &StepInterpolation,
        InterpolationMode::Linear => &LinearInterpolation,
        InterpolationMode::Nearest => &NearestInterpolation,
    }
}

/// Shorthand for `function_for(mode).interpolate(left, right, t)`.
#[must_use]
pub fn interpolate(
    mode: InterpolationMode,
    left: Option<&SampledPoint>,
    right: Option<&SampledPoint>,
    t: i64,
) -> Option<SampledPoint> {
    function_for(mode).interpolate(left, right, t)
}

fn exact(left: Option<&SampledPoint>, right: Option<&SampledPoint>, t: i64) -> Option<SampledPoint> {
    left.filter(|p| p.timestamp == t)
        .or_else(|| right.filter(|p| p.timestamp == t))
        .cloned()
}

#[allow(clippy::cast_precision_loss)]
fn span(earlier: &SampledPoint, later: &SampledPoint) -> f64 {
    later.timestamp as f64 - earlier.timestamp as f64
}

/// Only literal points are defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInterpolation;

impl InterpolationFunction for NoInterpolation {
    fn mode(&self) -> InterpolationMode {
        InterpolationMode::None
    }

    fn interpolate(
        &self,
        left: Option<&SampledPoint>,
        right: Option<&SampledPoint>,
        t: i64,
    ) -> Option<SampledPoint> {
        exact(left, right, t)
    }

    fn segment_integral(&self, _earlier: &SampledPoint, _later: &SampledPoint) -> f64 {
        0.0
    }
}

/// Right-continuous step function: a value holds until the next point.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepInterpolation;

impl InterpolationFunction for StepInterpolation {
    fn mode(&self) -> InterpolationMode {
        InterpolationMode::Steps
    }

    fn interpolate(
        &self,
        left: Option<&SampledPoint>,
        right: Option<&SampledPoint>,
        t: i64,
    ) -> Option<SampledPoint> {
        exact(left, right, t).or_else(|| left.filter(|p| p.timestamp <= t).map(|p| p.at(t)))
    }

    fn segment_integral(&self, earlier: &SampledPoint, later: &SampledPoint) -> f64 {
        earlier
            .good_f64()
            .map_or(0.0, |v| v * span(earlier, later))
    }
}

/// Linear interpolation between two neighbours.
///
/// The result is GOOD only if both neighbours are. Integer kinds truncate;
/// non-numeric kinds fall back to nearest-neighbour.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearInterpolation;

impl LinearInterpolation {
    /// Zero crossing of the segment, if its GOOD endpoints have strictly
    /// opposite signs.
    #[must_use]
    pub fn zero_crossing(earlier: &SampledPoint, later: &SampledPoint) -> Option<f64> {
        let (v0, v1) = (earlier.good_f64()?, later.good_f64()?);
        if (v0 < 0.0 && v1 > 0.0) || (v0 > 0.0 && v1 < 0.0) {
            #[allow(clippy::cast_precision_loss)]
            let t0 = earlier.timestamp as f64;
            Some(t0 + span(earlier, later) * v0 / (v0 - v1))
        } else {
            None
        }
    }

    fn split_areas(earlier: &SampledPoint, later: &SampledPoint) -> (f64, f64) {
        let (Some(v0), Some(v1)) = (earlier.good_f64(), later.good_f64()) else {
            return (0.0, 0.0);
        };
        let dt = span(earlier, later);
        if dt == 0.0 {
            return (0.0, 0.0);
        }
        match Self::zero_crossing(earlier, later) {
            Some(_) => {
                // Triangles either side of the root.
                let root = dt * v0 / (v0 - v1);
                let first = v0 * root / 2.0;
                let second = v1 * (dt - root) / 2.0;
                if v0 > 0.0 {
                    (first, -second)
                } else {
                    (second, -first)
                }
            }
            None => {
                let area = (v0 + v1) / 2.0 * dt;
                if v0 >= 0.0 && v1 >= 0.0 {
                    (area, 0.0)
                } else {
                    (0.0, -area)
                }
            }
        }
    }
}

impl InterpolationFunction for LinearInterpolation {
    fn mode(&self) -> InterpolationMode {
        InterpolationMode::Linear
    }

    fn interpolate(
        &self,
        left: Option<&SampledPoint>,
        right: Option<&SampledPoint>,
        t: i64,
    ) -> Option<SampledPoint> {
        if let Some(p) = exact(left, right, t) {
            return Some(p);
        }
        let (l, r) = (left?, right?);
        if t < l.timestamp || t > r.timestamp {
            return None;
        }
        let (Some(v0), Some(v1)) = (l.value.as_f64(), r.value.as_f64()) else {
            return NearestInterpolation.interpolate(left, right, t);
        };
        if matches!(l.value, Value::Boolean(_)) {
            return NearestInterpolation.interpolate(left, right, t);
        }
        #[allow(clippy::cast_precision_loss)]
        let frac = (t as f64 - l.timestamp as f64) / span(l, r);
        let v = v0 + (v1 - v0) * frac;
        let value = Value::from_f64_as(l.value.kind(), v).unwrap_or(Value::Float(v));
        Some(SampledPoint {
            timestamp: t,
            value,
            quality: l.quality.and(r.quality),
        })
    }

    fn segment_integral(&self, earlier: &SampledPoint, later: &SampledPoint) -> f64 {
        match (earlier.good_f64(), later.good_f64()) {
            (Some(v0), Some(v1)) => (v0 + v1) / 2.0 * span(earlier, later),
            _ => 0.0,
        }
    }

    fn integrate_absolute(&self, a: &SampledPoint, b: &SampledPoint) -> Result<f64, ConfluenceError> {
        let (earlier, later, sign) = if b.timestamp < a.timestamp {
            (b, a, -1.0)
        } else {
            (a, b, 1.0)
        };
        let (pos, neg) = Self::split_areas(earlier, later);
        Ok(sign * (pos + neg))
    }

    fn integrate_positive(&self, a: &SampledPoint, b: &SampledPoint) -> Result<f64, ConfluenceError> {
        let (earlier, later, sign) = if b.timestamp < a.timestamp {
            (b, a, -1.0)
        } else {
            (a, b, 1.0)
        };
        Ok(sign * Self::split_areas(earlier, later).0)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn positive_interval(
        &self,
        earlier: &SampledPoint,
        later: &SampledPoint,
    ) -> Result<Option<TimeInterval>, ConfluenceError> {
        let (Some(v0), Some(v1)) = (earlier.good_f64(), later.good_f64()) else {
            return Ok(None);
        };
        let (t0, t1) = (earlier.timestamp, later.timestamp);
        let interval = if v0 > 0.0 && v1 > 0.0 {
            Some(TimeInterval::new(t0, t1))
        } else if v0 <= 0.0 && v1 <= 0.0 {
            None
        } else if v0 == 0.0 || v1 == 0.0 {
            // Touches zero at one end only.
            Some(TimeInterval::new(t0, t1))
        } else {
            let root = Self::zero_crossing(earlier, later).map_or(t0, |r| r.round() as i64);
            if v0 > 0.0 {
                Some(TimeInterval::new(t0, root))
            } else {
                Some(TimeInterval::new(root, t1))
            }
        };
        Ok(interval.filter(TimeInterval::exists))
    }
}

/// Value of the neighbour closest in time; ties go to the earlier one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestInterpolation;

impl InterpolationFunction for NearestInterpolation {
    fn mode(&self) -> InterpolationMode {
        InterpolationMode::Nearest
    }

    fn interpolate(
        &self,
        left: Option<&SampledPoint>,
        right: Option<&SampledPoint>,
        t: i64,
    ) -> Option<SampledPoint> {
        if let Some(p) = exact(left, right, t) {
            return Some(p);
        }
        let chosen = match (left, right) {
            (Some(l), Some(r)) => {
                if t.abs_diff(l.timestamp) <= t.abs_diff(r.timestamp) {
                    l
                } else {
                    r
                }
            }
            (Some(p), None) | (None, Some(p)) => p,
            (None, None) => return None,
        };
        Some(SampledPoint {
            timestamp: t,
            value: chosen.value.clone(),
            quality: chosen.quality,
        })
    }

    fn segment_integral(&self, _earlier: &SampledPoint, _later: &SampledPoint) -> f64 {
        0.0
    }
}

