use std::collections::BTreeMap;

use confluence_types::{Aggregation, InterpolationMode, Quality, SampledPoint, Value};

use crate::interpolation::{function_for, interpolate};
use crate::timeseries::datapoint::Frame;
use crate::timeseries::merge::{Track, capture};

/// Output grid of a resampling merger.
pub(crate) enum Grid {
    /// `anchor + n * step`, starting at the first grid point not before the
    /// earliest input point.
    Fixed { step: i64, anchor: i64 },
    /// Literal timestamps of the ruler inputs.
    Rulers(Vec<usize>),
}

impl Grid {
    pub(crate) const fn fixed(step: i64, anchor: i64) -> Self {
        Self::Fixed { step, anchor }
    }

    pub(crate) const fn rulers(rulers: Vec<usize>) -> Self {
        Self::Rulers(rulers)
    }
}

/// Smallest `anchor + n * step` that is `>= t`.
fn align_up(t: i64, anchor: i64, step: i64) -> Option<i64> {
    let (t, anchor, step) = (i128::from(t), i128::from(anchor), i128::from(step));
    let offset = (t - anchor).rem_euclid(step);
    let aligned = if offset == 0 { t } else { t + (step - offset) };
    i64::try_from(aligned).ok()
}

pub(crate) struct Resampler<'a> {
    tracks: Vec<Track<'a>>,
    grid: Grid,
    aggregation: Aggregation,
    previous: Option<i64>,
    scratch: Vec<SampledPoint>,
}

impl<'a> Resampler<'a> {
    pub(crate) const fn new(tracks: Vec<Track<'a>>, grid: Grid, aggregation: Aggregation) -> Self {
        Self {
            tracks,
            grid,
            aggregation,
            previous: None,
            scratch: Vec::new(),
        }
    }

    fn next_grid_point(&mut self) -> Option<i64> {
        match &self.grid {
            Grid::Fixed { step, anchor } => {
                let earliest = self.tracks.iter_mut().filter_map(Track::head).min()?;
                match self.previous {
                    Some(p) => p.checked_add(*step),
                    None => align_up(earliest, *anchor, *step),
                }
            }
            Grid::Rulers(rulers) => rulers
                .iter()
                .filter_map(|&r| self.tracks.get_mut(r)?.head())
                .min(),
        }
    }

    /// Start of the window that ends at grid point `t`.
    fn window_start(&self, t: i64) -> Option<i64> {
        match (self.previous, &self.grid) {
            (Some(p), _) => Some(p),
            (None, Grid::Fixed { step, .. }) => t.checked_sub(*step),
            (None, Grid::Rulers(_)) => None,
        }
    }

    pub(crate) fn next_frame(&mut self) -> Option<Frame> {
        let t = self.next_grid_point()?;
        let start = self.window_start(t);
        let aggregation = self.aggregation;
        let mut elements = BTreeMap::new();
        for (idx, track) in self.tracks.iter_mut().enumerate() {
            let anchor = track.latest().cloned();
            self.scratch.clear();
            track.consume_through(t, &mut self.scratch);
            let value = match aggregation {
                Aggregation::Interpolate => track.value_at(t),
                Aggregation::Average | Aggregation::Integrate => {
                    aggregate(track, anchor.as_ref(), &self.scratch, start, t, aggregation)
                }
            };
            if let Some(v) = value {
                elements.insert(idx, v);
            }
        }
        self.previous = Some(t);
        Some(capture(&mut self.tracks, t, elements, true))
    }
}

/// Average or integral of one track over `[start, end)`.
///
/// `anchor` is the latest literal at or before `start`, `consumed` the
/// literals in `(start, end]` just taken from the track.
fn aggregate(
    track: &mut Track<'_>,
    anchor: Option<&SampledPoint>,
    consumed: &[SampledPoint],
    start: Option<i64>,
    end: i64,
    aggregation: Aggregation,
) -> Option<SampledPoint> {
    let end_value = track.value_at(end);
    let Some(start) = start.filter(|&s| s < end) else {
        return instantaneous(end_value, end, aggregation);
    };
    let mode = track.mode();
    let interior = consumed.iter().filter(|p| p.timestamp > start && p.timestamp < end);

    if !matches!(mode, InterpolationMode::Linear | InterpolationMode::Steps) {
        let literals: Vec<f64> = anchor
            .filter(|p| p.timestamp == start)
            .into_iter()
            .chain(interior)
            .filter_map(SampledPoint::good_f64)
            .collect();
        if literals.is_empty() {
            return instantaneous(end_value, end, aggregation);
        }
        let value = match aggregation {
            Aggregation::Integrate => 0.0,
            _ => {
                #[allow(clippy::cast_precision_loss)]
                let n = literals.len() as f64;
                literals.iter().sum::<f64>() / n
            }
        };
        return Some(SampledPoint::good(end, value));
    }

    let first_after = consumed.first().cloned().or_else(|| track.peek().cloned());
    let start_value = match anchor {
        Some(p) if p.timestamp == start => Some(p.clone()),
        _ => interpolate(mode, anchor, first_after.as_ref(), start),
    };
    let sequence: Vec<SampledPoint> = start_value
        .into_iter()
        .chain(interior.cloned())
        .chain(end_value.clone())
        .collect();

    let f = function_for(mode);
    let (mut total, mut covered) = (0.0, 0_u64);
    for pair in sequence.windows(2) {
        let (l, r) = (&pair[0], &pair[1]);
        let integrable = match mode {
            InterpolationMode::Steps => l.good_f64().is_some(),
            _ => l.good_f64().is_some() && r.good_f64().is_some(),
        };
        if integrable {
            total += f.integrate(l, r);
            covered = covered.saturating_add(r.timestamp.abs_diff(l.timestamp));
        }
    }
    if covered == 0 {
        return instantaneous(end_value, end, aggregation);
    }
    let value = match aggregation {
        #[allow(clippy::cast_precision_loss)]
        Aggregation::Average => total / covered as f64,
        _ => total,
    };
    Some(SampledPoint::good(end, value))
}

/// Fallback for an empty window: the value at the grid point itself.
fn instantaneous(
    value: Option<SampledPoint>,
    end: i64,
    aggregation: Aggregation,
) -> Option<SampledPoint> {
    let v = value?;
    let numeric = v.value.as_f64();
    let quality = if numeric.is_some() { v.quality } else { Quality::Bad };
    let value = match (aggregation, numeric) {
        (Aggregation::Integrate, _) => Value::Float(0.0),
        (_, Some(x)) => Value::Float(x),
        (_, None) => Value::NAN,
    };
    Some(SampledPoint {
        timestamp: end,
        value,
        quality,
    })
}
