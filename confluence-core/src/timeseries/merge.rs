use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, VecDeque};
use std::rc::Rc;

use confluence_types::{
    Aggregation, ConfluenceError, InterpolationMode, MergeConfig, ModeOverride, Resampling,
    SampledPoint, TimeInterval,
};

use crate::cursor::Cursor;
use crate::interpolation::interpolate;
use crate::series::ReadOnlyTimeSeries;
use crate::timeseries::datapoint::{DataPoint, Frame};
use crate::timeseries::resample::{Grid, Resampler};

/// One merge input: a cursor plus the literal context needed to interpolate
/// it at the current output timestamp.
pub(crate) struct Track<'a> {
    cursor: Cursor<'a>,
    mode: InterpolationMode,
    last: Option<SampledPoint>,
    prior: Option<SampledPoint>,
}

impl<'a> Track<'a> {
    pub(crate) const fn new(cursor: Cursor<'a>, mode: InterpolationMode) -> Self {
        Self {
            cursor,
            mode,
            last: None,
            prior: None,
        }
    }

    pub(crate) const fn mode(&self) -> InterpolationMode {
        self.mode
    }

    pub(crate) fn head(&mut self) -> Option<i64> {
        self.cursor.peek_timestamp()
    }

    pub(crate) fn peek(&mut self) -> Option<&SampledPoint> {
        self.cursor.peek()
    }

    pub(crate) fn consume(&mut self) -> Option<&SampledPoint> {
        let p = self.cursor.next()?;
        self.prior = self.last.replace(p);
        self.last.as_ref()
    }

    /// Consume every head with `timestamp <= t`, copying each into `sink`.
    pub(crate) fn consume_through(&mut self, t: i64, sink: &mut Vec<SampledPoint>) {
        while self.head().is_some_and(|h| h <= t) {
            if let Some(p) = self.consume() {
                sink.push(p.clone());
            }
        }
    }

    /// Most recently consumed literal.
    pub(crate) const fn latest(&self) -> Option<&SampledPoint> {
        self.last.as_ref()
    }

    /// Latest consumed literal strictly before `t`.
    pub(crate) fn before(&self, t: i64) -> Option<&SampledPoint> {
        match &self.last {
            Some(p) if p.timestamp < t => Some(p),
            Some(_) => self.prior.as_ref(),
            None => None,
        }
    }

    /// Value at `t`; all heads at or before `t` must have been consumed.
    pub(crate) fn value_at(&mut self, t: i64) -> Option<SampledPoint> {
        if let Some(p) = self.last.as_ref().filter(|p| p.timestamp == t) {
            return Some(p.clone());
        }
        let next = self.cursor.peek().cloned();
        interpolate(self.mode, self.before(t), next.as_ref(), t)
    }
}

pub(crate) fn capture(
    tracks: &mut [Track<'_>],
    timestamp: i64,
    elements: BTreeMap<usize, SampledPoint>,
    synthetic: bool,
) -> Frame {
    let previous = tracks.iter().map(|tr| tr.before(timestamp).cloned()).collect();
    let next = tracks.iter_mut().map(|tr| tr.peek().cloned()).collect();
    Frame {
        timestamp,
        elements,
        previous,
        next,
        synthetic,
    }
}

/// N-way merge at native timestamps, driven by a min-heap of pending heads.
struct NativeMerge<'a> {
    tracks: Vec<Track<'a>>,
    heap: BinaryHeap<Reverse<(i64, usize)>>,
}

impl<'a> NativeMerge<'a> {
    fn new(mut tracks: Vec<Track<'a>>) -> Self {
        let heap = tracks
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, tr)| tr.head().map(|t| Reverse((t, idx))))
            .collect();
        Self { tracks, heap }
    }

    fn next_frame(&mut self) -> Option<Frame> {
        let &Reverse((t, _)) = self.heap.peek()?;
        let mut elements = BTreeMap::new();
        while let Some(&Reverse((ts, idx))) = self.heap.peek()
            && ts == t
        {
            self.heap.pop();
            let Some(track) = self.tracks.get_mut(idx) else {
                continue;
            };
            if let Some(p) = track.consume() {
                elements.insert(idx, p.clone());
            }
            if let Some(h) = track.head() {
                self.heap.push(Reverse((h, idx)));
            }
        }
        Some(capture(&mut self.tracks, t, elements, false))
    }
}

enum Engine<'a> {
    Native(NativeMerge<'a>),
    Resampled(Resampler<'a>),
}

impl Engine<'_> {
    fn next_frame(&mut self) -> Option<Frame> {
        match self {
            Self::Native(m) => m.next_frame(),
            Self::Resampled(r) => r.next_frame(),
        }
    }
}

/// Merges N series into an ascending stream of [`DataPoint`]s.
///
/// Depending on its configuration the merger emits at the union of the
/// inputs' timestamps, on a fixed-step grid or at the timestamps of
/// designated ruler series. It keeps a ring of the last
/// `max_historical_values` data points for [`MultiSeriesMerger::previous`].
///
/// Build one with [`MergerBuilder`].
pub struct MultiSeriesMerger<'a> {
    engine: Engine<'a>,
    modes: Rc<[InterpolationMode]>,
    max_history: usize,
    history: VecDeque<Rc<DataPoint>>,
    current: Option<Rc<DataPoint>>,
    generation: u64,
    pending: Option<Frame>,
}

impl<'a> MultiSeriesMerger<'a> {
    /// Start building a merger.
    #[must_use]
    pub fn builder() -> MergerBuilder<'a> {
        MergerBuilder::new()
    }

    /// Number of merged series.
    #[must_use]
    pub fn size(&self) -> usize {
        self.modes.len()
    }

    /// Effective interpolation mode per series.
    #[must_use]
    pub fn modes(&self) -> &[InterpolationMode] {
        &self.modes
    }

    /// Generation of the most recently produced data point; `0` before the first.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// True if another data point is available.
    pub fn has_next(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.engine.next_frame();
        }
        self.pending.is_some()
    }

    /// Produce the next data point.
    ///
    /// # Errors
    /// Returns `Exhausted` if no data point remains.
    pub fn advance(&mut self) -> Result<Rc<DataPoint>, ConfluenceError> {
        self.next().ok_or(ConfluenceError::Exhausted)
    }

    /// The data point produced `k` steps before `current`.
    ///
    /// # Errors
    /// Returns `StaleDataPoint` if `current` is not the most recently produced
    /// data point, and `InvalidLookback` if `k` is zero or exceeds the
    /// retained history.
    pub fn previous(&self, current: &DataPoint, k: usize) -> Result<Rc<DataPoint>, ConfluenceError> {
        if current.generation() != self.generation {
            return Err(ConfluenceError::StaleDataPoint {
                generation: current.generation(),
                current: self.generation,
            });
        }
        let available = self.history.len();
        if k == 0 || k > available {
            return Err(ConfluenceError::InvalidLookback {
                requested: k,
                available,
            });
        }
        self.history
            .get(available - k)
            .cloned()
            .ok_or(ConfluenceError::InvalidLookback {
                requested: k,
                available,
            })
    }
}

impl Iterator for MultiSeriesMerger<'_> {
    type Item = Rc<DataPoint>;

    fn next(&mut self) -> Option<Rc<DataPoint>> {
        let frame = match self.pending.take() {
            Some(f) => f,
            None => self.engine.next_frame()?,
        };
        self.generation += 1;
        let dp = Rc::new(DataPoint::from_frame(frame, self.generation, Rc::clone(&self.modes)));
        if let Some(prev) = self.current.replace(Rc::clone(&dp))
            && self.max_history > 0
        {
            if self.history.len() == self.max_history {
                self.history.pop_front();
            }
            self.history.push_back(prev);
        }
        Some(dp)
    }
}

enum Input<'a> {
    Cursor(Cursor<'a>, InterpolationMode),
    Series(&'a dyn ReadOnlyTimeSeries),
}

/// Fluent builder for [`MultiSeriesMerger`].
///
/// Inputs are indexed in the order they are added. Configuration is
/// validated by [`MergerBuilder::build`].
pub struct MergerBuilder<'a> {
    inputs: Vec<Input<'a>>,
    config: MergeConfig,
    conflict: Option<String>,
}

impl Default for MergerBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> MergerBuilder<'a> {
    /// Empty builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            config: MergeConfig::default(),
            conflict: None,
        }
    }

    /// Add a raw cursor with its interpolation mode.
    #[must_use]
    pub fn cursor(mut self, cursor: Cursor<'a>, mode: InterpolationMode) -> Self {
        self.inputs.push(Input::Cursor(cursor, mode));
        self
    }

    /// Add a series; it is read through `iter` restricted to the window.
    #[must_use]
    pub fn series<S: ReadOnlyTimeSeries + 'a>(mut self, series: &'a S) -> Self {
        self.inputs.push(Input::Series(series));
        self
    }

    /// Add several series in order.
    #[must_use]
    pub fn series_all<S, I>(mut self, series: I) -> Self
    where
        S: ReadOnlyTimeSeries + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        for s in series {
            self.inputs.push(Input::Series(s));
        }
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: MergeConfig) -> Self {
        self.config = config;
        self
    }

    /// Depth of the lookback ring.
    #[must_use]
    pub const fn max_historical_values(mut self, k: usize) -> Self {
        self.config.max_historical_values = k;
        self
    }

    /// Resample onto `start + n * step`. Exclusive with [`Self::step_rulers`].
    #[must_use]
    pub fn step_size(mut self, step: i64, start: i64) -> Self {
        if matches!(self.config.resampling, Resampling::StepRuler { .. }) {
            self.conflict = Some("fixed step size and step rulers are mutually exclusive".into());
        }
        self.config.resampling = Resampling::FixedStep { step, start };
        self
    }

    /// Resample onto the timestamps of the given inputs. Exclusive with
    /// [`Self::step_size`].
    #[must_use]
    pub fn step_rulers(mut self, rulers: impl IntoIterator<Item = usize>) -> Self {
        if matches!(self.config.resampling, Resampling::FixedStep { .. }) {
            self.conflict = Some("fixed step size and step rulers are mutually exclusive".into());
        }
        self.config.resampling = Resampling::StepRuler {
            rulers: rulers.into_iter().collect(),
        };
        self
    }

    /// How resampled values are derived.
    #[must_use]
    pub const fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.config.aggregation = aggregation;
        self
    }

    /// Apply `mode` to every input.
    #[must_use]
    pub fn interpolation_mode(mut self, mode: InterpolationMode) -> Self {
        self.config.modes = ModeOverride::Global(mode);
        self
    }

    /// One mode per input, in input order.
    #[must_use]
    pub fn per_series_modes(mut self, modes: Vec<InterpolationMode>) -> Self {
        self.config.modes = ModeOverride::PerSeries(modes);
        self
    }

    /// Fallback point for input `idx` before its first literal point.
    #[must_use]
    pub fn lower_boundary(mut self, idx: usize, point: SampledPoint) -> Self {
        self.config.lower_boundaries.insert(idx, point);
        self
    }

    /// Fallback point for input `idx` after its last literal point.
    #[must_use]
    pub fn upper_boundary(mut self, idx: usize, point: SampledPoint) -> Self {
        self.config.upper_boundaries.insert(idx, point);
        self
    }

    /// Restrict every input to `window`.
    #[must_use]
    pub const fn window(mut self, window: TimeInterval) -> Self {
        self.config.window = Some(window);
        self
    }

    /// Validate the configuration and build the merger.
    ///
    /// # Errors
    /// Returns `InvalidArg` for conflicting or out-of-range options.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "confluence::core::merger_build",
            skip(self),
            fields(series = self.inputs.len()),
        )
    )]
    pub fn build(self) -> Result<MultiSeriesMerger<'a>, ConfluenceError> {
        let Self {
            inputs,
            config,
            conflict,
        } = self;
        if let Some(msg) = conflict {
            return Err(ConfluenceError::InvalidArg(msg));
        }
        config.validate(inputs.len())?;
        let MergeConfig {
            max_historical_values,
            resampling,
            aggregation,
            modes: overrides,
            mut lower_boundaries,
            mut upper_boundaries,
            window,
        } = config;

        let mut tracks = Vec::with_capacity(inputs.len());
        let mut modes = Vec::with_capacity(inputs.len());
        for (idx, input) in inputs.into_iter().enumerate() {
            let (cursor, intrinsic) = match input {
                Input::Cursor(c, m) => match window {
                    Some(w) => (c.bounded(w), m),
                    None => (c, m),
                },
                Input::Series(s) => (
                    s.iter(window.unwrap_or(TimeInterval::ALL)),
                    s.interpolation_mode(),
                ),
            };
            let cursor = cursor.with_boundaries(
                lower_boundaries.remove(&idx),
                upper_boundaries.remove(&idx),
            );
            let mode = overrides.mode_for(idx, intrinsic);
            modes.push(mode);
            tracks.push(Track::new(cursor, mode));
        }

        let engine = match (resampling, aggregation) {
            (Resampling::Native, Aggregation::Interpolate) => {
                Engine::Native(NativeMerge::new(tracks))
            }
            (Resampling::Native, agg) => {
                let all = (0..tracks.len()).collect();
                Engine::Resampled(Resampler::new(tracks, Grid::rulers(all), agg))
            }
            (Resampling::FixedStep { step, start }, agg) => {
                Engine::Resampled(Resampler::new(tracks, Grid::fixed(step, start), agg))
            }
            (Resampling::StepRuler { rulers }, agg) => {
                Engine::Resampled(Resampler::new(tracks, Grid::rulers(rulers), agg))
            }
        };

        Ok(MultiSeriesMerger {
            engine,
            modes: modes.into(),
            max_history: max_historical_values,
            history: VecDeque::with_capacity(max_historical_values.min(64)),
            current: None,
            generation: 0,
            pending: None,
        })
    }
}
