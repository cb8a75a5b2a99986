use std::sync::Arc;

use confluence_core::{
    ConfluenceError, Cursor, InterpolationMode, MemoryTimeSeries, MergeConfig, MergerBuilder, ModeOverride,
    ReadOnlyTimeSeries, Reducer, ReductionIterator, ReductionKind, SampledPoint, TimeInterval,
    Value, ValueKind, deduce_mode, ensure_kind, next_timestamp, previous_timestamp, value_for_mode,
};

/// User-supplied reduction over the GOOD values of one cross-section.
pub type ReduceFn = Arc<dyn Fn(&[SampledPoint]) -> Option<Value> + Send + Sync>;

#[derive(Clone)]
enum Combine {
    Builtin(ReductionKind),
    Custom(ReduceFn),
}

impl Reducer for Combine {
    fn reduce(&self, values: &[SampledPoint]) -> Option<Value> {
        match self {
            Self::Builtin(kind) => kind.reduce(values),
            Self::Custom(f) => f(values),
        }
    }
}

/// Stores built-in numeric results as the composite's declared kind.
///
/// Sum and average are computed in `f64`; integer kinds truncate toward zero
/// and non-finite results become undefined.
#[derive(Clone, Debug)]
struct Shaped {
    combine: Combine,
    kind: ValueKind,
}

impl Reducer for Shaped {
    fn reduce(&self, values: &[SampledPoint]) -> Option<Value> {
        let value = self.combine.reduce(values)?;
        match (&self.combine, value) {
            (Combine::Builtin(ReductionKind::Sum | ReductionKind::Average), Value::Float(v))
                if self.kind != ValueKind::Float =>
            {
                if v.is_finite() {
                    Value::from_f64_as(self.kind, v)
                } else {
                    None
                }
            }
            (_, value) => Some(value),
        }
    }
}

impl std::fmt::Debug for Combine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin(kind) => f.debug_tuple("Builtin").field(kind).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Read-only series derived from N inputs by a reduction.
///
/// Nothing is cached: every read builds a fresh merger and reduction over the
/// requested window. Constituents are evaluated at the window start so that
/// the first output lies on it, and at the window end so that values between
/// the last literal point and the end interpolate correctly.
///
/// Use [`CompositeTimeSeries::materialize`] for an eager copy.
pub struct CompositeTimeSeries<S> {
    inputs: Vec<S>,
    combine: Combine,
    ignore_gaps: bool,
    modes: ModeOverride,
    result_mode: InterpolationMode,
    kind: ValueKind,
}

impl<S: ReadOnlyTimeSeries> CompositeTimeSeries<S> {
    /// Start building a composite.
    #[must_use]
    pub fn builder() -> CompositeBuilder<S> {
        CompositeBuilder::new()
    }

    /// The constituents, in input order.
    #[must_use]
    pub fn inputs(&self) -> &[S] {
        &self.inputs
    }

    /// True if undefined constituents are skipped rather than poisoning a point.
    #[must_use]
    pub const fn ignores_gaps(&self) -> bool {
        self.ignore_gaps
    }

    fn boundary(&self, idx: usize, series: &S, t: i64) -> Option<SampledPoint> {
        let mode = self.modes.mode_for(idx, series.interpolation_mode());
        value_for_mode(series, t, mode)
    }

    fn pipeline(&self, interval: TimeInterval) -> Result<ReductionIterator<'_, Shaped>, ConfluenceError> {
        let mut config = MergeConfig {
            modes: self.modes.clone(),
            window: Some(interval),
            ..MergeConfig::default()
        };
        for (idx, s) in self.inputs.iter().enumerate() {
            if interval.start != i64::MIN
                && let Some(p) = self.boundary(idx, s, interval.start)
            {
                config.lower_boundaries.insert(idx, p);
            }
            if interval.end != i64::MAX
                && let Some(p) = self.boundary(idx, s, interval.end)
            {
                config.upper_boundaries.insert(idx, p);
            }
        }
        let merger = MergerBuilder::new()
            .series_all(self.inputs.iter())
            .config(config)
            .build()?;
        let reducer = Shaped {
            combine: self.combine.clone(),
            kind: self.kind,
        };
        Ok(ReductionIterator::new(merger, reducer, self.ignore_gaps))
    }

    /// Evaluate the composite over `interval`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `interval` is reversed.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "confluence::composite::evaluate",
            skip(self),
            fields(start = interval.start, end = interval.end, series = self.inputs.len()),
        )
    )]
    pub fn evaluate(&self, interval: TimeInterval) -> Result<Vec<SampledPoint>, ConfluenceError> {
        let interval = TimeInterval::try_new(interval.start, interval.end)?;
        if interval.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .pipeline(interval)?
            .take_while(|p| p.timestamp < interval.end)
            .collect())
    }

    /// Eager copy of the composite over `interval`, carrying the result mode.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `interval` is reversed.
    pub fn materialize(&self, interval: TimeInterval) -> Result<MemoryTimeSeries, ConfluenceError> {
        MemoryTimeSeries::from_points(self.result_mode, self.evaluate(interval)?)
    }

    fn point_at(&self, t: i64) -> Option<SampledPoint> {
        let window = TimeInterval::new(t, t.checked_add(1)?);
        self.evaluate(window).ok()?.into_iter().next()
    }
}

impl<S: ReadOnlyTimeSeries> ReadOnlyTimeSeries for CompositeTimeSeries<S> {
    fn previous_value(&self, t: i64) -> Option<SampledPoint> {
        self.point_at(previous_timestamp(&self.inputs, t)?)
    }

    fn next_value(&self, t: i64) -> Option<SampledPoint> {
        self.point_at(next_timestamp(&self.inputs, t)?)
    }

    fn values(&self, interval: TimeInterval) -> Vec<SampledPoint> {
        match self.evaluate(interval) {
            Ok(points) => points,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "composite rejected window");
                Vec::new()
            }
        }
    }

    fn interpolation_mode(&self) -> InterpolationMode {
        self.result_mode
    }

    fn value_kind(&self) -> Option<ValueKind> {
        Some(self.kind)
    }

    fn iter(&self, interval: TimeInterval) -> Cursor<'_> {
        if interval.is_empty() {
            return Cursor::empty();
        }
        match self.pipeline(interval) {
            Ok(it) => Cursor::new(it.take_while(move |p| p.timestamp < interval.end)),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "composite rejected window");
                Cursor::empty()
            }
        }
    }

    fn value_at(&self, t: i64) -> Option<SampledPoint> {
        self.point_at(t)
    }
}

impl<S> std::fmt::Debug for CompositeTimeSeries<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeTimeSeries")
            .field("inputs", &self.inputs.len())
            .field("combine", &self.combine)
            .field("ignore_gaps", &self.ignore_gaps)
            .field("result_mode", &self.result_mode)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for [`CompositeTimeSeries`].
///
/// Exactly one reduction must be chosen: one of the built-ins or a custom
/// function. AND/OR need boolean inputs, sum and average numeric ones.
pub struct CompositeBuilder<S> {
    inputs: Vec<S>,
    combine: Option<Combine>,
    conflict: Option<String>,
    ignore_gaps: bool,
    modes: ModeOverride,
    result_mode: Option<InterpolationMode>,
    kind: Option<ValueKind>,
}

impl<S: ReadOnlyTimeSeries> Default for CompositeBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ReadOnlyTimeSeries> CompositeBuilder<S> {
    /// Empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inputs: Vec::new(),
            combine: None,
            conflict: None,
            ignore_gaps: false,
            modes: ModeOverride::Intrinsic,
            result_mode: None,
            kind: None,
        }
    }

    /// Append one input.
    #[must_use]
    pub fn series(mut self, series: S) -> Self {
        self.inputs.push(series);
        self
    }

    /// Append several inputs in order.
    #[must_use]
    pub fn series_all(mut self, series: impl IntoIterator<Item = S>) -> Self {
        self.inputs.extend(series);
        self
    }

    fn set_combine(mut self, combine: Combine) -> Self {
        if let Some(previous) = &self.combine {
            self.conflict = Some(format!(
                "reduction already set to {previous:?}, cannot also use {combine:?}"
            ));
        }
        self.combine = Some(combine);
        self
    }

    /// Reduce with one of the built-in reductions.
    #[must_use]
    pub fn reduction(self, kind: ReductionKind) -> Self {
        self.set_combine(Combine::Builtin(kind))
    }

    /// Sum of numeric inputs.
    #[must_use]
    pub fn sum(self) -> Self {
        self.reduction(ReductionKind::Sum)
    }

    /// Average over the contributing numeric inputs.
    #[must_use]
    pub fn average(self) -> Self {
        self.reduction(ReductionKind::Average)
    }

    /// Logical AND of boolean inputs.
    #[must_use]
    pub fn and(self) -> Self {
        self.reduction(ReductionKind::And)
    }

    /// Logical OR of boolean inputs.
    #[must_use]
    pub fn or(self) -> Self {
        self.reduction(ReductionKind::Or)
    }

    /// Reduce with a custom function of the GOOD values at each point.
    #[must_use]
    pub fn function<F>(self, f: F) -> Self
    where
        F: Fn(&[SampledPoint]) -> Option<Value> + Send + Sync + 'static,
    {
        self.set_combine(Combine::Custom(Arc::new(f)))
    }

    /// Skip undefined constituents instead of marking the point BAD.
    #[must_use]
    pub const fn ignore_gaps(mut self, yes: bool) -> Self {
        self.ignore_gaps = yes;
        self
    }

    /// Interpolate every constituent with `mode`.
    #[must_use]
    pub fn interpolation_mode(mut self, mode: InterpolationMode) -> Self {
        self.modes = ModeOverride::Global(mode);
        self
    }

    /// One constituent mode per input, in input order.
    #[must_use]
    pub fn per_series_modes(mut self, modes: Vec<InterpolationMode>) -> Self {
        self.modes = ModeOverride::PerSeries(modes);
        self
    }

    /// Interpolation mode reported by the composite itself.
    #[must_use]
    pub const fn result_mode(mut self, mode: InterpolationMode) -> Self {
        self.result_mode = Some(mode);
        self
    }

    /// Payload kind reported by the composite.
    ///
    /// Sum and average results are converted to this kind; integer kinds
    /// truncate toward zero.
    #[must_use]
    pub const fn value_kind(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    fn check_numeric_inputs(&self) -> Result<(), ConfluenceError> {
        for (idx, s) in self.inputs.iter().enumerate() {
            if let Some(k) = s.value_kind()
                && !k.is_numeric()
            {
                return Err(ConfluenceError::invalid_arg(format!(
                    "series {idx} holds {k:?} values; sum and average need numeric inputs"
                )));
            }
        }
        Ok(())
    }

    /// Validate and build.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no or several reductions were chosen, if the
    /// reduction does not fit the input or result kind, if the per-series mode
    /// list does not match the inputs, or if a boolean composite is given a
    /// result mode other than STEPS.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "confluence::composite::build",
            skip(self),
            fields(series = self.inputs.len()),
        )
    )]
    pub fn build(self) -> Result<CompositeTimeSeries<S>, ConfluenceError> {
        if let Some(msg) = &self.conflict {
            return Err(ConfluenceError::InvalidArg(msg.clone()));
        }
        let combine = self
            .combine
            .clone()
            .ok_or_else(|| ConfluenceError::invalid_arg("no reduction configured"))?;
        if let ModeOverride::PerSeries(ms) = &self.modes
            && ms.len() != self.inputs.len()
        {
            return Err(ConfluenceError::invalid_arg(format!(
                "{} interpolation modes given for {} series",
                ms.len(),
                self.inputs.len()
            )));
        }

        let kind = match &combine {
            Combine::Builtin(ReductionKind::And | ReductionKind::Or) => {
                if self.kind.is_some_and(|k| k != ValueKind::Boolean) {
                    return Err(ConfluenceError::invalid_arg(
                        "AND/OR composites are boolean",
                    ));
                }
                ensure_kind(&self.inputs, ValueKind::Boolean)?;
                ValueKind::Boolean
            }
            Combine::Builtin(ReductionKind::Sum | ReductionKind::Average) => {
                let kind = self.kind.unwrap_or(ValueKind::Float);
                if !kind.is_numeric() {
                    return Err(ConfluenceError::invalid_arg(format!(
                        "sum and average produce numeric values, not {kind:?}"
                    )));
                }
                self.check_numeric_inputs()?;
                kind
            }
            Combine::Custom(_) => self.kind.unwrap_or(ValueKind::Float),
        };

        let result_mode = if kind == ValueKind::Boolean {
            match self.result_mode {
                None | Some(InterpolationMode::Steps) => InterpolationMode::Steps,
                Some(other) => {
                    return Err(ConfluenceError::unsupported(format!(
                        "boolean composite/{other}"
                    )));
                }
            }
        } else {
            self.result_mode.unwrap_or_else(|| {
                deduce_mode(
                    self.inputs
                        .iter()
                        .enumerate()
                        .map(|(i, s)| self.modes.mode_for(i, s.interpolation_mode())),
                )
            })
        };

        Ok(CompositeTimeSeries {
            inputs: self.inputs,
            combine,
            ignore_gaps: self.ignore_gaps,
            modes: self.modes,
            result_mode,
            kind,
        })
    }
}
