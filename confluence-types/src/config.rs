//! Configuration values for mergers and composite series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfluenceError;
use crate::interval::TimeInterval;
use crate::mode::InterpolationMode;
use crate::point::SampledPoint;

/// Output grid of a merger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resampling {
    /// Emit at the union of the inputs' native timestamps.
    #[default]
    Native,
    /// Emit at `start + n * step`.
    FixedStep {
        /// Grid spacing in milliseconds; must be positive.
        step: i64,
        /// Grid anchor. Only its residue modulo `step` matters.
        start: i64,
    },
    /// Emit at the literal timestamps of the designated ruler inputs.
    StepRuler {
        /// Indices of the ruler inputs.
        rulers: Vec<usize>,
    },
}

/// How resampled values are derived for skipped sub-intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aggregation {
    /// Interpolate at the grid point.
    #[default]
    Interpolate,
    /// Time-weighted average over the window ending at the grid point.
    Average,
    /// Definite integral over the window ending at the grid point.
    Integrate,
}

/// Which interpolation mode is applied to each input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModeOverride {
    /// Use each series' own mode.
    #[default]
    Intrinsic,
    /// Use one mode for every input.
    Global(InterpolationMode),
    /// One mode per input, in input order.
    PerSeries(Vec<InterpolationMode>),
}

impl ModeOverride {
    /// Effective mode for input `idx` whose own mode is `intrinsic`.
    #[must_use]
    pub fn mode_for(&self, idx: usize, intrinsic: InterpolationMode) -> InterpolationMode {
        match self {
            Self::Intrinsic => intrinsic,
            Self::Global(m) => *m,
            Self::PerSeries(ms) => ms.get(idx).copied().unwrap_or(intrinsic),
        }
    }
}

/// Built-in reductions for composite series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReductionKind {
    /// Sum of numeric inputs.
    Sum,
    /// Sum divided by the number of contributing inputs.
    Average,
    /// Logical AND of boolean inputs.
    And,
    /// Logical OR of boolean inputs.
    Or,
}

/// Full configuration of a multi-series merger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Depth of the lookback ring; `0` disables lookback.
    pub max_historical_values: usize,
    /// Output grid.
    pub resampling: Resampling,
    /// Value derivation on a resampled grid.
    pub aggregation: Aggregation,
    /// Interpolation mode per input.
    pub modes: ModeOverride,
    /// Per-input fallback emitted before the first literal point.
    pub lower_boundaries: BTreeMap<usize, SampledPoint>,
    /// Per-input fallback emitted after the last literal point.
    pub upper_boundaries: BTreeMap<usize, SampledPoint>,
    /// Restrict every input to this window.
    pub window: Option<TimeInterval>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_historical_values: 0,
            resampling: Resampling::Native,
            aggregation: Aggregation::Interpolate,
            modes: ModeOverride::Intrinsic,
            lower_boundaries: BTreeMap::new(),
            upper_boundaries: BTreeMap::new(),
            window: None,
        }
    }
}

impl MergeConfig {
    /// Validate this configuration against `series_count` inputs.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a non-positive step, an empty or out-of-range
    /// ruler list, a per-series mode list of the wrong length, an
    /// out-of-range boundary index or a reversed window.
    pub fn validate(&self, series_count: usize) -> Result<(), ConfluenceError> {
        match &self.resampling {
            Resampling::Native => {}
            Resampling::FixedStep { step, .. } => {
                if *step <= 0 {
                    return Err(ConfluenceError::invalid_arg(format!(
                        "step size must be positive, got {step}"
                    )));
                }
            }
            Resampling::StepRuler { rulers } => {
                if rulers.is_empty() {
                    return Err(ConfluenceError::invalid_arg("step ruler list is empty"));
                }
                if let Some(bad) = rulers.iter().find(|&&r| r >= series_count) {
                    return Err(ConfluenceError::invalid_arg(format!(
                        "step ruler index {bad} out of range for {series_count} series"
                    )));
                }
            }
        }
        if let ModeOverride::PerSeries(ms) = &self.modes
            && ms.len() != series_count
        {
            return Err(ConfluenceError::invalid_arg(format!(
                "{} interpolation modes given for {series_count} series",
                ms.len()
            )));
        }
        for (side, map) in [
            ("lower", &self.lower_boundaries),
            ("upper", &self.upper_boundaries),
        ] {
            if let Some(idx) = map.keys().find(|&&i| i >= series_count) {
                return Err(ConfluenceError::invalid_arg(format!(
                    "{side} boundary index {idx} out of range for {series_count} series"
                )));
            }
        }
        if let Some(w) = self.window
            && w.end < w.start
        {
            return Err(ConfluenceError::invalid_arg(format!(
                "window end {} precedes start {}",
                w.end, w.start
            )));
        }
        Ok(())
    }
}
