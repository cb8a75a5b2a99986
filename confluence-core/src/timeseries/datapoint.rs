use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use confluence_types::{InterpolationMode, SampledPoint};

use crate::interpolation::interpolate;

/// Raw output of one merge step before it is stamped and shared.
#[derive(Debug)]
pub(crate) struct Frame {
    pub(crate) timestamp: i64,
    pub(crate) elements: BTreeMap<usize, SampledPoint>,
    pub(crate) previous: Vec<Option<SampledPoint>>,
    pub(crate) next: Vec<Option<SampledPoint>>,
    pub(crate) synthetic: bool,
}

/// Cross-section of N series at one output timestamp.
///
/// On a native merge, `elements` holds the literal points of exactly those
/// series that have a point at [`DataPoint::timestamp`]; other series are
/// evaluated on demand from their literal neighbours. On a resampled grid the
/// point is synthetic: `elements` holds the resampled value of every series
/// that is defined at the grid point and nothing is interpolated afterwards.
///
/// Lookback through earlier data points is provided by the merger that
/// produced this one (see `MultiSeriesMerger::previous`).
pub struct DataPoint {
    timestamp: i64,
    generation: u64,
    synthetic: bool,
    elements: BTreeMap<usize, SampledPoint>,
    previous: Vec<Option<SampledPoint>>,
    next: Vec<Option<SampledPoint>>,
    modes: Rc<[InterpolationMode]>,
    context: RefCell<Option<Rc<dyn Any>>>,
}

impl DataPoint {
    pub(crate) fn from_frame(frame: Frame, generation: u64, modes: Rc<[InterpolationMode]>) -> Self {
        Self {
            timestamp: frame.timestamp,
            generation,
            synthetic: frame.synthetic,
            elements: frame.elements,
            previous: frame.previous,
            next: frame.next,
            modes,
            context: RefCell::new(None),
        }
    }

    /// Output timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Sequence number assigned by the producing merger, starting at 1.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// True on a resampled grid.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    /// Number of merged series.
    #[must_use]
    pub fn size(&self) -> usize {
        self.modes.len()
    }

    /// Points stored at this timestamp, keyed by series index.
    #[must_use]
    pub const fn elements(&self) -> &BTreeMap<usize, SampledPoint> {
        &self.elements
    }

    /// Point stored for series `idx`, if any.
    #[must_use]
    pub fn element(&self, idx: usize) -> Option<&SampledPoint> {
        self.elements.get(&idx)
    }

    /// Latest literal point of series `idx` strictly before this timestamp.
    #[must_use]
    pub fn previous(&self, idx: usize) -> Option<&SampledPoint> {
        self.previous.get(idx)?.as_ref()
    }

    /// Earliest literal point of series `idx` strictly after this timestamp.
    #[must_use]
    pub fn next(&self, idx: usize) -> Option<&SampledPoint> {
        self.next.get(idx)?.as_ref()
    }

    /// Effective interpolation mode of series `idx`.
    #[must_use]
    pub fn mode(&self, idx: usize) -> Option<InterpolationMode> {
        self.modes.get(idx).copied()
    }

    /// Value of series `idx` under its effective mode.
    #[must_use]
    pub fn value(&self, idx: usize) -> Option<SampledPoint> {
        self.value_with_mode(idx, self.mode(idx)?)
    }

    /// Value of series `idx`, interpolating with `mode` where no point is stored.
    #[must_use]
    pub fn value_with_mode(&self, idx: usize, mode: InterpolationMode) -> Option<SampledPoint> {
        if let Some(p) = self.element(idx) {
            return Some(p.clone());
        }
        if self.synthetic || idx >= self.size() {
            return None;
        }
        interpolate(mode, self.previous(idx), self.next(idx), self.timestamp)
    }

    /// Attach caller context, replacing any previous one.
    pub fn set_context<T: Any>(&self, value: T) {
        *self.context.borrow_mut() = Some(Rc::new(value));
    }

    /// Caller context, if one of type `T` is attached.
    #[must_use]
    pub fn context<T: Any>(&self) -> Option<Rc<T>> {
        let ctx = self.context.borrow().clone()?;
        ctx.downcast::<T>().ok()
    }

    /// Remove the caller context.
    pub fn clear_context(&self) {
        self.context.borrow_mut().take();
    }
}

impl std::fmt::Debug for DataPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataPoint")
            .field("timestamp", &self.timestamp)
            .field("generation", &self.generation)
            .field("synthetic", &self.synthetic)
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}
