//! confluence-core
//!
//! Lazy, pull-based machinery for combining independently sampled time
//! series.
//!
//! - `cursor`: forward iteration over one sorted series, optionally windowed
//!   and padded with boundary points.
//! - `interpolation`: per-mode interpolation and definite integration.
//! - `series`: the read-only series capability and its in-memory store.
//! - `timeseries`: the N-way merger, resampling, reduction, differences and
//!   single-series numeric operations.
//!
//! Threading
//! ---------
//! Everything here runs synchronously on the calling thread inside `next()`
//! or the operation being called. Cursors, mergers and data points are not
//! shareable across threads; each iteration belongs to one consumer and
//! assumes its inputs do not change while it runs.
//!
#![warn(missing_docs)]

/// Forward cursors over a single series.
pub mod cursor;
/// Interpolation strategies per mode.
pub mod interpolation;
/// In-memory mutable series.
pub mod memory;
/// The read-only series capability.
pub mod series;
/// Merging, resampling, reduction and numeric operations.
pub mod timeseries;

pub use confluence_types::*;
pub use cursor::Cursor;
pub use interpolation::{InterpolationFunction, function_for, interpolate};
pub use memory::MemoryTimeSeries;
pub use series::{ReadOnlyTimeSeries, value_for_mode};
pub use timeseries::datapoint::DataPoint;
pub use timeseries::diff::{DiffIterator, DiffPoint};
pub use timeseries::infer::{deduce_mode, next_timestamp, previous_timestamp};
pub use timeseries::merge::{MergerBuilder, MultiSeriesMerger};
pub use timeseries::ops::FloatSeriesExt;
pub use timeseries::reduce::{ReductionIterator, Reducer};
pub use timeseries::util::ensure_kind;
