//! Confluence combines independently sampled time series into one view.
//!
//! Overview
//! - Merges any number of sorted series in lockstep and exposes, at each
//!   union timestamp, every series' stored or interpolated value.
//! - Resamples onto a fixed step grid or onto the timestamps of chosen
//!   "ruler" series, optionally averaging or integrating over each step.
//! - Reduces each merged cross-section (sum, average, AND, OR or a custom
//!   function) into a single derived series.
//! - Exposes such reductions as lazy [`CompositeTimeSeries`] that recompute on
//!   every read.
//!
//! Key behaviors and trade-offs
//! - Interpolation modes: NONE and NEAREST never invent values between
//!   points beyond the nearest literal; STEPS holds the previous value;
//!   LINEAR interpolates between GOOD neighbours and integrates exactly.
//! - Gaps: a series without a GOOD value at a timestamp either poisons the
//!   reduced point (BAD NaN) or is skipped, depending on `ignore_gaps`.
//! - Composites hold no cache: reads are always current, repeated reads cost
//!   a fresh merge. Use [`CompositeTimeSeries::materialize`] to snapshot.
//!
//! Examples
//! Summing two meters over a closed window:
//! ```rust,ignore
//! use confluence::{CompositeTimeSeries, ReadOnlyTimeSeries, TimeInterval};
//!
//! let total = CompositeTimeSeries::builder()
//!     .series(&meter_a)
//!     .series(&meter_b)
//!     .sum()
//!     .ignore_gaps(true)
//!     .build()?;
//! for p in total.values(TimeInterval::closed(0, 10)) {
//!     println!("{} {:?}", p.timestamp, p.value);
//! }
//! ```
//!
//! Step-averaging a single series:
//! ```rust,ignore
//! use confluence::{Aggregation, MergerBuilder};
//!
//! let merger = MergerBuilder::new()
//!     .series(&meter_a)
//!     .step_size(900_000, 0)
//!     .aggregation(Aggregation::Average)
//!     .build()?;
//! for dp in merger {
//!     println!("{} {:?}", dp.timestamp(), dp.value(0));
//! }
//! ```
//!
//! Threading
//! ---------
//! Mergers and data points are single-consumer and not `Send`. Composites
//! are as shareable as their inputs; wrap mutable inputs in a lock if other
//! threads write while a composite is being read.
#![warn(missing_docs)]

/// Lazy composite series.
pub mod composite;

pub use composite::{CompositeBuilder, CompositeTimeSeries, ReduceFn};
pub use confluence_core::*;
