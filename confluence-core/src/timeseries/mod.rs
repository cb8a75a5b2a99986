//! Multi-series merging and the operations built on it.
//!
//! Modules include:
//! - `merge`: N-way merge into data points, with lookback and the builder
//! - `datapoint`: the cross-section produced per merge step
//! - `resample`: fixed-step and step-ruler grids with averaging/integration
//! - `reduce`: reduction of data points into one derived series
//! - `diff`: differences between consecutive data points
//! - `ops`: integrals, extrema, downsampling and positive domains of one series
//! - `infer`: timestamp lookup across series and result-mode deduction
/// Cross-section type produced by the merger.
pub mod datapoint;
/// Differences between consecutive data points.
pub mod diff;
/// Timestamp and mode helpers over collections of series.
pub mod infer;
/// The multi-series merger and its builder.
pub mod merge;
/// Numeric operations over a single series.
pub mod ops;
/// Reduction of merged data points.
pub mod reduce;
mod resample;
/// Validation helpers shared by builders.
pub mod util;
