//! Shared value types, configuration and errors for the confluence
//! time-series engine.
//!
//! Everything here is plain data: sampled points and their tagged payloads,
//! half-open time intervals, interpolation modes and the serde-able
//! configuration consumed by the merger and composite builders in
//! `confluence-core` and `confluence`.
#![warn(missing_docs)]

mod config;
mod error;
mod interval;
mod mode;
mod point;
mod value;

pub use config::{Aggregation, MergeConfig, ModeOverride, ReductionKind, Resampling};
pub use error::ConfluenceError;
pub use interval::TimeInterval;
pub use mode::InterpolationMode;
pub use point::{Quality, SampledPoint};
pub use value::{Value, ValueKind};
