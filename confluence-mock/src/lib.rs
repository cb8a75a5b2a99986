//! Deterministic fixture series for tests and demos.
//!
//! [`fixtures::by_name`] hands out small in-memory series with known shapes;
//! [`CountingSeries`] wraps any series and counts how often it is read.

pub mod fixtures;

mod counting;

pub use counting::CountingSeries;
