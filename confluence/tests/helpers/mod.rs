#![allow(dead_code)]

use confluence::{InterpolationMode, MemoryTimeSeries, SampledPoint, ValueKind};
use confluence_mock::fixtures;

pub fn fixture(name: &str) -> MemoryTimeSeries {
    fixtures::by_name(name).unwrap()
}

pub fn floats(mode: InterpolationMode, rows: &[(i64, f64)]) -> MemoryTimeSeries {
    MemoryTimeSeries::from_points(mode, rows.iter().map(|&(t, v)| SampledPoint::good(t, v)))
        .unwrap()
        .with_kind(ValueKind::Float)
}

pub fn pairs(points: &[SampledPoint]) -> Vec<(i64, Option<f64>)> {
    points.iter().map(|p| (p.timestamp, p.good_f64())).collect()
}
