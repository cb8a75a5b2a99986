use confluence_core::{
    ConfluenceError, InterpolationMode, MemoryTimeSeries, ReadOnlyTimeSeries, SampledPoint,
    TimeInterval, Value, ValueKind,
};
use proptest::prelude::*;

fn filled() -> MemoryTimeSeries {
    MemoryTimeSeries::from_points(
        InterpolationMode::Steps,
        (0..10).map(|t| SampledPoint::good(t * 10, t as f64)),
    )
    .unwrap()
}

#[test]
fn neighbour_lookups_are_inclusive() {
    let s = filled();
    assert_eq!(s.previous_value(20).unwrap().timestamp, 20);
    assert_eq!(s.previous_value(25).unwrap().timestamp, 20);
    assert_eq!(s.next_value(25).unwrap().timestamp, 30);
    assert!(s.previous_value(-1).is_none());
    assert!(s.next_value(91).is_none());
    assert_eq!(s.value_at(25).unwrap(), SampledPoint::good(25, 2.0));
}

#[test]
fn delete_and_replace_values() {
    let mut s = filled();
    assert_eq!(s.delete_values(TimeInterval::new(20, 50)), 3);
    assert_eq!(s.len(), 7);
    assert!(s.is_empty_in(TimeInterval::new(20, 50)));

    s.replace_values(
        TimeInterval::new(0, 30),
        [SampledPoint::good(5, 1.5), SampledPoint::good(100, 9.0)],
    )
    .unwrap();
    let stamps: Vec<i64> = s.values(TimeInterval::ALL).iter().map(|p| p.timestamp).collect();
    assert_eq!(stamps, vec![5, 50, 60, 70, 80, 90]);
    assert_eq!(s.first().unwrap().timestamp, 5);
    assert_eq!(s.last().unwrap().timestamp, 90);
}

#[test]
fn declared_kind_is_enforced() {
    let mut s = MemoryTimeSeries::new(InterpolationMode::Steps).with_kind(ValueKind::Boolean);
    assert!(s.add_value(SampledPoint::good(0, true)).is_ok());
    let err = s.add_value(SampledPoint::good(1, 1.0)).unwrap_err();
    assert!(matches!(err, ConfluenceError::InvalidArg(_)));
    assert_eq!(s.value_kind(), Some(ValueKind::Boolean));
}

#[test]
fn read_copies_a_window_and_the_mode() {
    let src = filled();
    let mut dst = MemoryTimeSeries::new(InterpolationMode::Linear);
    dst.add_value(SampledPoint::good(1_000, 0.0)).unwrap();
    dst.read(&src, TimeInterval::new(10, 40)).unwrap();
    assert_eq!(dst.len(), 3);
    assert_eq!(dst.interpolation_mode(), InterpolationMode::Steps);
}

#[test]
fn duplicate_timestamps_replace() {
    let mut s = MemoryTimeSeries::new(InterpolationMode::None);
    s.add_value(SampledPoint::good(1, 1.0)).unwrap();
    s.add_value(SampledPoint::good(1, 2.0)).unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s.value_at(1).unwrap().value, Value::Float(2.0));
    assert!(s.value_at(2).is_none());
}

proptest! {
    #[test]
    fn insert_then_read_is_sorted_and_unique(stamps in proptest::collection::vec(-1_000_000i64..1_000_000, 0..200)) {
        let mut s = MemoryTimeSeries::new(InterpolationMode::Linear);
        s.add_values(stamps.iter().map(|&t| SampledPoint::good(t, t as f64))).unwrap();
        let out = s.values(TimeInterval::ALL);
        prop_assert!(out.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        let mut expected = stamps.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(out.iter().map(|p| p.timestamp).collect::<Vec<_>>(), expected);
    }
}
