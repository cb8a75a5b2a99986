use confluence_core::{
    InterpolationMode, MemoryTimeSeries, MultiSeriesMerger, Quality, ReductionIterator,
    ReductionKind, SampledPoint, Value,
};

fn series(mode: InterpolationMode, pts: &[(i64, f64)]) -> MemoryTimeSeries {
    MemoryTimeSeries::from_points(mode, pts.iter().map(|&(t, v)| SampledPoint::good(t, v))).unwrap()
}

fn flags(pts: &[(i64, bool)]) -> MemoryTimeSeries {
    MemoryTimeSeries::from_points(
        InterpolationMode::Steps,
        pts.iter().map(|&(t, v)| SampledPoint::good(t, v)),
    )
    .unwrap()
}

#[test]
fn sum_with_ignored_gaps() {
    let a = series(InterpolationMode::Linear, &[(0, 10.0), (10, 20.0)]);
    let b = series(InterpolationMode::Steps, &[(5, 100.0)]);
    let merger = MultiSeriesMerger::builder().series(&a).series(&b).build().unwrap();
    let out: Vec<SampledPoint> = ReductionIterator::new(merger, ReductionKind::Sum, true).collect();
    assert_eq!(
        out,
        vec![
            SampledPoint::good(0, 10.0),
            SampledPoint::good(5, 115.0),
            SampledPoint::good(10, 120.0),
        ]
    );
}

#[test]
fn gap_poisons_the_point_unless_ignored() {
    let a = series(InterpolationMode::Linear, &[(0, 10.0), (10, 20.0)]);
    let b = series(InterpolationMode::Steps, &[(5, 100.0)]);
    let merger = MultiSeriesMerger::builder().series(&a).series(&b).build().unwrap();
    let out: Vec<SampledPoint> =
        ReductionIterator::new(merger, ReductionKind::Average, false).collect();
    assert_eq!(out[0].quality, Quality::Bad);
    assert!(out[0].value.as_f64().unwrap().is_nan());
    assert_eq!(out[1], SampledPoint::good(5, 57.5));
    assert_eq!(out[2], SampledPoint::good(10, 60.0));
}

#[test]
fn bad_inputs_are_gaps() {
    let mut a = series(InterpolationMode::Steps, &[(0, 1.0)]);
    a.add_value(SampledPoint::bad(5)).unwrap();
    let b = series(InterpolationMode::Steps, &[(0, 2.0), (5, 3.0)]);

    let merger = MultiSeriesMerger::builder().series(&a).series(&b).build().unwrap();
    let strict: Vec<_> = ReductionIterator::new(merger, ReductionKind::Sum, false).collect();
    assert_eq!(strict[0], SampledPoint::good(0, 3.0));
    assert_eq!(strict[1].quality, Quality::Bad);

    let merger = MultiSeriesMerger::builder().series(&a).series(&b).build().unwrap();
    let lenient: Vec<_> = ReductionIterator::new(merger, ReductionKind::Sum, true).collect();
    assert_eq!(lenient[1], SampledPoint::good(5, 3.0));
}

#[test]
fn and_or_over_booleans() {
    let x = flags(&[(0, true), (10, false)]);
    let y = flags(&[(5, true)]);

    let merger = MultiSeriesMerger::builder().series(&x).series(&y).build().unwrap();
    let and: Vec<Value> = ReductionIterator::new(merger, ReductionKind::And, true)
        .map(|p| p.value)
        .collect();
    assert_eq!(and, vec![Value::Boolean(true), Value::Boolean(true), Value::Boolean(false)]);

    let merger = MultiSeriesMerger::builder().series(&x).series(&y).build().unwrap();
    let or: Vec<Value> = ReductionIterator::new(merger, ReductionKind::Or, true)
        .map(|p| p.value)
        .collect();
    assert_eq!(or, vec![Value::Boolean(true); 3]);
}

#[test]
fn closures_are_reducers() {
    let a = series(InterpolationMode::Steps, &[(0, 1.0), (5, 4.0)]);
    let b = series(InterpolationMode::Steps, &[(0, 2.0)]);
    let merger = MultiSeriesMerger::builder().series(&a).series(&b).build().unwrap();
    let max = |vals: &[SampledPoint]| {
        vals.iter()
            .filter_map(|p| p.value.as_f64())
            .reduce(f64::max)
            .map(Value::Float)
    };
    let out: Vec<SampledPoint> = ReductionIterator::new(merger, max, false).collect();
    assert_eq!(out, vec![SampledPoint::good(0, 2.0), SampledPoint::good(5, 4.0)]);
}

#[test]
fn no_contributors_is_bad() {
    let a = series(InterpolationMode::None, &[(0, 1.0)]);
    let b = series(InterpolationMode::None, &[(5, 1.0)]);
    let merger = MultiSeriesMerger::builder().series(&a).series(&b).build().unwrap();
    let out: Vec<_> = ReductionIterator::new(merger, ReductionKind::Sum, true).collect();
    assert!(out.iter().all(|p| p.quality == Quality::Good));

    let empty = MemoryTimeSeries::new(InterpolationMode::Steps);
    let merger = MultiSeriesMerger::builder()
        .series(&empty)
        .lower_boundary(0, SampledPoint::bad(3))
        .build()
        .unwrap();
    let out: Vec<_> = ReductionIterator::new(merger, ReductionKind::Sum, true).collect();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].quality, Quality::Bad);
}
