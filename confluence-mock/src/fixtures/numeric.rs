use confluence_core::{InterpolationMode, MemoryTimeSeries, SampledPoint, ValueKind};

pub fn by_name(name: &str) -> Option<MemoryTimeSeries> {
    let (mode, rows): (InterpolationMode, Vec<(i64, Option<f64>)>) = match name {
        "ramp" => (InterpolationMode::Linear, vec![(0, Some(10.0)), (10, Some(20.0))]),
        "step" => (InterpolationMode::Steps, vec![(5, Some(100.0))]),
        "gappy" => (
            InterpolationMode::Linear,
            vec![(0, Some(1.0)), (10, None), (20, Some(3.0)), (40, Some(5.0))],
        ),
        "wave" => (
            InterpolationMode::Linear,
            vec![
                (0, Some(-10.0)),
                (10, Some(10.0)),
                (20, Some(10.0)),
                (30, Some(-10.0)),
            ],
        ),
        _ => return None,
    };
    Some(build(mode, rows))
}

fn build(mode: InterpolationMode, rows: Vec<(i64, Option<f64>)>) -> MemoryTimeSeries {
    let points = rows.into_iter().map(|(t, v)| match v {
        Some(v) => SampledPoint::good(t, v),
        None => SampledPoint::bad(t),
    });
    MemoryTimeSeries::from_points(mode, points)
        .unwrap()
        .with_kind(ValueKind::Float)
}
