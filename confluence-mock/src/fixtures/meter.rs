use confluence_core::{InterpolationMode, MemoryTimeSeries, SampledPoint, ValueKind};

/// Cumulative meter readings at midnight UTC.
pub fn daily() -> MemoryTimeSeries {
    let rows = [
        ("2023-01-01", 1_000.0),
        ("2023-01-02", 1_012.5),
        ("2023-01-03", 1_020.0),
        ("2023-01-04", 1_041.0),
        ("2023-01-05", 1_050.5),
    ];
    let points = rows.into_iter().map(|(date, v)| {
        let ts = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis();
        SampledPoint::good(ts, v)
    });
    MemoryTimeSeries::from_points(InterpolationMode::Linear, points)
        .unwrap()
        .with_kind(ValueKind::Float)
}
