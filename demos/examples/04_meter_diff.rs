use chrono::{TimeZone, Utc};
use confluence::{DiffIterator, MergerBuilder, TimeInterval};
use confluence_demos::common::{fixture, fmt_value, init_tracing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Daily readings of a cumulative meter; differences give consumption per day.
    let meter = fixture("meter");
    let from = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().ok_or("bad date")?;
    let to = Utc.with_ymd_and_hms(2023, 1, 6, 0, 0, 0).single().ok_or("bad date")?;

    let merger = MergerBuilder::new()
        .series(&meter)
        .window(TimeInterval::from_datetimes(from, to)?)
        .max_historical_values(1)
        .build()?;

    println!("{:<12} | {:>10}", "Day", "Consumed");
    println!("{:-<13}|{:-<11}", "", "");
    for d in DiffIterator::new(merger, 0.0)? {
        let day = chrono::DateTime::from_timestamp_millis(d.timestamp)
            .map_or_else(|| d.timestamp.to_string(), |dt| dt.format("%Y-%m-%d").to_string());
        let consumed = d.elements.get(&0).and_then(|p| p.good_f64());
        println!("{day:<12} | {:>10}", fmt_value(consumed));
    }

    Ok(())
}
