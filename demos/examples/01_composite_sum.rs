use confluence::{CompositeTimeSeries, ReadOnlyTimeSeries, TimeInterval};
use confluence_demos::common::{fixture, fmt_value, init_tracing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. Two inputs sampled at different instants.
    let a = fixture("ramp");
    let b = fixture("step");

    // 2. Their sum, skipping inputs that are undefined at a timestamp.
    let total = CompositeTimeSeries::builder()
        .series(&a)
        .series(&b)
        .sum()
        .ignore_gaps(true)
        .build()?;

    println!("sum of ramp and step over [0, 10], mode {}", total.interpolation_mode());
    println!("{:>6} | {:>10}", "t", "value");
    println!("{:-<7}|{:-<11}", "", "");
    for p in total.values(TimeInterval::closed(0, 10)) {
        println!("{:>6} | {:>10}", p.timestamp, fmt_value(p.good_f64()));
    }

    // 3. The same composite without gap skipping.
    let strict = CompositeTimeSeries::builder()
        .series(&a)
        .series(&b)
        .sum()
        .build()?;
    let first = strict.values(TimeInterval::closed(0, 10)).into_iter().next();
    println!(
        "\nwithout ignore_gaps the first point is {}",
        fmt_value(first.and_then(|p| p.good_f64()))
    );

    Ok(())
}
