use confluence::{CompositeTimeSeries, ReadOnlyTimeSeries, TimeInterval};
use confluence_demos::common::{fixture, init_tracing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Spans: confluence::composite::build, confluence::composite::evaluate,
    // confluence::core::merger_build.
    init_tracing();

    let a = fixture("ramp");
    let b = fixture("step");
    let total = CompositeTimeSeries::builder()
        .series(&a)
        .series(&b)
        .sum()
        .build()?;

    let _ = total.values(TimeInterval::closed(0, 10));
    let _ = total.value_at(7);

    Ok(())
}
