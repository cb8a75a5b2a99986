use confluence::{Aggregation, MergerBuilder};
use confluence_demos::common::{fixture, fmt_value, init_tracing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let ramp = fixture("ramp");

    for aggregation in [Aggregation::Interpolate, Aggregation::Average, Aggregation::Integrate] {
        let merger = MergerBuilder::new()
            .series(&ramp)
            .step_size(4, 2)
            .aggregation(aggregation)
            .build()?;

        println!("\n## {aggregation:?} on a 4 ms grid anchored at 2");
        for dp in merger {
            let v = dp.value(0).and_then(|p| p.good_f64());
            println!("{:>4} | {:>10}", dp.timestamp(), fmt_value(v));
        }
    }

    Ok(())
}
