use confluence::{FloatSeriesExt, TimeInterval};
use confluence_demos::common::{fixture, init_tracing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let wave = fixture("wave");
    let window = TimeInterval::new(0, 30);

    let (t0, t1) = (window.start, window.end);

    println!("integral          {:>8.3}", wave.integrate(t0, t1));
    println!("absolute integral {:>8.3}", wave.integrate_absolute(t0, t1)?);
    println!("positive integral {:>8.3}", wave.integrate_positive(t0, t1)?);
    println!("average           {:>8.3}", wave.average(t0, t1));

    let max = wave.max_value(t0, t1);
    println!("max {:?} at {}", max.good_f64(), max.timestamp);

    println!("\npositive stretches:");
    for iv in wave.positive_domain(window)? {
        println!("  [{}, {})", iv.start, iv.end);
    }

    Ok(())
}
