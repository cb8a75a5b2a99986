use confluence::MemoryTimeSeries;
use tracing_subscriber::fmt::format::FmtSpan;

/// Install a human-friendly subscriber filtered by `RUST_LOG`.
///
/// Suggested: `RUST_LOG=info,confluence=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();
}

/// Fixture series by name.
///
/// # Panics
/// Panics if `name` is not a known fixture.
#[must_use]
pub fn fixture(name: &str) -> MemoryTimeSeries {
    confluence_mock::fixtures::by_name(name)
        .unwrap_or_else(|| panic!("unknown fixture {name}; known: {:?}", confluence_mock::fixtures::NAMES))
}

/// Render an optional numeric value for table output.
#[must_use]
pub fn fmt_value(v: Option<f64>) -> String {
    v.map_or_else(|| "BAD".to_string(), |v| format!("{v:.3}"))
}
