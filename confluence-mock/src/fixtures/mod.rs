use confluence_core::MemoryTimeSeries;

mod meter;
mod numeric;
mod switches;

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "ramp", "step", "gappy", "wave", "door_a", "door_b", "meter",
];

/// Fixture series by name.
///
/// - `ramp`: LINEAR, `(0, 10.0)`, `(10, 20.0)`
/// - `step`: STEPS, `(5, 100.0)`
/// - `gappy`: LINEAR with a BAD point at 10
/// - `wave`: LINEAR, crossing zero at 5 and 25
/// - `door_a`, `door_b`: boolean STEPS switches
/// - `meter`: LINEAR daily readings starting 2023-01-01 UTC
#[must_use]
pub fn by_name(name: &str) -> Option<MemoryTimeSeries> {
    match name {
        "ramp" | "step" | "gappy" | "wave" => numeric::by_name(name),
        "door_a" | "door_b" => switches::by_name(name),
        "meter" => Some(meter::daily()),
        _ => None,
    }
}
