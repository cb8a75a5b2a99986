use confluence_types::InterpolationMode;

use crate::series::ReadOnlyTimeSeries;

/// Earliest literal timestamp `>= t` across `series`.
pub fn next_timestamp<S: ReadOnlyTimeSeries>(series: &[S], t: i64) -> Option<i64> {
    series
        .iter()
        .filter_map(|s| s.next_value(t))
        .map(|p| p.timestamp)
        .min()
}

/// Latest literal timestamp `<= t` across `series`.
pub fn previous_timestamp<S: ReadOnlyTimeSeries>(series: &[S], t: i64) -> Option<i64> {
    series
        .iter()
        .filter_map(|s| s.previous_value(t))
        .map(|p| p.timestamp)
        .max()
}

/// Interpolation mode of a series derived from inputs with `modes`.
///
/// The dominant mode wins (`NEAREST > LINEAR > STEPS > NONE`); no input
/// yields NONE.
pub fn deduce_mode<I>(modes: I) -> InterpolationMode
where
    I: IntoIterator<Item = InterpolationMode>,
{
    modes
        .into_iter()
        .max_by_key(|m| m.precedence())
        .unwrap_or_default()
}
