use confluence_types::{ConfluenceError, ValueKind};

use crate::series::ReadOnlyTimeSeries;

/// Ensure every series that declares a payload kind declares `kind`.
///
/// Series without a declared kind are accepted.
///
/// # Errors
/// Returns `InvalidArg` naming the first mismatching series.
pub fn ensure_kind<S: ReadOnlyTimeSeries>(series: &[S], kind: ValueKind) -> Result<(), ConfluenceError> {
    for (idx, s) in series.iter().enumerate() {
        if let Some(k) = s.value_kind()
            && k != kind
        {
            return Err(ConfluenceError::invalid_arg(format!(
                "series {idx} holds {k:?} values, expected {kind:?}"
            )));
        }
    }
    Ok(())
}
