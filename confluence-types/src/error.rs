use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the confluence workspace.
///
/// Configuration problems are reported when a builder is finalized, usage
/// errors when a caller breaks the iteration contract. Data-quality outcomes
/// (BAD points, NaN reductions, zero integrals) are ordinary return values and
/// never surface here.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfluenceError {
    /// The requested operation is not defined for the given mode or value kind.
    #[error("unsupported operation: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "positive-domain/STEPS").
        capability: String,
    },

    /// Invalid configuration or input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// `advance()` was called on an iterator with no remaining elements.
    #[error("no further element")]
    Exhausted,

    /// A lookback request was zero or reached further back than the retained history.
    #[error("invalid lookback: requested {requested} steps, {available} available")]
    InvalidLookback {
        /// Number of steps requested.
        requested: usize,
        /// Number of steps that may currently be requested.
        available: usize,
    },

    /// A lookback was requested through a data point that is no longer the most recent one.
    #[error("stale data point: generation {generation}, merger is at {current}")]
    StaleDataPoint {
        /// Generation stamped on the data point that was used.
        generation: u64,
        /// Generation of the most recently produced data point.
        current: u64,
    },
}

impl ConfluenceError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build an `InvalidArg` error.
    #[must_use]
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Returns true for violations of the iteration contract.
    ///
    /// These are programming errors on the caller side, as opposed to
    /// configuration errors raised while building an iterator or composite.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::Exhausted | Self::InvalidLookback { .. } | Self::StaleDataPoint { .. }
        )
    }
}
