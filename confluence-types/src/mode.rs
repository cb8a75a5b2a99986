//! Interpolation policies.

use serde::{Deserialize, Serialize};

/// Policy for deriving values between or beyond literal points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterpolationMode {
    /// Only literal points are defined.
    #[default]
    None,
    /// Right-continuous: a value holds until the next point.
    Steps,
    /// Linear interpolation between two GOOD neighbours.
    Linear,
    /// Value of the neighbour closest in time; ties go to the earlier one.
    Nearest,
}

impl InterpolationMode {
    /// Rank used when deducing the mode of a derived series.
    ///
    /// Higher ranks dominate: `NEAREST > LINEAR > STEPS > NONE`.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Steps => 1,
            Self::Linear => 2,
            Self::Nearest => 3,
        }
    }

    /// Short upper-case name, as used in capability strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Steps => "STEPS",
            Self::Linear => "LINEAR",
            Self::Nearest => "NEAREST",
        }
    }
}

impl std::fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
