//! Tagged sample payloads.

use serde::{Deserialize, Serialize};

/// Discriminant of a [`Value`], used where a series or composite declares
/// the payload kind it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// 64-bit floating point.
    Float,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// Boolean flag.
    Boolean,
    /// UTF-8 text.
    String,
    /// Opaque byte payload.
    Bytes,
}

impl ValueKind {
    /// True for kinds that can be summed, averaged and integrated.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Float | Self::Integer | Self::Long)
    }
}

/// Payload of a sampled point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// 64-bit floating point.
    Float(f64),
    /// 32-bit signed integer.
    Integer(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// Boolean flag.
    Boolean(bool),
    /// UTF-8 text.
    String(String),
    /// Opaque byte payload.
    Bytes(Vec<u8>),
}

impl Value {
    /// Sentinel used for undefined numeric results.
    pub const NAN: Self = Self::Float(f64::NAN);

    /// The discriminant of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Float(_) => ValueKind::Float,
            Self::Integer(_) => ValueKind::Integer,
            Self::Long(_) => ValueKind::Long,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::String(_) => ValueKind::String,
            Self::Bytes(_) => ValueKind::Bytes,
        }
    }

    /// Numeric view of the value. Booleans map to `1.0`/`0.0`; text and
    /// bytes have no numeric view.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v),
            Self::Integer(v) => Some(f64::from(v)),
            Self::Long(v) => Some(v as f64),
            Self::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
            Self::String(_) | Self::Bytes(_) => None,
        }
    }

    /// Boolean view of the value; only defined for [`Value::Boolean`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Boolean(b) => Some(b),
            _ => None,
        }
    }

    /// Build a value of `kind` from a floating point number.
    ///
    /// Integer kinds truncate toward zero and saturate at their bounds;
    /// booleans are `true` for any non-zero input. Returns `None` for text
    /// and byte kinds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64_as(kind: ValueKind, v: f64) -> Option<Self> {
        match kind {
            ValueKind::Float => Some(Self::Float(v)),
            ValueKind::Integer => Some(Self::Integer(v as i32)),
            ValueKind::Long => Some(Self::Long(v as i64)),
            ValueKind::Boolean => Some(Self::Boolean(v != 0.0)),
            ValueKind::String | ValueKind::Bytes => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}
