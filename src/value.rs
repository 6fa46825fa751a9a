//! Typed parameter values.
//!
//! A [`CallData`](crate::CallData) field is a bool, an integer, a float or a
//! string. Values serialize as bare JSON scalars, so a payload reads
//! naturally when dumped: `[["width",1920],["cancel",false]]`.

use serde::{Deserialize, Serialize};

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag, e.g. a `cancel` marker set by an earlier observer.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 text.
    String(String),
}

impl Value {
    /// The flag, if this is a [`Value::Bool`].
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// The integer, if this is a [`Value::Int`].
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        if let Self::Int(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Numeric view; integers widen to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_float(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v),
            Self::Int(v) => Some(v as f64),
            Self::Bool(_) | Self::String(_) => None,
        }
    }

    /// The text, if this is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

macro_rules! impl_from {
    ($($src:ty => $variant:ident($conv:expr)),* $(,)?) => {
        $(
            impl From<$src> for Value {
                fn from(v: $src) -> Self {
                    Self::$variant($conv(v))
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool(bool::from),
    i32 => Int(i64::from),
    i64 => Int(i64::from),
    u32 => Int(i64::from),
    f64 => Float(f64::from),
    String => String(String::from),
    &str => String(String::from),
}
