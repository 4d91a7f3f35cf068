//! Dynamically typed values
//!
//! This module provides a tagged variant for loosely typed data and the
//! [`Truthiness`] capability used by `compact` and friends.

use std::collections::BTreeMap;

/// A loosely typed value
///
/// Host types without a variant here (maps, sets, regular expressions, ...)
/// are intentionally not modeled.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value
    #[default]
    Undefined,
    /// Explicit empty value
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

/// Type tag of a [`Value`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Value {
    /// Get the type tag of this value
    pub fn kind(&self) -> Kind {
        match self {
            Self::Undefined => Kind::Undefined,
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Boolean,
            Self::Number(_) => Kind::Number,
            Self::String(_) => Kind::String,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
        }
    }

    /// Check whether this value is `Null` or `Undefined`
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            // Every JSON number has an f64 approximation
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

// =============================================================================
// Truthiness
// =============================================================================

/// Values that can be judged as "data" or "no data"
///
/// Falsy-by-convention values are zero, the empty string, `false`, null,
/// undefined and NaN. Everything else is truthy.
pub trait Truthiness {
    fn is_truthy(&self) -> bool;
}

impl Truthiness for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthiness_int {
    ($($t:ty),*) => {
        $(
            impl Truthiness for $t {
                #[inline]
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthiness_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthiness for f32 {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_nan() && *self != 0.0
    }
}

impl Truthiness for f64 {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_nan() && *self != 0.0
    }
}

impl Truthiness for str {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthiness for String {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthiness> Truthiness for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(|v| v.is_truthy())
    }
}

impl<T: Truthiness + ?Sized> Truthiness for &T {
    #[inline]
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl Truthiness for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => n.is_truthy(),
            Self::String(s) => !s.is_empty(),
            // Containers are truthy even when empty
            Self::Array(_) | Self::Object(_) => true,
        }
    }
}
