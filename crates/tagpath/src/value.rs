// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Untyped parameter values and their typed extraction.
//!
//! A [`Label`](crate::Label) carries its call arguments as a [`ParameterMap`]
//! of [`Value`]s. When a compiled accessor runs, every declared parameter is
//! pulled back out of that map and coerced to its declared [`ValueKind`].
//! A missing key or a value of another kind yields the kind's zero value,
//! never an error.

use indexmap::IndexMap;
use std::fmt;

/// Insertion-ordered mapping from parameter tag to value.
pub type ParameterMap = IndexMap<String, Value>;

/// A dynamic parameter value.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Declared kind of a call parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Str,
}

impl ValueKind {
    /// Zero value substituted for a missing or mismatched parameter.
    pub fn zero(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Str => Value::Str(String::new()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Kind of this value (`None` for null).
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Float(_) => Some(ValueKind::Float),
            Self::Str(_) => Some(ValueKind::Str),
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Str(v) => f.write_str(v),
        }
    }
}

/// Keep `value` if it already has `kind`, otherwise substitute the zero value.
pub fn coerce(value: Option<&Value>, kind: ValueKind) -> Value {
    match value {
        Some(v) if v.kind() == Some(kind) => v.clone(),
        _ => kind.zero(),
    }
}

/// Rust types usable as call parameters.
pub trait ParamValue: Default + Sized {
    /// Declared kind recorded in the registry.
    const KIND: ValueKind;

    /// Strict conversion: `None` when the value has another kind or does not fit.
    fn from_value(value: &Value) -> Option<Self>;
}

/// Positional argument extraction used by invocation glue.
///
/// Out-of-range positions and mismatched values fall back to `T::default()`.
pub fn extract<T: ParamValue>(args: &[Value], index: usize) -> T {
    args.get(index)
        .and_then(T::from_value)
        .unwrap_or_default()
}

impl ParamValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl ParamValue for String {
    const KIND: ValueKind = ValueKind::Str;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl ParamValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }
}

impl ParamValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        value.as_float().map(|v| v as f32)
    }
}

macro_rules! int_param {
    ($($ty:ty),*) => {
        $(
            impl ParamValue for $ty {
                const KIND: ValueKind = ValueKind::Int;

                fn from_value(value: &Value) -> Option<Self> {
                    value.as_int().and_then(|v| <$ty>::try_from(v).ok())
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

int_param!(i8, i16, i32, i64, u8, u16, u32);

// Conversion traits
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_accessors() {
        let v = Value::from(42i32);
        assert_eq!(v.kind(), Some(ValueKind::Int));
        assert_eq!(v.as_int(), Some(42));
        assert_eq!(v.as_str(), None);

        let v = Value::from("Senior");
        assert_eq!(v.as_str(), Some("Senior"));

        let v = Value::from(None::<bool>);
        assert!(v.is_null());
        assert_eq!(v.kind(), None);
    }

    #[test]
    fn test_coerce_defaults_on_miss_and_mismatch() {
        assert_eq!(coerce(None, ValueKind::Str), Value::Str(String::new()));
        assert_eq!(
            coerce(Some(&Value::Int(3)), ValueKind::Bool),
            Value::Bool(false)
        );
        assert_eq!(coerce(Some(&Value::Null), ValueKind::Int), Value::Int(0));
        assert_eq!(
            coerce(Some(&Value::Bool(true)), ValueKind::Bool),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_extract_is_strict_and_range_checked() {
        let args = vec![
            Value::Int(300),
            Value::Str("x".into()),
            Value::Bool(true),
        ];
        assert_eq!(extract::<u8>(&args, 0), 0);
        assert_eq!(extract::<i32>(&args, 0), 300);
        assert_eq!(extract::<String>(&args, 1), "x");
        assert!(!extract::<bool>(&args, 1));
        assert!(extract::<bool>(&args, 2));
        assert_eq!(extract::<String>(&args, 7), "");
    }

    #[test]
    fn test_display_null_is_empty() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
    }
}
