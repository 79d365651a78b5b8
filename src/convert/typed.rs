//! Compile-time conversion capability for statically-known destinations.
//!
//! When the caller knows the destination type at compile time, the dynamic
//! descriptor plumbing disappears behind [`FromValue`]: `convert_as::<T>`
//! runs the full pipeline against `T`'s descriptor and extracts the typed
//! result. The outbound side is the `From` impls on [`Value`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::culture::Culture;
use crate::values::{Value, ValueType, VersionNumber};

use super::{ConvertError, convert_to};

/// A destination type the pipeline can produce and hand back as `Self`.
pub trait FromValue: Sized {
    /// The descriptor the pipeline converts toward.
    fn value_type() -> ValueType;

    /// Extract `Self` from a value of that type.
    ///
    /// The engine guarantees the value matches [`Self::value_type`]; a
    /// mismatch is reported as a conversion failure rather than a panic.
    fn from_value(value: Value) -> Result<Self, ConvertError>;
}

/// Convert a value to a statically-known destination type.
///
/// # Example
///
/// ```rust
/// use value_mapping_sdk::convert::typed::convert_as;
///
/// let count: i64 = convert_as("42", None).unwrap();
/// assert_eq!(count, 42);
///
/// // A nullable destination absorbs unconvertible input as `None`.
/// let missing: Option<i64> = convert_as("zero-ish", None).unwrap();
/// assert_eq!(missing, None);
/// ```
pub fn convert_as<T: FromValue>(
    value: impl Into<Value>,
    culture: Option<&Culture>,
) -> Result<T, ConvertError> {
    let target = T::value_type();
    let converted = convert_to(value.into(), &target, culture)?;
    T::from_value(converted)
}

fn mismatch<T: FromValue>(value: &Value) -> ConvertError {
    ConvertError::conversion(&value.value_type(), &T::value_type(), value, None)
}

impl FromValue for bool {
    fn value_type() -> ValueType {
        ValueType::Bool
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for i64 {
    fn value_type() -> ValueType {
        ValueType::Int
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for f64 {
    fn value_type() -> ValueType {
        ValueType::Float
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Float(x) => Ok(x),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for String {
    fn value_type() -> ValueType {
        ValueType::Text
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn value_type() -> ValueType {
        ValueType::Timestamp
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Timestamp(ts) => Ok(ts),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Uuid {
    fn value_type() -> ValueType {
        ValueType::Uuid
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Uuid(id) => Ok(id),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for VersionNumber {
    fn value_type() -> ValueType {
        ValueType::Version
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Version(v) => Ok(v),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// `Option<T>` converts toward the nullable wrapper of `T`'s descriptor;
/// the none representation extracts to `None`.
impl<T: FromValue> FromValue for Option<T> {
    fn value_type() -> ValueType {
        ValueType::nullable(T::value_type())
    }

    fn from_value(value: Value) -> Result<Self, ConvertError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
