//! Generic scalar conversion between primitive values.
//!
//! This is the engine's soft middle strategy: a culture-aware
//! primitive-to-primitive conversion for sources that carry the convertible
//! capability (bool, int, float, text, timestamp, enum underlying value).
//! Every failure here is recoverable; the pipeline advances to the next
//! strategy instead of surfacing it.

use chrono::{DateTime, Utc};

use crate::culture::Culture;
use crate::values::{Value, ValueType};

use super::ConvertError;

/// Whether the value supports the universal scalar-conversion capability.
pub(crate) fn is_convertible(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Text(_)
            | Value::Timestamp(_)
            | Value::Enum(_)
    )
}

/// Convert a scalar value to the requested scalar target type.
///
/// Text parsing and float formatting honor the supplied culture. Targets
/// outside the scalar set (enums, identifiers, versions, named types) are
/// not served here; they belong to later strategies.
pub(crate) fn change_type(
    value: &Value,
    target: &ValueType,
    culture: &Culture,
) -> Result<Value, ConvertError> {
    let miss = || ConvertError::conversion(&value.value_type(), target, value, None);

    match target {
        ValueType::Bool => match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::Int(i) => Ok(Value::Bool(*i != 0)),
            Value::Float(x) => Ok(Value::Bool(*x != 0.0)),
            Value::Text(s) => culture.parse_bool(s).map(Value::Bool).ok_or_else(miss),
            _ => Err(miss()),
        },
        ValueType::Int => match value {
            Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
            Value::Int(i) => Ok(Value::Int(*i)),
            Value::Float(x) => float_to_int(*x).map(Value::Int).ok_or_else(miss),
            Value::Text(s) => culture.parse_int(s).map(Value::Int).ok_or_else(miss),
            Value::Enum(member) => Ok(Value::Int(member.value)),
            _ => Err(miss()),
        },
        ValueType::Float => match value {
            Value::Bool(b) => Ok(Value::Float(f64::from(u8::from(*b)))),
            Value::Int(i) => Ok(Value::Float(*i as f64)),
            Value::Float(x) => Ok(Value::Float(*x)),
            Value::Text(s) => culture.parse_float(s).map(Value::Float).ok_or_else(miss),
            Value::Enum(member) => Ok(Value::Float(member.value as f64)),
            _ => Err(miss()),
        },
        ValueType::Text => match value {
            Value::Float(x) => Ok(Value::Text(culture.format_float(*x))),
            Value::Bool(_) | Value::Int(_) | Value::Timestamp(_) | Value::Enum(_) => {
                Ok(Value::Text(value.to_string()))
            }
            Value::Text(s) => Ok(Value::Text(s.clone())),
            _ => Err(miss()),
        },
        ValueType::Timestamp => match value {
            Value::Timestamp(ts) => Ok(Value::Timestamp(*ts)),
            Value::Text(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|ts| Value::Timestamp(ts.with_timezone(&Utc)))
                .map_err(|_| miss()),
            _ => Err(miss()),
        },
        _ => Err(miss()),
    }
}

/// Round-to-even float narrowing; out-of-range and non-finite inputs miss.
fn float_to_int(x: f64) -> Option<i64> {
    if !x.is_finite() {
        return None;
    }
    let rounded = x.round_ties_even();
    // i64::MAX is not exactly representable as f64; the half-open bound is.
    if rounded >= (i64::MIN as f64) && rounded < (i64::MAX as f64) {
        Some(rounded as i64)
    } else {
        None
    }
}
