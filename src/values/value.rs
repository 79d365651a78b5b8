//! The dynamic value representation consumed by the conversion engine.
//!
//! Parsed fields arrive as [`Value`]s: scalars, timestamps, identifiers,
//! enumeration members, or opaque user values the generic machinery cannot
//! inspect. A value knows its own runtime [`ValueType`] and renders a
//! textual form for diagnostics and the to-text fallback.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use super::enums::EnumMember;
use super::types::ValueType;
use super::version::VersionNumber;

/// A dynamically typed runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; its runtime type is the universal type
    Null,
    /// Boolean scalar
    Bool(bool),
    /// 64-bit signed integer scalar
    Int(i64),
    /// 64-bit float scalar
    Float(f64),
    /// Text scalar
    Text(String),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
    /// Globally-unique identifier
    Uuid(Uuid),
    /// Dotted version literal
    Version(VersionNumber),
    /// Enumeration member
    Enum(EnumMember),
    /// User value the engine can only hand to converters and operators
    Opaque(OpaqueValue),
}

impl Value {
    /// Whether the value is absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The runtime type descriptor of this value.
    ///
    /// A null value reports the universal type, mirroring how untyped
    /// absent fields carry no type of their own.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Any,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Text(_) => ValueType::Text,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::Uuid(_) => ValueType::Uuid,
            Value::Version(_) => ValueType::Version,
            Value::Enum(member) => ValueType::Enum(member.enum_type.clone()),
            Value::Opaque(opaque) => ValueType::Named(opaque.type_name().to_string()),
        }
    }

    /// Map a dynamic JSON value onto the matching [`Value`] variant.
    ///
    /// Scalars map directly; integral numbers become `Int`, other numbers
    /// `Float`. Objects and arrays have no scalar shape and are carried as
    /// opaque `json` values for converter chains to unpack.
    ///
    /// # Example
    ///
    /// ```rust
    /// use value_mapping_sdk::values::Value;
    ///
    /// let parsed: serde_json::Value = serde_json::from_str("42").unwrap();
    /// assert_eq!(Value::from_json(&parsed), Value::Int(42));
    /// ```
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            other => Value::Opaque(OpaqueValue::new("json", other.clone())),
        }
    }
}

impl fmt::Display for Value {
    /// The textual representation used by diagnostics and the to-text
    /// conversion fallback. Null renders as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Value::Uuid(id) => write!(f, "{}", id),
            Value::Version(v) => write!(f, "{}", v),
            Value::Enum(member) => write!(f, "{}", member),
            Value::Opaque(opaque) => write!(f, "{}", opaque.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<Uuid> for Value {
    fn from(id: Uuid) -> Self {
        Value::Uuid(id)
    }
}

impl From<VersionNumber> for Value {
    fn from(v: VersionNumber) -> Self {
        Value::Version(v)
    }
}

impl From<EnumMember> for Value {
    fn from(member: EnumMember) -> Self {
        Value::Enum(member)
    }
}

impl From<OpaqueValue> for Value {
    fn from(opaque: OpaqueValue) -> Self {
        Value::Opaque(opaque)
    }
}

/// A user value known to the engine only by type name.
///
/// Equality is instance identity (the same shared payload), which is what
/// the converter-chain "did the chain replace the value" check observes for
/// values the engine cannot compare structurally.
#[derive(Clone)]
pub struct OpaqueValue {
    type_name: String,
    payload: Arc<dyn Any + Send + Sync>,
}

impl OpaqueValue {
    /// Wrap a payload under the given type name.
    pub fn new<T>(type_name: impl Into<String>, payload: T) -> Self
    where
        T: Any + Send + Sync,
    {
        OpaqueValue {
            type_name: type_name.into(),
            payload: Arc::new(payload),
        }
    }

    /// The name this value's type is registered under.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Borrow the payload as `T`, if that is what was stored.
    pub fn payload_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

impl fmt::Debug for OpaqueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpaqueValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && Arc::ptr_eq(&self.payload, &other.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(Value::from_json(&serde_json::json!(null)), Value::Null);
        assert_eq!(Value::from_json(&serde_json::json!(true)), Value::Bool(true));
        assert_eq!(Value::from_json(&serde_json::json!(7)), Value::Int(7));
        assert_eq!(Value::from_json(&serde_json::json!(2.5)), Value::Float(2.5));
        assert_eq!(
            Value::from_json(&serde_json::json!("seven")),
            Value::Text("seven".to_string())
        );
    }

    #[test]
    fn test_from_json_object_is_opaque() {
        let value = Value::from_json(&serde_json::json!({"a": 1}));
        match value {
            Value::Opaque(opaque) => {
                assert_eq!(opaque.type_name(), "json");
                assert!(opaque.payload_ref::<serde_json::Value>().is_some());
            }
            other => panic!("expected opaque value, got {:?}", other),
        }
    }

    #[test]
    fn test_opaque_equality_is_identity() {
        let a = OpaqueValue::new("widget", 42_u32);
        let b = a.clone();
        let c = OpaqueValue::new("widget", 42_u32);
        assert_eq!(Value::Opaque(a.clone()), Value::Opaque(b));
        assert_ne!(Value::Opaque(a), Value::Opaque(c));
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            Value::Uuid(id).to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_runtime_type_of_null_is_universal() {
        assert_eq!(Value::Null.value_type(), ValueType::Any);
    }
}
