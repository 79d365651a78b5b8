//! Type descriptors and the classification queries built on them.
//!
//! A [`ValueType`] names the shape a conversion must produce. The
//! classification methods (`is_nullable`, `underlying`, `is_simple`,
//! `default_value`, `is_assignable_from`) are total: they answer for every
//! descriptor and never fail.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{EnumMember, EnumType};
use super::value::Value;
use super::version::VersionNumber;

/// Descriptor for a destination (or runtime) type.
///
/// `Any` is the universal type: converting to it returns the value
/// unchanged, and it doubles as the runtime type of a null value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    /// Universal type; conversion target "anything"
    Any,
    /// Boolean scalar
    Bool,
    /// 64-bit signed integer scalar
    Int,
    /// 64-bit float scalar
    Float,
    /// Text scalar
    Text,
    /// UTC timestamp
    Timestamp,
    /// Globally-unique identifier
    Uuid,
    /// Dotted version literal
    Version,
    /// Enumeration with declared members
    Enum(EnumType),
    /// Nullable wrapper around another type
    Nullable(Box<ValueType>),
    /// User-defined type known only by name
    Named(String),
}

impl ValueType {
    /// Shorthand for a nullable wrapper around `inner`.
    pub fn nullable(inner: ValueType) -> Self {
        ValueType::Nullable(Box::new(inner))
    }

    /// Shorthand for a user-defined type descriptor.
    pub fn named(name: impl Into<String>) -> Self {
        ValueType::Named(name.into())
    }

    /// Whether this descriptor is a nullable wrapper.
    pub fn is_nullable(&self) -> bool {
        matches!(self, ValueType::Nullable(_))
    }

    /// The wrapped type of a nullable descriptor, or the descriptor itself.
    pub fn underlying(&self) -> &ValueType {
        match self {
            ValueType::Nullable(inner) => inner.underlying(),
            other => other,
        }
    }

    /// Whether values of this type are simple scalars whose literal form is
    /// safe to echo in diagnostics.
    pub fn is_simple(&self) -> bool {
        match self {
            ValueType::Bool
            | ValueType::Int
            | ValueType::Float
            | ValueType::Text
            | ValueType::Timestamp
            | ValueType::Uuid
            | ValueType::Version
            | ValueType::Enum(_) => true,
            ValueType::Nullable(inner) => inner.is_simple(),
            ValueType::Any | ValueType::Named(_) => false,
        }
    }

    /// The default value of this type: zero, empty, or the none
    /// representation for nullable and reference-like types.
    pub fn default_value(&self) -> Value {
        match self {
            ValueType::Any | ValueType::Named(_) | ValueType::Nullable(_) => Value::Null,
            ValueType::Bool => Value::Bool(false),
            ValueType::Int => Value::Int(0),
            ValueType::Float => Value::Float(0.0),
            ValueType::Text => Value::Text(String::new()),
            ValueType::Timestamp => Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH),
            ValueType::Uuid => Value::Uuid(Uuid::nil()),
            ValueType::Version => Value::Version(VersionNumber::default()),
            ValueType::Enum(enum_type) => Value::Enum(EnumMember::new(enum_type.clone(), 0)),
        }
    }

    /// Whether a value whose runtime type is `source` can be used where this
    /// type is expected without conversion.
    ///
    /// There is no subtyping between descriptors: assignability is identity,
    /// plus `Any` accepting everything and a nullable wrapper accepting its
    /// underlying type.
    pub fn is_assignable_from(&self, source: &ValueType) -> bool {
        match self {
            ValueType::Any => true,
            ValueType::Nullable(inner) => self == source || inner.is_assignable_from(source),
            other => other == source,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Any => write!(f, "any"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::Text => write!(f, "text"),
            ValueType::Timestamp => write!(f, "timestamp"),
            ValueType::Uuid => write!(f, "uuid"),
            ValueType::Version => write!(f, "version"),
            ValueType::Enum(enum_type) => write!(f, "enum {}", enum_type.name),
            ValueType::Nullable(inner) => write!(f, "{}?", inner),
            ValueType::Named(name) => write!(f, "{}", name),
        }
    }
}
