//! Enumeration descriptors and enumeration member values.
//!
//! An [`EnumType`] describes a named enumeration over an integer underlying
//! representation; an [`EnumMember`] is a concrete value of such a type.
//! Members are not required to be defined: a member may carry any integer,
//! matching how destination systems accept out-of-range enum storage.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single named member of an enumeration type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumTypeMember {
    /// Member name as written in the source schema
    pub name: String,
    /// Underlying integer value
    pub value: i64,
}

/// Descriptor for an enumeration type: a name plus its declared members.
///
/// # Example
///
/// ```rust
/// use value_mapping_sdk::values::EnumType;
///
/// let color = EnumType::new("Color", [("Red", 1), ("Green", 2), ("Blue", 3)]);
/// assert_eq!(color.member_value("Green"), Some(2));
/// assert!(!color.is_defined(99));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumType {
    /// Enumeration type name
    pub name: String,
    /// Declared members, in declaration order
    pub members: Vec<EnumTypeMember>,
}

impl EnumType {
    /// Create an enumeration descriptor from `(name, value)` pairs.
    pub fn new<N, I, M>(name: N, members: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (M, i64)>,
        M: Into<String>,
    {
        EnumType {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(name, value)| EnumTypeMember {
                    name: name.into(),
                    value,
                })
                .collect(),
        }
    }

    /// Underlying value of the member with the given name, if declared.
    pub fn member_value(&self, name: &str) -> Option<i64> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }

    /// Name of the first declared member with the given value, if any.
    pub fn member_name(&self, value: i64) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.value == value)
            .map(|m| m.name.as_str())
    }

    /// Whether the given underlying value corresponds to a declared member.
    pub fn is_defined(&self, value: i64) -> bool {
        self.members.iter().any(|m| m.value == value)
    }
}

/// A value of an enumeration type: the descriptor plus an underlying value.
///
/// The underlying value need not be a declared member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumMember {
    /// The enumeration this value belongs to
    pub enum_type: EnumType,
    /// Underlying integer value
    pub value: i64,
}

impl EnumMember {
    /// Create a member value of the given enumeration.
    pub fn new(enum_type: EnumType, value: i64) -> Self {
        EnumMember { enum_type, value }
    }
}

impl fmt::Display for EnumMember {
    /// Renders the member name when defined, the raw value otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.enum_type.member_name(self.value) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> EnumType {
        EnumType::new("Color", [("Red", 1), ("Green", 2), ("Blue", 3)])
    }

    #[test]
    fn test_member_lookup_by_name() {
        assert_eq!(color().member_value("Red"), Some(1));
        assert_eq!(color().member_value("Purple"), None);
    }

    #[test]
    fn test_member_lookup_by_value() {
        assert_eq!(color().member_name(3), Some("Blue"));
        assert_eq!(color().member_name(42), None);
    }

    #[test]
    fn test_defined_member_displays_name() {
        let member = EnumMember::new(color(), 2);
        assert_eq!(member.to_string(), "Green");
    }

    #[test]
    fn test_undefined_member_displays_raw_value() {
        let member = EnumMember::new(color(), 999);
        assert_eq!(member.to_string(), "999");
    }
}
