//! Fallback rules for values the generic machinery does not serve.
//!
//! Rules are evaluated top to bottom, first match wins:
//! empty text defaults, enumerations, identifier and version literals,
//! and the universal to-text fallback. `Ok(None)` means no rule matched
//! and the conversion as a whole has failed.

use std::str::FromStr;

use uuid::Uuid;

use crate::culture::Culture;
use crate::values::{EnumMember, EnumType, Value, ValueType, VersionNumber};

use super::ConvertError;

pub(crate) fn convert_special(
    value: &Value,
    target: &ValueType,
    _culture: &Culture,
) -> Result<Option<Value>, ConvertError> {
    // Zero-length text defaults, whatever the destination.
    if let Value::Text(text) = value {
        if text.is_empty() {
            return Ok(Some(target.default_value()));
        }
    }

    if let ValueType::Enum(enum_type) = target {
        return convert_enum(value, enum_type);
    }

    if let Value::Text(text) = value {
        if *target == ValueType::Uuid {
            let id = Uuid::parse_str(text.trim())
                .map_err(|_| ConvertError::format("uuid", text.clone()))?;
            return Ok(Some(Value::Uuid(id)));
        }
        if *target == ValueType::Version {
            let version = VersionNumber::from_str(text)
                .map_err(|_| ConvertError::format("version", text.clone()))?;
            return Ok(Some(Value::Version(version)));
        }
    }

    if *target == ValueType::Text {
        return Ok(Some(Value::Text(value.to_string())));
    }

    Ok(None)
}

/// Enumeration coercion. Text parses against member names, and a parsed
/// name must be a defined member; numeric input (textual or not) coerces
/// into the enum without a definedness check.
fn convert_enum(value: &Value, enum_type: &EnumType) -> Result<Option<Value>, ConvertError> {
    let member = |raw: i64| Value::Enum(EnumMember::new(enum_type.clone(), raw));

    match value {
        Value::Text(text) => {
            let text = text.trim();
            if let Some(raw) = enum_type.member_value(text) {
                return Ok(Some(member(raw)));
            }
            match text.parse::<i64>() {
                Ok(raw) => Ok(Some(member(raw))),
                Err(_) => Err(ConvertError::format(
                    format!("enum {}", enum_type.name),
                    text.to_string(),
                )),
            }
        }
        Value::Int(raw) => Ok(Some(member(*raw))),
        Value::Bool(b) => Ok(Some(member(i64::from(*b)))),
        Value::Enum(other) => Ok(Some(member(other.value))),
        // No integer underlying value to coerce; let the engine fail.
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> EnumType {
        EnumType::new("Color", [("Red", 1), ("Green", 2), ("Blue", 3)])
    }

    fn run(value: Value, target: &ValueType) -> Result<Option<Value>, ConvertError> {
        convert_special(&value, target, &Culture::invariant())
    }

    #[test]
    fn test_empty_text_defaults_before_other_rules() {
        let result = run(Value::from(""), &ValueType::Enum(color())).unwrap();
        assert_eq!(result, Some(Value::Enum(EnumMember::new(color(), 0))));
    }

    #[test]
    fn test_enum_name_must_be_defined() {
        let result = run(Value::from("Blue"), &ValueType::Enum(color())).unwrap();
        assert_eq!(result, Some(Value::Enum(EnumMember::new(color(), 3))));

        let err = run(Value::from("Purple"), &ValueType::Enum(color())).unwrap_err();
        assert!(matches!(err, ConvertError::Format { .. }));
    }

    #[test]
    fn test_enum_numeric_text_skips_definedness() {
        let result = run(Value::from("999"), &ValueType::Enum(color())).unwrap();
        assert_eq!(result, Some(Value::Enum(EnumMember::new(color(), 999))));
    }

    #[test]
    fn test_enum_numeric_value_skips_definedness() {
        let result = run(Value::Int(7), &ValueType::Enum(color())).unwrap();
        assert_eq!(result, Some(Value::Enum(EnumMember::new(color(), 7))));
    }

    #[test]
    fn test_uuid_literal() {
        let result = run(
            Value::from("550e8400-e29b-41d4-a716-446655440000"),
            &ValueType::Uuid,
        )
        .unwrap();
        assert!(matches!(result, Some(Value::Uuid(_))));

        let err = run(Value::from("not-a-guid"), &ValueType::Uuid).unwrap_err();
        assert!(matches!(err, ConvertError::Format { .. }));
    }

    #[test]
    fn test_version_literal() {
        let result = run(Value::from("1.2.3"), &ValueType::Version).unwrap();
        assert_eq!(
            result,
            Some(Value::Version("1.2.3".parse::<VersionNumber>().unwrap()))
        );
    }

    #[test]
    fn test_text_fallback_uses_display_form() {
        let result = run(Value::Int(42), &ValueType::Text).unwrap();
        assert_eq!(result, Some(Value::Text("42".to_string())));
    }

    #[test]
    fn test_no_rule_matches() {
        let result = run(Value::Int(1), &ValueType::named("widget")).unwrap();
        assert_eq!(result, None);
    }
}
