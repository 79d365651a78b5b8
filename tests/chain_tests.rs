//! Converter-chain tests
//!
//! The chain runs before every generic strategy: entries compose in order,
//! a chain that replaces the value short-circuits the rest of the pipeline,
//! and the two capability shapes dispatch per direction.

use value_mapping_sdk::{
    ConversionRequest, ConvertError, ConverterEntry, Culture, DirectionalConverter, EnumType,
    TwoWayConverter, Value, ValueType, convert_from_with, convert_to_with,
};

/// Directional converter that always produces a fixed sentinel.
struct Sentinel(Value);

impl DirectionalConverter for Sentinel {
    fn convert(
        &self,
        _value: Value,
        _target: &ValueType,
        _param: Option<&serde_json::Value>,
        _culture: &Culture,
    ) -> Result<Value, ConvertError> {
        Ok(self.0.clone())
    }

    fn convert_back(
        &self,
        _value: Value,
        _target: &ValueType,
        _param: Option<&serde_json::Value>,
        _culture: &Culture,
    ) -> Result<Value, ConvertError> {
        Ok(self.0.clone())
    }
}

/// Appends a suffix to text values, passes everything else through.
struct AppendSuffix(&'static str);

impl DirectionalConverter for AppendSuffix {
    fn convert(
        &self,
        value: Value,
        _target: &ValueType,
        _param: Option<&serde_json::Value>,
        _culture: &Culture,
    ) -> Result<Value, ConvertError> {
        Ok(match value {
            Value::Text(s) => Value::Text(format!("{}{}", s, self.0)),
            other => other,
        })
    }

    fn convert_back(
        &self,
        value: Value,
        target: &ValueType,
        param: Option<&serde_json::Value>,
        culture: &Culture,
    ) -> Result<Value, ConvertError> {
        self.convert(value, target, param, culture)
    }
}

/// Passes the value through untouched in both directions.
struct Passthrough;

impl DirectionalConverter for Passthrough {
    fn convert(
        &self,
        value: Value,
        _target: &ValueType,
        _param: Option<&serde_json::Value>,
        _culture: &Culture,
    ) -> Result<Value, ConvertError> {
        Ok(value)
    }

    fn convert_back(
        &self,
        value: Value,
        _target: &ValueType,
        _param: Option<&serde_json::Value>,
        _culture: &Culture,
    ) -> Result<Value, ConvertError> {
        Ok(value)
    }
}

/// Multiplies integer values by the `factor` field of its parameter block.
struct MultiplyByParam;

impl DirectionalConverter for MultiplyByParam {
    fn convert(
        &self,
        value: Value,
        _target: &ValueType,
        param: Option<&serde_json::Value>,
        _culture: &Culture,
    ) -> Result<Value, ConvertError> {
        let factor = param
            .and_then(|p| p.get("factor"))
            .and_then(|f| f.as_i64())
            .unwrap_or(1);
        Ok(match value {
            Value::Int(i) => Value::Int(i * factor),
            other => other,
        })
    }

    fn convert_back(
        &self,
        value: Value,
        target: &ValueType,
        param: Option<&serde_json::Value>,
        culture: &Culture,
    ) -> Result<Value, ConvertError> {
        self.convert(value, target, param, culture)
    }
}

/// Two-way converter that uppercases text; each direction is gated on the
/// text type.
struct UppercaseTwoWay;

impl TwoWayConverter for UppercaseTwoWay {
    fn can_convert_from(&self, source: &ValueType) -> bool {
        *source == ValueType::Text
    }

    fn can_convert_to(&self, target: &ValueType) -> bool {
        *target == ValueType::Text
    }

    fn convert_from(&self, value: Value, _culture: &Culture) -> Result<Value, ConvertError> {
        match value {
            Value::Text(s) => Ok(Value::Text(s.to_uppercase())),
            other => Ok(other),
        }
    }

    fn convert_to(
        &self,
        value: Value,
        _target: &ValueType,
        _culture: &Culture,
    ) -> Result<Value, ConvertError> {
        match value {
            Value::Text(s) => Ok(Value::Text(s.to_uppercase())),
            other => Ok(other),
        }
    }
}

/// Directional converter that always fails.
struct AlwaysFails;

impl DirectionalConverter for AlwaysFails {
    fn convert(
        &self,
        value: Value,
        target: &ValueType,
        _param: Option<&serde_json::Value>,
        _culture: &Culture,
    ) -> Result<Value, ConvertError> {
        Err(ConvertError::Conversion {
            source_type: value.value_type().to_string(),
            target_type: target.to_string(),
            value: None,
            cause: None,
        })
    }

    fn convert_back(
        &self,
        value: Value,
        target: &ValueType,
        param: Option<&serde_json::Value>,
        culture: &Culture,
    ) -> Result<Value, ConvertError> {
        self.convert(value, target, param, culture)
    }
}

fn request<'a>(
    value: Value,
    target: &'a ValueType,
    converters: &'a [ConverterEntry],
    params: &'a [serde_json::Value],
) -> ConversionRequest<'a> {
    let mut request = ConversionRequest::new(value, target);
    request.converters = converters;
    request.params = params;
    request
}

#[test]
fn test_chain_result_short_circuits_later_strategies() {
    // "Red" would normally parse as an enum member; the sentinel decides
    // the conversion before the enum rule can run.
    let color = EnumType::new("Color", [("Red", 1)]);
    let target = ValueType::Enum(color);
    let converters = [ConverterEntry::directional(Sentinel(Value::Int(42)))];

    let converted = convert_to_with(request(Value::from("Red"), &target, &converters, &[])).unwrap();
    assert_eq!(converted, Value::Int(42));
}

#[test]
fn test_chain_entries_compose_in_order() {
    let converters = [
        ConverterEntry::directional(AppendSuffix("a")),
        ConverterEntry::directional(AppendSuffix("b")),
    ];
    let converted =
        convert_from_with(request(Value::from("x"), &ValueType::Text, &converters, &[])).unwrap();
    assert_eq!(converted, Value::Text("xab".to_string()));
}

#[test]
fn test_unchanged_chain_falls_through_to_scalar() {
    let converters = [ConverterEntry::directional(Passthrough)];
    let converted =
        convert_from_with(request(Value::from("5"), &ValueType::Int, &converters, &[])).unwrap();
    assert_eq!(converted, Value::Int(5));
}

#[test]
fn test_parameter_blocks_align_with_entries() {
    let converters = [
        ConverterEntry::directional(Passthrough),
        ConverterEntry::directional(MultiplyByParam),
    ];
    let params = [serde_json::Value::Null, serde_json::json!({"factor": 3})];
    let converted =
        convert_from_with(request(Value::Int(5), &ValueType::Int, &converters, &params)).unwrap();
    assert_eq!(converted, Value::Int(15));
}

#[test]
fn test_two_way_gate_declines_other_types() {
    let converters = [ConverterEntry::two_way(UppercaseTwoWay)];
    // An int is not text, so the gate declines and scalar conversion runs.
    let converted =
        convert_from_with(request(Value::Int(5), &ValueType::Text, &converters, &[])).unwrap();
    assert_eq!(converted, Value::Text("5".to_string()));
}

#[test]
fn test_two_way_applies_when_gate_accepts() {
    let converters = [ConverterEntry::two_way(UppercaseTwoWay)];
    let converted =
        convert_to_with(request(Value::from("red"), &ValueType::Text, &converters, &[])).unwrap();
    assert_eq!(converted, Value::Text("RED".to_string()));
}

#[test]
fn test_chain_failure_is_wrapped_with_cause() {
    let converters = [ConverterEntry::directional(AlwaysFails)];
    let err =
        convert_from_with(request(Value::from("5"), &ValueType::Int, &converters, &[])).unwrap_err();
    assert!(matches!(err, ConvertError::Conversion { .. }));
    assert!(std::error::Error::source(&err).is_some(), "{}", err);
}
