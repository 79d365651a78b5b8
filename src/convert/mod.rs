//! The ordered conversion pipeline.
//!
//! Given a dynamic [`Value`] and a destination [`ValueType`], the engine
//! tries a prioritized sequence of strategies and returns the first
//! produced value:
//!
//! 1. universal destination returns the value unchanged
//! 2. the caller-supplied converter chain (a chain that replaces the value
//!    is the final result; no later strategy runs)
//! 3. null defaults to the destination's default value
//! 4. nullable destinations unwrap to their underlying type
//! 5. assignable values pass through unchanged
//! 6. generic scalar conversion under the resolved culture (soft; a miss
//!    advances the pipeline)
//! 7. user-defined conversion operators, explicit before implicit
//! 8. nullable destinations fall back to the none representation
//! 9. the special-value policy (empty text, enums, identifiers, versions,
//!    to-text)
//!
//! Exhaustion, or an unexpected failure inside a strategy, surfaces as a
//! single [`ConvertError::Conversion`] naming both types; format failures
//! from the special-value policy are terminal and pass through unchanged.
//!
//! `convert_to` and `convert_from` are symmetric and differ only in which
//! side of a chain entry's two-way contract is invoked.

pub mod chain;
pub mod operators;
pub mod scalar;
pub mod special;
pub mod typed;

use thiserror::Error;
use tracing::{debug, warn};

use crate::culture::{Culture, default_culture};
use crate::values::{Value, ValueType};

use chain::ConverterEntry;
use operators::OperatorKind;

/// Error produced when a conversion cannot be completed.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Text that cannot be parsed into the requested special type
    /// (identifier, version, enum member name). Terminal; never retried.
    #[error("invalid {kind} literal '{text}'")]
    Format {
        /// What the text was being parsed as
        kind: String,
        /// The offending text
        text: String,
    },

    /// No strategy produced a value, or a strategy failed unexpectedly.
    /// The offending literal is echoed only for simple scalar sources.
    #[error("can't convert {}from '{source_type}' type to '{target_type}' type", literal_clause(.value))]
    Conversion {
        /// Runtime type of the source value
        source_type: String,
        /// Requested destination type
        target_type: String,
        /// Literal form of the value, for simple scalar sources only
        value: Option<String>,
        /// The failure that ended the pipeline, when there was one
        #[source]
        cause: Option<Box<ConvertError>>,
    },
}

fn literal_clause(value: &Option<String>) -> String {
    match value {
        Some(literal) => format!("'{}' value ", literal),
        None => "object ".to_string(),
    }
}

impl ConvertError {
    /// A format failure for text that is not a valid `kind` literal.
    pub fn format(kind: impl Into<String>, text: impl Into<String>) -> Self {
        ConvertError::Format {
            kind: kind.into(),
            text: text.into(),
        }
    }

    pub(crate) fn conversion(
        source_type: &ValueType,
        target_type: &ValueType,
        value: &Value,
        cause: Option<ConvertError>,
    ) -> Self {
        let literal = (source_type.is_simple() && !value.is_null()).then(|| value.to_string());
        ConvertError::Conversion {
            source_type: source_type.to_string(),
            target_type: target_type.to_string(),
            value: literal,
            cause: cause.map(Box::new),
        }
    }
}

/// Which side of a chain entry's two-way contract a conversion invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Toward the external representation (`convert_to`)
    To,
    /// From the external representation (`convert_from`)
    From,
}

/// One conversion call: the value, the requested destination, and the
/// already-resolved collaborators.
///
/// `context` is the originating member handle; it is opaque to the engine
/// and only meaningful to the upstream resolver that produced the chain.
/// `params[i]` is the auxiliary parameter block for `converters[i]`.
pub struct ConversionRequest<'a> {
    /// Source value
    pub value: Value,
    /// Destination type descriptor
    pub target: &'a ValueType,
    /// Opaque originating-member handle, passed through untouched
    pub context: Option<&'a str>,
    /// Pre-resolved converter chain, applied in order
    pub converters: &'a [ConverterEntry],
    /// Parameter blocks aligned with `converters`
    pub params: &'a [serde_json::Value],
    /// Culture for scalar parsing/formatting; default when absent
    pub culture: Option<&'a Culture>,
}

impl<'a> ConversionRequest<'a> {
    /// A request with no chain, no context, and the default culture.
    pub fn new(value: Value, target: &'a ValueType) -> Self {
        ConversionRequest {
            value,
            target,
            context: None,
            converters: &[],
            params: &[],
            culture: None,
        }
    }
}

/// Convert a value toward its external representation.
///
/// # Example
///
/// ```rust
/// use value_mapping_sdk::values::{Value, ValueType};
/// use value_mapping_sdk::convert::convert_to;
///
/// let converted = convert_to(Value::from("42"), &ValueType::Int, None).unwrap();
/// assert_eq!(converted, Value::Int(42));
/// ```
pub fn convert_to(
    value: Value,
    target: &ValueType,
    culture: Option<&Culture>,
) -> Result<Value, ConvertError> {
    let mut request = ConversionRequest::new(value, target);
    request.culture = culture;
    convert_to_with(request)
}

/// Convert a value arriving from its external representation.
pub fn convert_from(
    value: Value,
    target: &ValueType,
    culture: Option<&Culture>,
) -> Result<Value, ConvertError> {
    let mut request = ConversionRequest::new(value, target);
    request.culture = culture;
    convert_from_with(request)
}

/// [`convert_to`] with an explicit request carrying a converter chain.
pub fn convert_to_with(request: ConversionRequest<'_>) -> Result<Value, ConvertError> {
    run(Direction::To, request)
}

/// [`convert_from`] with an explicit request carrying a converter chain.
pub fn convert_from_with(request: ConversionRequest<'_>) -> Result<Value, ConvertError> {
    run(Direction::From, request)
}

/// Non-failing form of [`convert_to`]; `None` when the conversion fails.
pub fn try_convert_to(value: Value, target: &ValueType, culture: Option<&Culture>) -> Option<Value> {
    convert_to(value, target, culture).ok()
}

/// Non-failing form of [`convert_from`].
pub fn try_convert_from(
    value: Value,
    target: &ValueType,
    culture: Option<&Culture>,
) -> Option<Value> {
    convert_from(value, target, culture).ok()
}

enum StepError {
    /// A strategy failed in a way the pipeline cannot recover from.
    Fatal(ConvertError),
    /// Every strategy was tried and none produced a value.
    Exhausted,
}

fn run(direction: Direction, request: ConversionRequest<'_>) -> Result<Value, ConvertError> {
    let ConversionRequest {
        value,
        target,
        context: _,
        converters,
        params,
        culture,
    } = request;

    if matches!(target, ValueType::Any) {
        return Ok(value);
    }
    let culture = culture.unwrap_or_else(|| default_culture());

    let source_type = value.value_type();
    let original = value.clone();

    match pipeline(direction, value, &original, target, converters, params, culture) {
        Ok(converted) => Ok(converted),
        Err(StepError::Fatal(error @ ConvertError::Format { .. })) => Err(error),
        Err(StepError::Fatal(cause)) => Err(ConvertError::conversion(
            &source_type,
            target,
            &original,
            Some(cause),
        )),
        Err(StepError::Exhausted) => {
            warn!(source = %source_type, target = %target, "no conversion strategy matched");
            Err(ConvertError::conversion(&source_type, target, &original, None))
        }
    }
}

fn pipeline(
    direction: Direction,
    mut value: Value,
    original: &Value,
    target: &ValueType,
    converters: &[ConverterEntry],
    params: &[serde_json::Value],
    culture: &Culture,
) -> Result<Value, StepError> {
    // Converter chain. A chain that replaced the value decides the
    // conversion outright; every generic strategy below is skipped.
    if !converters.is_empty() {
        value = chain::run_chain(direction, value, target, converters, params, culture)
            .map_err(StepError::Fatal)?;
        if value != *original {
            debug!(target = %target, "converter chain produced the result");
            return Ok(value);
        }
    }

    // Null defaults to the destination's default, nullable included.
    if value.is_null() {
        return Ok(target.default_value());
    }

    // Nullable destinations convert toward their underlying type; whether
    // the request was nullable still matters for the fallback below.
    let was_nullable = target.is_nullable();
    let target = target.underlying();

    if target.is_assignable_from(&value.value_type()) {
        return Ok(value);
    }

    // Generic scalar conversion is a soft attempt: a miss falls through.
    if scalar::is_convertible(&value) {
        if let Ok(converted) = scalar::change_type(&value, target, culture) {
            if converted != value {
                debug!(target = %target, "scalar conversion produced the result");
                return Ok(converted);
            }
        }
    }

    if let Some(converted) = operators::find_and_invoke(&value, target, OperatorKind::Explicit)
        .or_else(|| operators::find_and_invoke(&value, target, OperatorKind::Implicit))
    {
        return Ok(converted);
    }

    // A nullable request that nothing could serve becomes none, not an
    // error; the special-value rules are reserved for non-nullable
    // destinations.
    if was_nullable {
        return Ok(Value::Null);
    }

    if let Some(converted) =
        special::convert_special(&value, target, culture).map_err(StepError::Fatal)?
    {
        debug!(target = %target, "special-value rule produced the result");
        return Ok(converted);
    }

    Err(StepError::Exhausted)
}
