//! Caller-supplied converter chains.
//!
//! A chain entry comes in two capability shapes: the legacy two-way
//! converter (guarded by `can_convert_to`/`can_convert_from`) and the
//! binding-style directional converter (always invoked, with an auxiliary
//! parameter block). The engine dispatches on the [`ConverterEntry`]
//! variant, so direction handling is a plain pattern match.
//!
//! Entries are owned by the upstream resolver; the engine runs them in
//! order, feeding each entry's output to the next, and never mutates or
//! caches them. Thread-safety of converter implementations is the
//! caller's responsibility.

use std::sync::Arc;

use crate::culture::Culture;
use crate::values::{Value, ValueType};

use super::{ConvertError, Direction};

/// Legacy two-way converter: each direction is gated by a capability check
/// against the value's runtime type (inbound) or the destination (outbound).
/// An entry whose check declines leaves the value untouched.
pub trait TwoWayConverter: Send + Sync {
    /// Whether this converter accepts values of `source` on the inbound
    /// (from-external) direction.
    fn can_convert_from(&self, source: &ValueType) -> bool;

    /// Whether this converter can produce `target` on the outbound
    /// (to-external) direction.
    fn can_convert_to(&self, target: &ValueType) -> bool;

    /// Inbound conversion, with the resolved culture.
    fn convert_from(&self, value: Value, culture: &Culture) -> Result<Value, ConvertError>;

    /// Outbound conversion toward `target`, with the resolved culture.
    fn convert_to(
        &self,
        value: Value,
        target: &ValueType,
        culture: &Culture,
    ) -> Result<Value, ConvertError>;
}

/// Binding-style converter with one method per direction and an auxiliary
/// parameter block taken from the chain's aligned parameter list.
pub trait DirectionalConverter: Send + Sync {
    /// Inbound (from-external) conversion.
    fn convert(
        &self,
        value: Value,
        target: &ValueType,
        param: Option<&serde_json::Value>,
        culture: &Culture,
    ) -> Result<Value, ConvertError>;

    /// Outbound (to-external) conversion.
    fn convert_back(
        &self,
        value: Value,
        target: &ValueType,
        param: Option<&serde_json::Value>,
        culture: &Culture,
    ) -> Result<Value, ConvertError>;
}

/// One entry of a resolved converter chain.
#[derive(Clone)]
pub enum ConverterEntry {
    /// Legacy two-way converter
    TwoWay(Arc<dyn TwoWayConverter>),
    /// Binding-style directional converter
    Directional(Arc<dyn DirectionalConverter>),
}

impl ConverterEntry {
    /// Wrap a two-way converter.
    pub fn two_way(converter: impl TwoWayConverter + 'static) -> Self {
        ConverterEntry::TwoWay(Arc::new(converter))
    }

    /// Wrap a directional converter.
    pub fn directional(converter: impl DirectionalConverter + 'static) -> Self {
        ConverterEntry::Directional(Arc::new(converter))
    }
}

/// Run the whole chain in order, composing entry outputs. `params[i]`
/// belongs to `converters[i]`; a missing block passes `None`.
pub(crate) fn run_chain(
    direction: Direction,
    mut value: Value,
    target: &ValueType,
    converters: &[ConverterEntry],
    params: &[serde_json::Value],
    culture: &Culture,
) -> Result<Value, ConvertError> {
    for (index, entry) in converters.iter().enumerate() {
        let param = params.get(index);
        value = match entry {
            ConverterEntry::TwoWay(converter) => match direction {
                Direction::From => {
                    if converter.can_convert_from(&value.value_type()) {
                        converter.convert_from(value, culture)?
                    } else {
                        value
                    }
                }
                Direction::To => {
                    if converter.can_convert_to(target) {
                        converter.convert_to(value, target, culture)?
                    } else {
                        value
                    }
                }
            },
            ConverterEntry::Directional(converter) => match direction {
                Direction::From => converter.convert(value, target, param, culture)?,
                Direction::To => converter.convert_back(value, target, param, culture)?,
            },
        };
    }
    Ok(value)
}
