//! Value Mapping SDK - Culture-aware value conversion for field mapping
//!
//! Moves values between a dynamic representation (parsed fields) and
//! statically-declared destination types without the caller knowing in
//! advance which strategy will succeed:
//! - Ordered conversion pipeline (`convert_to`/`convert_from`)
//! - Pluggable per-target converter chains
//! - Registered user-defined conversion operators
//! - Special-value rules (enums, identifiers, versions, empty text)
//! - Culture-aware scalar parsing and formatting

pub mod convert;
pub mod culture;
pub mod values;

// Re-export commonly used types
pub use convert::chain::{ConverterEntry, DirectionalConverter, TwoWayConverter};
pub use convert::operators::{OperatorKind, register_explicit, register_implicit, register_operator};
pub use convert::typed::{FromValue, convert_as};
pub use convert::{
    ConversionRequest, ConvertError, convert_from, convert_from_with, convert_to, convert_to_with,
    try_convert_from, try_convert_to,
};
pub use culture::{Culture, default_culture};

// Re-export values
pub use values::{EnumMember, EnumType, OpaqueValue, Value, ValueType, VersionNumber};
