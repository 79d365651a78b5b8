//! User-defined conversion operators.
//!
//! The original reflective search for static conversion operators is
//! rendered as a registered lookup table populated at startup: each entry
//! records the type it is declared on (its owner), the operator kind, the
//! exact parameter type, the result type, and the conversion function.
//!
//! `find_and_invoke` preserves the search semantics: entries declared on
//! the value's own type are tried before entries declared on the
//! destination type; within a pass, registration order decides; the first
//! structurally eligible entry is invoked, and an invocation failure
//! continues the search instead of aborting it.

use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::values::{Value, ValueType};

use super::ConvertError;

/// Which flavor of conversion operator an entry declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// Explicit (cast-style) operator; searched first
    Explicit,
    /// Implicit operator; searched when no explicit operator applies
    Implicit,
}

type OperatorFn = dyn Fn(&Value) -> Result<Value, ConvertError> + Send + Sync;

struct OperatorEntry {
    owner: ValueType,
    kind: OperatorKind,
    param: ValueType,
    result: ValueType,
    func: Box<OperatorFn>,
}

static OPERATOR_TABLE: Lazy<RwLock<Vec<OperatorEntry>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// Register a conversion operator declared on `owner`.
///
/// `param` must exactly match a candidate value's runtime type for the
/// entry to be eligible; `result` must be assignable to the requested
/// destination. Registration is append-only and thread-safe; declaration
/// order is search order.
pub fn register_operator<F>(
    owner: ValueType,
    kind: OperatorKind,
    param: ValueType,
    result: ValueType,
    func: F,
) where
    F: Fn(&Value) -> Result<Value, ConvertError> + Send + Sync + 'static,
{
    let mut table = OPERATOR_TABLE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    table.push(OperatorEntry {
        owner,
        kind,
        param,
        result,
        func: Box::new(func),
    });
}

/// Register an explicit (cast-style) operator declared on `owner`.
pub fn register_explicit<F>(owner: ValueType, param: ValueType, result: ValueType, func: F)
where
    F: Fn(&Value) -> Result<Value, ConvertError> + Send + Sync + 'static,
{
    register_operator(owner, OperatorKind::Explicit, param, result, func);
}

/// Register an implicit operator declared on `owner`.
pub fn register_implicit<F>(owner: ValueType, param: ValueType, result: ValueType, func: F)
where
    F: Fn(&Value) -> Result<Value, ConvertError> + Send + Sync + 'static,
{
    register_operator(owner, OperatorKind::Implicit, param, result, func);
}

/// Search for an eligible operator of the given kind and invoke it.
///
/// Pass one searches entries owned by the value's runtime type, pass two
/// entries owned by the destination; a source-declared operator therefore
/// wins over a destination-declared one. Returns `None` when no eligible
/// entry produced a value.
pub(crate) fn find_and_invoke(
    value: &Value,
    destination: &ValueType,
    kind: OperatorKind,
) -> Option<Value> {
    let source_type = value.value_type();
    let table = OPERATOR_TABLE
        .read()
        .unwrap_or_else(PoisonError::into_inner);

    for owner in [&source_type, destination] {
        for entry in table.iter().filter(|e| e.owner == *owner) {
            if entry.kind != kind
                || entry.param != source_type
                || !destination.is_assignable_from(&entry.result)
            {
                continue;
            }
            match (entry.func)(value) {
                Ok(converted) => {
                    debug!(
                        source = %source_type,
                        destination = %destination,
                        owner = %entry.owner,
                        "conversion operator applied"
                    );
                    return Some(converted);
                }
                // A failing candidate does not end the search.
                Err(_) => continue,
            }
        }
    }
    None
}
