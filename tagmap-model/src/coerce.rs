//! Coercion from whatever a map holds to a field's declared kind.
//!
//! Maps are usually filled from a decoded wire document where every number
//! arrives in one representation, so numeric kinds accept any numeric source
//! and convert. Everything else must already have the right shape.

use crate::FieldKind;
use std::fmt;
use tagmap_types::Value;

/// Why a field was left unchanged during population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The source value has no rule into the field's kind.
    Mismatch {
        expected: FieldKind,
        found: &'static str,
    },
    /// The field's declared kind has no coercion rule at all.
    UnsupportedKind,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Mismatch { expected, found } => {
                write!(f, "cannot assign {found} to {expected} field")
            }
            SkipReason::UnsupportedKind => f.write_str("unsupported field type"),
        }
    }
}

/// Converts `value` to the representation of `kind`.
///
/// - `Map` takes a map as-is.
/// - `Open` takes anything, following a [`Value::Ref`] one level.
/// - `Bool` and `Text` require their own variant.
/// - `Int` goes through `i64` (floats truncate) and narrows with wrap-around.
/// - `Float` goes through `f64`.
pub fn coerce(kind: FieldKind, value: Value) -> Result<Value, SkipReason> {
    let found = value.kind_name();
    let converted = match kind {
        FieldKind::Map => match value {
            Value::Map(_) => Some(value),
            _ => None,
        },
        FieldKind::Open => Some(value.deref_once()),
        FieldKind::Bool => value.as_bool().map(Value::Bool),
        FieldKind::Int(width) => value.as_i64().map(|n| width.narrow(n)),
        FieldKind::Float(width) => value.as_f64().map(|n| width.narrow(n)),
        FieldKind::Text => match value {
            Value::String(_) => Some(value),
            _ => None,
        },
        FieldKind::Unsupported => return Err(SkipReason::UnsupportedKind),
    };
    converted.ok_or(SkipReason::Mismatch {
        expected: kind,
        found,
    })
}
