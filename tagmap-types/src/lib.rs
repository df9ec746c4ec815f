//! Dynamic value types for tagmap.
//!
//! This crate defines the loosely-typed side of the record bridge:
//! - [`Value`] — a sum type over every shape a map slot can hold
//! - [`MapStr`] — an insertion-ordered, string-keyed map of [`Value`]s
//! - [`Opaque`] — a native value with no conversion rule, carried as-is
//!
//! Record introspection and the conversion rules live in `tagmap-model`;
//! nothing here knows about records.

mod map_str;
mod value;

pub use map_str::MapStr;
pub use value::{Opaque, Value};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by map access and JSON bridging.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("key not found: {0}")]
    MissingKey(String),

    #[error("type mismatch for key {key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}
