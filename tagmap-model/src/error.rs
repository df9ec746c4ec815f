//! Error types for the mapper.

use crate::SkippedField;
use thiserror::Error;

/// Mapper-level errors.
#[derive(Debug, Error)]
pub enum MapperError {
    /// Strict population left one or more fields unchanged.
    #[error("{} field(s) could not be populated: {}", .skipped.len(), describe(.skipped))]
    Incomplete { skipped: Vec<SkippedField> },

    /// Mapper configuration could not be parsed.
    #[error("invalid mapper config: {0}")]
    Config(#[source] serde_json::Error),

    /// Map access or JSON bridging failed.
    #[error(transparent)]
    Types(#[from] tagmap_types::Error),
}

fn describe(skipped: &[SkippedField]) -> String {
    skipped
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for mapper operations.
pub type MapperResult<T> = Result<T, MapperError>;
