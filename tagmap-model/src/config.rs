use crate::{MapperError, MapperResult};
use serde::{Deserialize, Serialize};

/// What population reports when some fields could not be assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipPolicy {
    /// Always succeed; skipped fields are listed in the returned
    /// [`Population`](crate::Population).
    #[default]
    Permissive,
    /// Attempt every field, then fail with
    /// [`MapperError::Incomplete`] if any were skipped.
    Strict,
}

/// Mapper configuration.
///
/// ```json
/// { "skip_policy": "strict" }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    pub skip_policy: SkipPolicy,
}

impl MapperConfig {
    /// Shorthand for a config with [`SkipPolicy::Strict`].
    pub fn strict() -> Self {
        Self {
            skip_policy: SkipPolicy::Strict,
        }
    }

    pub fn from_json_str(s: &str) -> MapperResult<Self> {
        serde_json::from_str(s).map_err(MapperError::Config)
    }
}
