//! The three record conversions: tag extraction, projection and population.

use crate::coerce::{SkipReason, coerce};
use crate::{FieldDirective, MapperConfig, MapperError, MapperResult, Record, SkipPolicy};
use std::fmt;
use tagmap_types::{MapStr, Value};
use tracing::{debug, error, trace, warn};

/// Returns the raw directive of every tagged field of `R`, in declaration order.
///
/// Directives are not split or filtered: suppressed and empty directives are
/// included, untagged fields are not.
pub fn extract_tags<R: Record>() -> Vec<&'static str> {
    R::fields().iter().filter_map(|f| f.directive()).collect()
}

/// Projects `record` into a new map keyed by each field's canonical key.
///
/// Values keep their native shape. Untagged fields, empty directives and
/// directives containing `ignoretomap` are left out.
pub fn to_map<R: Record>(record: &R) -> MapStr {
    let fields = R::fields();
    let mut values = MapStr::with_capacity(fields.len());
    for field in &fields {
        let Some(raw) = field.directive() else {
            continue;
        };
        let directive = FieldDirective::parse(raw);
        if !directive.projects_to_map() {
            continue;
        }
        values.set(directive.key(), field.get(record));
    }
    values
}

/// Populates `record` from `values`, field by field.
///
/// Never fails: fields whose value cannot be coerced keep their prior value
/// and are listed in the returned [`Population`]. Missing keys, `null`
/// values, read-only fields and fields excluded by their directive are
/// ignored without being reported.
pub fn from_map<R: Record>(record: &mut R, values: &MapStr) -> Population {
    let mut population = Population::default();

    for field in &R::fields() {
        let Some(raw) = field.directive() else {
            continue;
        };
        let directive = FieldDirective::parse(raw);
        if !directive.populates_record() {
            continue;
        }

        let key = directive.key();
        let value = match values.get(key) {
            None | Some(Value::Null) => {
                trace!(field = field.name(), key, "no value, field left unchanged");
                continue;
            }
            Some(value) => value,
        };

        if !field.is_settable() {
            trace!(field = field.name(), key, "field is read-only");
            continue;
        }

        let reason = match coerce(field.kind(), value.clone()) {
            Ok(coerced) => {
                if field.set(record, coerced) {
                    population.assigned.push(key.to_owned());
                    continue;
                }
                SkipReason::Mismatch {
                    expected: field.kind(),
                    found: value.kind_name(),
                }
            }
            Err(reason) => reason,
        };

        match reason {
            SkipReason::UnsupportedKind => {
                error!(field = field.name(), key, "unsupported field type, field left unchanged");
            }
            SkipReason::Mismatch { expected, found } => {
                warn!(
                    field = field.name(),
                    key,
                    %expected,
                    found,
                    "unsupported source value, field left unchanged"
                );
            }
        }
        population.skipped.push(SkippedField {
            field: field.name(),
            key: key.to_owned(),
            reason,
        });
    }

    debug!(
        assigned = population.assigned.len(),
        skipped = population.skipped.len(),
        "populated record from map"
    );
    population
}

/// Outcome of populating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    assigned: Vec<String>,
    skipped: Vec<SkippedField>,
}

impl Population {
    /// Canonical keys that were written, in field order.
    pub fn assigned(&self) -> &[String] {
        &self.assigned
    }

    /// Fields that had a value in the map but could not be written.
    pub fn skipped(&self) -> &[SkippedField] {
        &self.skipped
    }

    /// True when every field with a usable key was written.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn into_skipped(self) -> Vec<SkippedField> {
        self.skipped
    }
}

/// A field left unchanged because its value could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    /// Rust field identifier.
    pub field: &'static str,
    /// Canonical key the value was read from.
    pub key: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.key, self.reason)
    }
}

/// Record converter carrying a [`MapperConfig`].
///
/// The free functions [`extract_tags`], [`to_map`] and [`from_map`] behave
/// like a `TagMapper` with the default (permissive) config.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagMapper {
    config: MapperConfig,
}

impl TagMapper {
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn extract_tags<R: Record>(&self) -> Vec<&'static str> {
        extract_tags::<R>()
    }

    /// Same as [`TagMapper::extract_tags`], for callers holding an instance.
    /// A boxed record is passed as `&*boxed`.
    pub fn tags_of<R: Record>(&self, _record: &R) -> Vec<&'static str> {
        extract_tags::<R>()
    }

    pub fn to_map<R: Record>(&self, record: &R) -> MapStr {
        to_map(record)
    }

    /// Projects `record` and renders the map as JSON.
    pub fn to_json<R: Record>(&self, record: &R) -> serde_json::Value {
        to_map(record).to_json()
    }

    /// Populates `record` from `values`, applying the configured skip policy.
    ///
    /// Every field is attempted before the policy is checked, so a strict
    /// failure still leaves all coercible fields written.
    pub fn from_map<R: Record>(&self, record: &mut R, values: &MapStr) -> MapperResult<Population> {
        let population = from_map(record, values);
        match self.config.skip_policy {
            SkipPolicy::Strict if !population.is_complete() => Err(MapperError::Incomplete {
                skipped: population.into_skipped(),
            }),
            _ => Ok(population),
        }
    }

    /// Decodes a JSON object and populates `record` from it.
    pub fn from_json_str<R: Record>(&self, record: &mut R, json: &str) -> MapperResult<Population> {
        let values = MapStr::from_json_str(json)?;
        self.from_map(record, &values)
    }
}
