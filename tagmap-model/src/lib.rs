//! Tag-driven conversion between typed records and dynamic maps.
//!
//! A record type declares, once, a field table naming each field, its
//! directive (`"key[,ignoretomap][,ignoretostruct]"`) and how to read and
//! write it. The mapper then converts instances without per-type code:
//! - [`extract_tags`] — raw directives of every tagged field
//! - [`to_map`] — record → [`MapStr`](tagmap_types::MapStr)
//! - [`from_map`] — [`MapStr`](tagmap_types::MapStr) → record, coercing
//!   numbers across widths
//!
//! Field tables are usually generated with [`impl_record!`]; see [`Record`].

mod coerce;
mod config;
mod directive;
mod error;
mod mapper;
mod record;
mod schema;

pub use coerce::{SkipReason, coerce};
pub use config::{MapperConfig, SkipPolicy};
pub use directive::{FieldDirective, IGNORE_TO_MAP, IGNORE_TO_STRUCT};
pub use error::{MapperError, MapperResult};
pub use mapper::{Population, SkippedField, TagMapper, extract_tags, from_map, to_map};
pub use record::Record;
pub use schema::{Field, FieldKind, FieldValue, Fields, FieldsBuilder, FloatWidth, IntWidth};
