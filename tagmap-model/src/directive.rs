//! Field directives: `name[,option,...]` strings attached to record fields.

/// Option excluding a field from record → map projection.
pub const IGNORE_TO_MAP: &str = "ignoretomap";

/// Option excluding a field from map → record population.
pub const IGNORE_TO_STRUCT: &str = "ignoretostruct";

/// A borrowed view over a raw directive string.
///
/// Suppression is decided by a substring check on the whole directive, not by
/// matching split options, so `count,ignoretomap_legacy` is also hidden from
/// projection. Callers that want exact option matching use
/// [`FieldDirective::has_option`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDirective<'a> {
    raw: &'a str,
}

impl<'a> FieldDirective<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The unsplit directive as declared.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The canonical external key: everything before the first comma.
    pub fn key(&self) -> &'a str {
        self.raw.split_once(',').map_or(self.raw, |(key, _)| key)
    }

    /// Options following the key, in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.raw.split(',').skip(1)
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options().any(|o| o == option)
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether the field takes part in record → map projection.
    pub fn projects_to_map(&self) -> bool {
        !self.raw.is_empty() && !self.raw.contains(IGNORE_TO_MAP)
    }

    /// Whether the field takes part in map → record population.
    pub fn populates_record(&self) -> bool {
        !self.raw.is_empty() && !self.raw.contains(IGNORE_TO_STRUCT)
    }
}
