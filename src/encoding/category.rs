//! Per-column category encoding.
//!
//! Categorical columns get their canonical string → id map here. Numeric columns get a *shadow*
//! map of their distinct numeric literals so a caller can later reinterpret them as categories;
//! it does not change how the numeric column is filled.
//!
//! Keying differs between the two branches. Categorical maps are keyed by the original cell text
//! (quotes included) and the filler looks them up the same way. Shadow maps are keyed by the
//! quote-stripped literal.

use crate::types::{CategoryMap, MISSING_KEY};

use super::value::{parse_strict, strip_quotes};

/// Default ceiling on distinct values recorded in a numeric shadow map.
pub const DEFAULT_MAX_SHADOW_CATEGORIES: usize = 1000;

/// Encode a categorical column.
///
/// Non-empty values get dense ids in first-seen order, keyed by their original text. Values that
/// are empty once quotes are stripped are skipped; if there was at least one, `"nan"` gets the
/// next id.
pub fn encode_categorical<'a, I>(values: I) -> CategoryMap
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map = CategoryMap::new();
    let mut has_missing = false;
    for orig in values {
        if strip_quotes(orig).is_empty() {
            has_missing = true;
            continue;
        }
        map.insert_next(orig);
    }
    if has_missing {
        map.insert_next(MISSING_KEY);
    }
    map
}

/// Outcome of building a numeric column's shadow map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShadowMapping {
    /// No non-empty numeric values were seen.
    Empty,
    /// Distinct literals in first-seen order, plus `"nan"` when the column has gaps.
    Mapped(CategoryMap),
    /// More distinct literals than the ceiling allows.
    Overflow,
}

impl ShadowMapping {
    /// The mapping to emit for this column: `None` for [`Self::Empty`], the two-entry sentinel
    /// for [`Self::Overflow`].
    pub fn into_mapping(self) -> Option<CategoryMap> {
        match self {
            Self::Empty => None,
            Self::Mapped(map) => Some(map),
            Self::Overflow => Some(CategoryMap::overflow()),
        }
    }
}

/// Build the shadow map for a numeric column.
///
/// Values are quote-stripped; empties are recorded as missing, unparseable values are skipped.
/// Once a new distinct literal would take the count past `max_distinct`, the scan stops and the
/// result is [`ShadowMapping::Overflow`].
pub fn encode_numeric_shadow<'a, I>(values: I, max_distinct: usize) -> ShadowMapping
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map = CategoryMap::new();
    let mut has_missing = false;
    for orig in values {
        let s = strip_quotes(orig);
        if s.is_empty() {
            has_missing = true;
            continue;
        }
        if parse_strict(s).is_none() || map.contains_key(s) {
            continue;
        }
        if map.len() >= max_distinct {
            return ShadowMapping::Overflow;
        }
        map.insert_next(s);
    }

    if map.is_empty() {
        return ShadowMapping::Empty;
    }
    if has_missing {
        map.insert_next(MISSING_KEY);
    }
    ShadowMapping::Mapped(map)
}
