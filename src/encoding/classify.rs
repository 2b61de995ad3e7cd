//! Numeric vs categorical column classification.

use super::value::{parse_strict, strip_quotes};

/// First value (quotes stripped) that is non-empty and fails a strict float parse.
///
/// Scanning stops at that value. `None` means the column is numeric; an entirely empty column is
/// numeric too, since nothing contradicts it.
pub fn first_non_numeric<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(strip_quotes)
        .filter(|s| !s.is_empty())
        .find(|s| parse_strict(s).is_none())
}

/// `true` when at least one non-empty value fails a strict float parse.
pub fn is_categorical<'a, I>(values: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    first_non_numeric(values).is_some()
}
