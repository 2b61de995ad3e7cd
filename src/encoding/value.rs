//! Cell-level helpers shared by the classifier, encoder and filler.

/// Remove one layer of surrounding double quotes, if present.
///
/// A lone `"` is left untouched.
pub fn strip_quotes(raw: &str) -> &str {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

/// Strict `f32` parse.
///
/// The whole token must parse; surrounding whitespace is tolerated. Values outside the `f32`
/// range are rejected: a finite literal that overflows to infinity, or a non-zero literal that
/// underflows to zero or a subnormal. Literal `inf`/`infinity`/`nan` are accepted.
pub fn parse_strict(text: &str) -> Option<f32> {
    let token = text.trim_matches(is_c_space);
    if token.is_empty() {
        return None;
    }
    let value: f32 = token.parse().ok()?;
    if value.is_infinite() && !spells_infinity(token) {
        return None;
    }
    if value.is_finite() && !value.is_normal() && has_nonzero_mantissa(token) {
        return None;
    }
    Some(value)
}

/// ASCII whitespace as classified by C `isspace` (includes vertical tab).
pub(crate) fn is_c_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn spells_infinity(token: &str) -> bool {
    token.to_ascii_lowercase().contains("inf")
}

fn has_nonzero_mantissa(token: &str) -> bool {
    token
        .split(['e', 'E'])
        .next()
        .unwrap_or(token)
        .bytes()
        .any(|b| matches!(b, b'1'..=b'9'))
}
