//! Line tokenizer for comma-separated text.

use crate::encoding::value::is_c_space;

/// Split one line into trimmed fields.
///
/// Rules:
///
/// - `,` separates fields, except inside a `"`-delimited span.
/// - Every `"` toggles the in-quotes state and is dropped; there are no escaped quotes.
/// - An unterminated quote runs to the end of the line.
/// - Each field is trimmed of surrounding whitespace.
/// - An empty line yields a single empty field.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(trim_field(&field).to_owned());
                field.clear();
            }
            _ => field.push(c),
        }
    }
    fields.push(trim_field(&field).to_owned());
    fields
}

fn trim_field(field: &str) -> &str {
    field.trim_matches(is_c_space)
}
