//! Matrix filling from projected rows, classification flags and category maps.

use crate::types::{CategoryMap, Matrix, MISSING_KEY};

use super::value::{parse_strict, strip_quotes};

/// Encode one cell.
///
/// Categorical cells resolve through `mapping` (empty → `"nan"` id, otherwise the original text);
/// numeric cells are parsed directly. Anything that does not resolve is `NaN`.
pub fn encode_cell(orig: &str, categorical: bool, mapping: Option<&CategoryMap>) -> f32 {
    let stripped = strip_quotes(orig);
    if categorical {
        let key = if stripped.is_empty() { MISSING_KEY } else { orig };
        mapping
            .and_then(|m| m.get(key))
            .map_or(f32::NAN, |id| id as f32)
    } else if stripped.is_empty() {
        f32::NAN
    } else {
        parse_strict(stripped).unwrap_or(f32::NAN)
    }
}

/// Fill a `rows.len()` × `categorical.len()` matrix.
///
/// `rows` are projected rows (one cell per output column). Every cell is assigned; missing
/// cells in a short row are treated as empty.
pub fn fill_matrix(
    rows: &[Vec<String>],
    categorical: &[bool],
    mappings: &[Option<CategoryMap>],
) -> Matrix {
    let cols = categorical.len();
    let mut matrix = Matrix::filled(rows.len(), cols, f32::NAN);
    for (i, row) in rows.iter().enumerate() {
        let out = matrix.row_mut(i);
        for (j, cell) in out.iter_mut().enumerate() {
            let orig = row.get(j).map_or("", String::as_str);
            let mapping = mappings.get(j).and_then(Option::as_ref);
            *cell = encode_cell(orig, categorical[j], mapping);
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn numeric_cells_parse_or_become_nan() {
        assert_eq!(encode_cell("2.5", false, None), 2.5);
        assert_eq!(encode_cell("\"7\"", false, None), 7.0);
        assert!(encode_cell("", false, None).is_nan());
        assert!(encode_cell("oops", false, None).is_nan());
    }

    #[test]
    fn numeric_cells_ignore_the_shadow_mapping() {
        let shadow: CategoryMap = [("5", 0), ("nan", 1)].into_iter().collect();
        assert_eq!(encode_cell("5", false, Some(&shadow)), 5.0);
        assert!(encode_cell("", false, Some(&shadow)).is_nan());
    }

    #[test]
    fn categorical_cells_use_ids() {
        let map: CategoryMap = [("red", 0), ("blue", 1), ("nan", 2)].into_iter().collect();
        assert_eq!(encode_cell("blue", true, Some(&map)), 1.0);
        assert_eq!(encode_cell("", true, Some(&map)), 2.0);
        assert_eq!(encode_cell("\"\"", true, Some(&map)), 2.0);
        assert!(encode_cell("green", true, Some(&map)).is_nan());
    }

    #[test]
    fn categorical_missing_without_sentinel_is_nan() {
        let map: CategoryMap = [("red", 0)].into_iter().collect();
        assert!(encode_cell("", true, Some(&map)).is_nan());
        assert!(encode_cell("red", true, None).is_nan());
    }

    #[test]
    fn categorical_lookup_uses_unstripped_text() {
        let map: CategoryMap = [("a", 0)].into_iter().collect();
        assert!(encode_cell("\"a\"", true, Some(&map)).is_nan());
        let quoted: CategoryMap = [("\"a\"", 0)].into_iter().collect();
        assert_eq!(encode_cell("\"a\"", true, Some(&quoted)), 0.0);
    }

    #[test]
    fn fill_assigns_every_cell() {
        let data = rows(&[&["1", "red"], &["x", ""], &["3"]]);
        let map: CategoryMap = [("red", 0)].into_iter().collect();
        let m = fill_matrix(&data, &[false, true], &[None, Some(map)]);
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.get(0, 0), Some(1.0));
        assert_eq!(m.get(0, 1), Some(0.0));
        assert!(m.get(1, 0).unwrap().is_nan());
        assert!(m.get(1, 1).unwrap().is_nan());
        assert_eq!(m.get(2, 0), Some(3.0));
        assert!(m.get(2, 1).unwrap().is_nan());
    }
}
