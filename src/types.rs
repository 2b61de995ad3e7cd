//! Core data model types for loading.
//!
//! A load turns a [`RawTable`] (header plus tokenized rows) into a [`LoadedTable`]: a dense
//! row-major [`Matrix`] plus one optional [`CategoryMap`] and one categorical flag per output
//! column.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LoadResult;
use crate::processing::merge;

/// Key of the missing-value sentinel entry in a [`CategoryMap`].
pub const MISSING_KEY: &str = "nan";
/// First key of the overflow sentinel map.
pub const OVERFLOW_KEY: &str = "Overflow";
/// Second key of the overflow sentinel map.
pub const TOO_MANY_KEY: &str = "Too Many";
/// Id stored under [`OVERFLOW_KEY`].
pub const OVERFLOW_ID: i64 = -1;
/// Id stored under [`TOO_MANY_KEY`].
pub const TOO_MANY_ID: i64 = -2;

/// Header names plus raw, already-tokenized rows.
///
/// Rows are aligned to headers by position; a row may be shorter or longer than the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    /// Header names in file order.
    pub headers: Vec<String>,
    /// Data rows in file order.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a raw table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Header name → column index. Duplicate names collide and the last one wins.
    pub fn header_index(&self) -> HashMap<&str, usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx))
            .collect()
    }
}

/// Dense row-major `f32` matrix.
///
/// Missing or unparseable cells are `f32::NAN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a matrix from row-major data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(data: Vec<f32>, rows: usize, cols: usize) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "data length {} does not match dimensions {}x{}",
            data.len(),
            rows,
            cols
        );
        Self { data, rows, cols }
    }

    /// Create a `rows` × `cols` matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major cell storage.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Cell at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Row `i` as a slice, if in bounds.
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i < self.rows {
            Some(&self.data[i * self.cols..(i + 1) * self.cols])
        } else {
            None
        }
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [f32] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Copy of column `j`, if in bounds.
    pub fn column(&self, j: usize) -> Option<Vec<f32>> {
        if j >= self.cols {
            return None;
        }
        Some((0..self.rows).map(|i| self.data[i * self.cols + j]).collect())
    }

    /// Iterate rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.rows).map(move |i| &self.data[i * self.cols..(i + 1) * self.cols])
    }
}

/// Ordered string → id mapping for one column.
///
/// Entries keep insertion order; for maps built by the encoder that is first-seen row order and
/// ids are dense from 0. The overflow sentinel ([`CategoryMap::overflow`]) is the one exception,
/// holding the two negative sentinel ids.
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    entries: Vec<(String, i64)>,
    index: HashMap<String, usize>,
}

impl CategoryMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The two-entry map signalling "too many distinct values to enumerate".
    pub fn overflow() -> Self {
        let mut map = Self::new();
        map.insert(OVERFLOW_KEY, OVERFLOW_ID);
        map.insert(TOO_MANY_KEY, TOO_MANY_ID);
        map
    }

    /// Assign the next dense id to `key` unless it is already mapped. Returns the key's id.
    pub(crate) fn insert_next(&mut self, key: &str) -> i64 {
        if let Some(id) = self.get(key) {
            return id;
        }
        let id = self.entries.len() as i64;
        self.index.insert(key.to_owned(), self.entries.len());
        self.entries.push((key.to_owned(), id));
        id
    }

    /// Insert or overwrite `key` with an explicit id. Overwriting keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, id: i64) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = id,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, id));
            }
        }
    }

    /// Id for `key`, if mapped.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.entries.iter().map(|(k, id)| (k.as_str(), *id))
    }

    /// Id of the `"nan"` sentinel, if the column had missing values.
    pub fn missing_id(&self) -> Option<i64> {
        self.get(MISSING_KEY)
    }

    /// True for the two-entry overflow sentinel.
    pub fn is_overflow(&self) -> bool {
        self.len() == 2 && self.contains_key(OVERFLOW_KEY) && self.contains_key(TOO_MANY_KEY)
    }

    /// Reverse lookup: the key holding `id`.
    pub fn label_for(&self, id: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| *v == id)
            .map(|(k, _)| k.as_str())
    }
}

impl PartialEq for CategoryMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for CategoryMap {}

impl<K: Into<String>> FromIterator<(K, i64)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, id) in iter {
            map.insert(k, id);
        }
        map
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, id) in &self.entries {
            out.serialize_entry(k, id)?;
        }
        out.end()
    }
}

impl<'de> Deserialize<'de> for CategoryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryMapVisitor;

        impl<'de> Visitor<'de> for CategoryMapVisitor {
            type Value = CategoryMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category strings to integer ids")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = CategoryMap::new();
                while let Some((key, id)) = access.next_entry::<String, i64>()? {
                    if map.contains_key(&key) {
                        return Err(de::Error::custom(format!("duplicate category key '{key}'")));
                    }
                    map.insert(key, id);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(CategoryMapVisitor)
    }
}

/// Caller-side treatment for a column, layered over the detected categorical flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Treatment {
    /// Use the flag detected at load time.
    #[default]
    Auto,
    /// Treat the column as categorical.
    Categorical,
    /// Treat the column as continuous.
    Continuous,
}

/// Result of a load: the encoded matrix plus per-column metadata.
///
/// `labels`, `mappings` and `categorical` all have one entry per matrix column, in output order.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    /// Selected header names in output order.
    pub labels: Vec<String>,
    /// Encoded cells.
    pub matrix: Matrix,
    /// Per column: the category map, or `None` when the column has no applicable mapping.
    pub mappings: Vec<Option<CategoryMap>>,
    /// Per column: `true` when the column was classified categorical.
    pub categorical: Vec<bool>,
}

impl LoadedTable {
    /// Assemble a loaded table.
    ///
    /// # Panics
    ///
    /// Panics if `labels`, `mappings` or `categorical` do not have one entry per matrix column.
    pub fn new(
        labels: Vec<String>,
        matrix: Matrix,
        mappings: Vec<Option<CategoryMap>>,
        categorical: Vec<bool>,
    ) -> Self {
        let cols = matrix.cols();
        assert!(
            labels.len() == cols && mappings.len() == cols && categorical.len() == cols,
            "column metadata lengths ({}, {}, {}) do not match matrix columns {}",
            labels.len(),
            mappings.len(),
            categorical.len(),
            cols
        );
        Self {
            labels,
            matrix,
            mappings,
            categorical,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    pub fn row_count(&self) -> usize {
        self.matrix.rows()
    }

    pub fn column_count(&self) -> usize {
        self.matrix.cols()
    }

    /// Split into `(matrix, mappings, categorical flags)`.
    pub fn into_parts(self) -> (Matrix, Vec<Option<CategoryMap>>, Vec<bool>) {
        (self.matrix, self.mappings, self.categorical)
    }

    /// Output column index for `label`. With duplicated labels the last column wins.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.labels.iter().rposition(|l| l == label)
    }

    pub fn mapping_for(&self, label: &str) -> Option<&CategoryMap> {
        self.column_index(label)
            .and_then(|j| self.mappings.get(j))
            .and_then(Option::as_ref)
    }

    pub fn is_categorical_label(&self, label: &str) -> Option<bool> {
        self.column_index(label)
            .and_then(|j| self.categorical.get(j).copied())
    }

    /// Label → mapping. Duplicate labels: last wins.
    pub fn mappings_by_label(&self) -> BTreeMap<String, Option<CategoryMap>> {
        self.labels
            .iter()
            .cloned()
            .zip(self.mappings.iter().cloned())
            .collect()
    }

    /// Label → categorical flag. Duplicate labels: last wins.
    pub fn categorical_by_label(&self) -> BTreeMap<String, bool> {
        self.labels
            .iter()
            .cloned()
            .zip(self.categorical.iter().copied())
            .collect()
    }

    /// Sorted distinct non-NaN values of column `j`.
    pub fn distinct_codes(&self, j: usize) -> Option<Vec<f32>> {
        let mut values: Vec<f32> = self
            .matrix
            .column(j)?
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();
        Some(values)
    }

    /// Resolve whether column `j` should be treated as categorical under `treatment`.
    ///
    /// Forcing [`Treatment::Categorical`] on a numeric column only takes effect when the column
    /// carries a usable (non-overflow) shadow mapping. Out-of-range columns resolve to `false`.
    pub fn effective_categorical(&self, j: usize, treatment: Treatment) -> bool {
        let Some(&detected) = self.categorical.get(j) else {
            return false;
        };
        match treatment {
            Treatment::Auto => detected,
            Treatment::Continuous => false,
            Treatment::Categorical => {
                detected
                    || self
                        .mappings
                        .get(j)
                        .and_then(Option::as_ref)
                        .is_some_and(|m| !m.is_empty() && !m.is_overflow())
            }
        }
    }

    /// Horizontally merge two tables: matrices via [`merge`], metadata concatenated.
    pub fn merge(&self, other: &LoadedTable) -> LoadResult<LoadedTable> {
        let matrix = merge(&self.matrix, &other.matrix)?;
        let labels = self.labels.iter().chain(&other.labels).cloned().collect();
        let mappings = self.mappings.iter().chain(&other.mappings).cloned().collect();
        let categorical = self
            .categorical
            .iter()
            .chain(&other.categorical)
            .copied()
            .collect();
        Ok(LoadedTable {
            labels,
            matrix,
            mappings,
            categorical,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_table() -> LoadedTable {
        let matrix = Matrix::from_vec(vec![0.0, 1.5, 1.0, f32::NAN, 0.0, 2.5], 3, 2);
        let colors: CategoryMap = [("red", 0), ("blue", 1)].into_iter().collect();
        let scores: CategoryMap = [("1.5", 0), ("2.5", 1), ("nan", 2)].into_iter().collect();
        LoadedTable::new(
            vec!["color".to_string(), "score".to_string()],
            matrix,
            vec![Some(colors), Some(scores)],
            vec![true, false],
        )
    }

    #[test]
    fn header_index_last_duplicate_wins() {
        let raw = RawTable::new(
            vec!["a".to_string(), "b".to_string(), "a".to_string()],
            vec![],
        );
        let idx = raw.header_index();
        assert_eq!(idx["a"], 2);
        assert_eq!(idx["b"], 1);
    }

    #[test]
    fn matrix_accessors_respect_bounds() {
        let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(m.row(2), None);
        assert_eq!(m.column(2), Some(vec![3.0, 6.0]));
        assert_eq!(m.column(3), None);
        assert_eq!(m.get(1, 0), Some(4.0));
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m.iter_rows().count(), 2);
    }

    #[test]
    #[should_panic(expected = "does not match dimensions")]
    fn matrix_from_vec_rejects_wrong_length() {
        let _ = Matrix::from_vec(vec![1.0, 2.0, 3.0], 2, 2);
    }

    #[test]
    fn zero_column_matrix_still_has_rows() {
        let m = Matrix::filled(3, 0, f32::NAN);
        assert_eq!(m.shape(), (3, 0));
        assert_eq!(m.row(2), Some(&[][..]));
        assert_eq!(m.iter_rows().count(), 3);
    }

    #[test]
    fn category_map_keeps_insertion_order_and_ids() {
        let mut map = CategoryMap::new();
        assert_eq!(map.insert_next("b"), 0);
        assert_eq!(map.insert_next("a"), 1);
        assert_eq!(map.insert_next("b"), 0);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("b", 0), ("a", 1)]);
        assert_eq!(map.label_for(1), Some("a"));
        assert_eq!(map.missing_id(), None);
        assert!(!map.is_overflow());
    }

    #[test]
    fn overflow_map_has_exactly_the_two_sentinels() {
        let map = CategoryMap::overflow();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(OVERFLOW_KEY), Some(-1));
        assert_eq!(map.get(TOO_MANY_KEY), Some(-2));
        assert!(map.is_overflow());
    }

    #[test]
    fn category_map_json_preserves_entry_order() {
        let map: CategoryMap = [("zeta", 0), ("alpha", 1), ("nan", 2)].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zeta":0,"alpha":1,"nan":2}"#);

        let back: CategoryMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn category_map_json_rejects_duplicate_keys() {
        let err = serde_json::from_str::<CategoryMap>(r#"{"a":0,"a":1}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate category key 'a'"));
    }

    #[test]
    fn label_lookups_and_distinct_codes() {
        let t = color_table();
        assert_eq!(t.column_index("score"), Some(1));
        assert_eq!(t.is_categorical_label("color"), Some(true));
        assert_eq!(t.is_categorical_label("missing"), None);
        assert_eq!(t.mapping_for("color").and_then(|m| m.get("blue")), Some(1));
        assert_eq!(t.categorical_by_label()["score"], false);
        assert_eq!(t.distinct_codes(0), Some(vec![0.0, 1.0]));
        assert_eq!(t.distinct_codes(1), Some(vec![1.5, 2.5]));
        assert_eq!(t.distinct_codes(2), None);
    }

    #[test]
    fn treatment_override_resolution() {
        let mut t = color_table();
        assert!(t.effective_categorical(0, Treatment::Auto));
        assert!(!t.effective_categorical(0, Treatment::Continuous));
        assert!(!t.effective_categorical(1, Treatment::Auto));
        assert!(t.effective_categorical(1, Treatment::Categorical));

        t.mappings[1] = Some(CategoryMap::overflow());
        assert!(!t.effective_categorical(1, Treatment::Categorical));
        t.mappings[1] = None;
        assert!(!t.effective_categorical(1, Treatment::Categorical));
        assert!(!t.effective_categorical(5, Treatment::Categorical));
    }

    #[test]
    fn table_merge_concatenates_metadata() {
        let left = color_table();
        let right = LoadedTable::new(
            vec!["x".to_string()],
            Matrix::from_vec(vec![7.0, 8.0, 9.0], 3, 1),
            vec![None],
            vec![false],
        );
        let merged = left.merge(&right).unwrap();
        assert_eq!(merged.shape(), (3, 3));
        assert_eq!(merged.labels, vec!["color", "score", "x"]);
        assert_eq!(merged.categorical, vec![true, false, false]);
        assert_eq!(merged.mappings[2], None);
        assert_eq!(merged.matrix.row(2), Some(&[0.0, 2.5, 9.0][..]));
    }
}
