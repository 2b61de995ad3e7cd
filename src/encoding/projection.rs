//! Column selection: which raw columns make it into the output, and in what order.

use crate::error::{LoadError, LoadResult};
use crate::types::RawTable;

/// Ordered column indices into a [`RawTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    indices: Vec<usize>,
}

impl ColumnSelection {
    /// Select every column, in header order.
    pub fn all(column_count: usize) -> Self {
        Self {
            indices: (0..column_count).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Header names of the selected columns, in output order.
    pub fn labels(&self, headers: &[String]) -> Vec<String> {
        self.indices
            .iter()
            .map(|&idx| headers.get(idx).cloned().unwrap_or_default())
            .collect()
    }

    /// Project every raw row onto the selection. Cells past the end of a short row are empty.
    pub fn project_rows(&self, rows: &[Vec<String>]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| {
                self.indices
                    .iter()
                    .map(|&idx| row.get(idx).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// Resolve requested column labels against the table header.
///
/// - No requested labels selects every column.
/// - Otherwise labels are resolved in request order, so columns may be reordered or repeated.
/// - An unknown label fails with [`LoadError::ColumnNotFound`].
pub fn select_columns<S: AsRef<str>>(table: &RawTable, requested: &[S]) -> LoadResult<ColumnSelection> {
    if requested.is_empty() {
        return Ok(ColumnSelection::all(table.column_count()));
    }

    let header_index = table.header_index();
    let mut indices = Vec::with_capacity(requested.len());
    for label in requested {
        let label = label.as_ref();
        match header_index.get(label) {
            Some(&idx) => indices.push(idx),
            None => return Err(LoadError::ColumnNotFound(label.to_owned())),
        }
    }
    Ok(ColumnSelection { indices })
}
