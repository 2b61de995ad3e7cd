//! Polars interop (feature-gated behind `polars`).

use polars::prelude::*;

use crate::types::LoadedTable;

impl LoadedTable {
    /// Build a Polars `DataFrame` with one `f32` column per label.
    ///
    /// Category ids stay encoded; use [`LoadedTable::mappings`] to decode them. Fails if labels
    /// are duplicated, since Polars requires unique column names.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns = self
            .labels
            .iter()
            .enumerate()
            .map(|(j, label)| {
                let values = self.matrix.column(j).unwrap_or_default();
                Column::new(PlSmallStr::from(label.as_str()), values)
            })
            .collect::<Vec<_>>();
        DataFrame::new(self.row_count(), columns)
    }
}
