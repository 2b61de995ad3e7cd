//! Column-typing and encoding engine.
//!
//! The engine works on an already-tokenized [`RawTable`]:
//!
//! 1. [`select_columns`] resolves requested labels to column indices
//! 2. [`first_non_numeric`] classifies each selected column as numeric or categorical
//! 3. [`encode_categorical`] / [`encode_numeric_shadow`] build one category map per column
//! 4. [`fill_matrix`] writes the dense `f32` matrix
//!
//! [`encode_table`] runs all four steps and reports progress as [`LoadEvent`]s.

pub mod category;
pub mod classify;
pub mod fill;
pub mod projection;
pub mod value;

pub use category::{
    encode_categorical, encode_numeric_shadow, ShadowMapping, DEFAULT_MAX_SHADOW_CATEGORIES,
};
pub use classify::{first_non_numeric, is_categorical};
pub use fill::{encode_cell, fill_matrix};
pub use projection::{select_columns, ColumnSelection};
pub use value::{parse_strict, strip_quotes};

use crate::error::{LoadError, LoadResult};
use crate::ingestion::LoadEvent;
use crate::types::{LoadedTable, RawTable};

/// Run the full engine over `raw`.
///
/// `requested` selects and orders output columns (empty = all columns). Numeric columns get a
/// shadow map capped at `max_shadow_categories` distinct literals. `emit` is called at each
/// checkpoint and never affects the result.
///
/// Fails with [`LoadError::ColumnNotFound`] for an unknown label, and with
/// [`LoadError::EmptyInput`] when `raw` has no data rows.
pub fn encode_table<S, F>(
    raw: &RawTable,
    requested: &[S],
    max_shadow_categories: usize,
    mut emit: F,
) -> LoadResult<LoadedTable>
where
    S: AsRef<str>,
    F: FnMut(LoadEvent),
{
    let selection = select_columns(raw, requested)?;
    let labels = selection.labels(&raw.headers);
    emit(LoadEvent::SelectionResolved {
        indices: selection.indices().to_vec(),
        labels: labels.clone(),
    });

    if raw.rows.is_empty() {
        return Err(LoadError::EmptyInput {
            message: "no data rows after the header".to_string(),
        });
    }

    let rows = selection.project_rows(&raw.rows);
    let cols = selection.len();

    let mut categorical = Vec::with_capacity(cols);
    for (j, label) in labels.iter().enumerate() {
        let offending = first_non_numeric(column(&rows, j));
        emit(LoadEvent::ColumnClassified {
            column: j,
            label: label.clone(),
            categorical: offending.is_some(),
            first_non_numeric: offending.map(str::to_owned),
        });
        categorical.push(offending.is_some());
    }

    let mut mappings = Vec::with_capacity(cols);
    for (j, label) in labels.iter().enumerate() {
        if categorical[j] {
            mappings.push(Some(encode_categorical(column(&rows, j))));
            continue;
        }

        let shadow = encode_numeric_shadow(column(&rows, j), max_shadow_categories);
        match &shadow {
            ShadowMapping::Mapped(map) => emit(LoadEvent::ShadowMappingBuilt {
                column: j,
                label: label.clone(),
                distinct: map.len() - usize::from(map.missing_id().is_some()),
            }),
            ShadowMapping::Overflow => emit(LoadEvent::CardinalityOverflow {
                column: j,
                label: label.clone(),
                limit: max_shadow_categories,
            }),
            ShadowMapping::Empty => {}
        }
        mappings.push(shadow.into_mapping());
    }

    let matrix = fill_matrix(&rows, &categorical, &mappings);
    Ok(LoadedTable::new(labels, matrix, mappings, categorical))
}

fn column<'a>(rows: &'a [Vec<String>], j: usize) -> impl Iterator<Item = &'a str> + 'a {
    rows.iter().map(move |row| row.get(j).map_or("", String::as_str))
}
