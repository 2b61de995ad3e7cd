//! JSON snapshots of a loaded table.
//!
//! A snapshot stores the matrix, labels, category maps and categorical flags together, so a
//! load can be cached and restored without re-reading the source. `NaN` cells are stored as
//! `null`; infinities, which JSON numbers cannot carry, are stored as `"inf"` and `"-inf"`.

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};
use crate::types::{CategoryMap, LoadedTable, Matrix};

/// One matrix cell in a snapshot. `NaN` is represented by the surrounding `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotCell {
    Finite(f32),
    Infinite(Infinity),
}

/// Sign of an infinite cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Infinity {
    #[serde(rename = "inf")]
    Positive,
    #[serde(rename = "-inf")]
    Negative,
}

impl SnapshotCell {
    /// `None` for `NaN`.
    pub fn from_value(v: f32) -> Option<Self> {
        if v.is_nan() {
            None
        } else if v.is_infinite() {
            Some(Self::Infinite(if v > 0.0 { Infinity::Positive } else { Infinity::Negative }))
        } else {
            Some(Self::Finite(v))
        }
    }

    pub fn value(self) -> f32 {
        match self {
            Self::Finite(v) => v,
            Self::Infinite(Infinity::Positive) => f32::INFINITY,
            Self::Infinite(Infinity::Negative) => f32::NEG_INFINITY,
        }
    }
}

/// Serializable form of a [`LoadedTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub labels: Vec<String>,
    /// Row-major cells; `None` for `NaN`.
    pub data: Vec<Option<SnapshotCell>>,
    pub mappings: Vec<Option<CategoryMap>>,
    pub categorical: Vec<bool>,
}

impl From<&LoadedTable> for TableSnapshot {
    fn from(table: &LoadedTable) -> Self {
        let (rows, cols) = table.shape();
        Self {
            rows,
            cols,
            labels: table.labels.clone(),
            data: table
                .matrix
                .as_slice()
                .iter()
                .map(|v| SnapshotCell::from_value(*v))
                .collect(),
            mappings: table.mappings.clone(),
            categorical: table.categorical.clone(),
        }
    }
}

impl TryFrom<TableSnapshot> for LoadedTable {
    type Error = LoadError;

    fn try_from(snap: TableSnapshot) -> LoadResult<Self> {
        let expected = snap.rows.checked_mul(snap.cols).ok_or_else(|| LoadError::InvalidSnapshot {
            message: format!("shape {}x{} overflows", snap.rows, snap.cols),
        })?;
        if snap.data.len() != expected {
            return Err(LoadError::InvalidSnapshot {
                message: format!(
                    "data has {} cells, expected {}x{}={expected}",
                    snap.data.len(),
                    snap.rows,
                    snap.cols
                ),
            });
        }
        for (name, len) in [
            ("labels", snap.labels.len()),
            ("mappings", snap.mappings.len()),
            ("categorical", snap.categorical.len()),
        ] {
            if len != snap.cols {
                return Err(LoadError::InvalidSnapshot {
                    message: format!("{name} has {len} entries, expected {}", snap.cols),
                });
            }
        }

        let data = snap
            .data
            .into_iter()
            .map(|cell| cell.map_or(f32::NAN, SnapshotCell::value))
            .collect();
        Ok(LoadedTable::new(
            snap.labels,
            Matrix::from_vec(data, snap.rows, snap.cols),
            snap.mappings,
            snap.categorical,
        ))
    }
}

/// Serialize `table` to a compact JSON string.
pub fn to_json_string(table: &LoadedTable) -> LoadResult<String> {
    Ok(serde_json::to_string(&TableSnapshot::from(table))?)
}

/// Restore a table from [`to_json_string`] output.
pub fn from_json_str(text: &str) -> LoadResult<LoadedTable> {
    let snap: TableSnapshot = serde_json::from_str(text)?;
    LoadedTable::try_from(snap)
}
