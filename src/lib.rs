//! `rust-csv-matrix` loads a comma-separated table into a dense `f32` matrix, deciding per
//! column whether values are numeric or categorical.
//!
//! The primary entrypoint is [`ingestion::load_from_path`], which returns a
//! [`types::LoadedTable`]: the [`types::Matrix`], one optional [`types::CategoryMap`] per column and
//! one categorical flag per column.
//!
//! ## How columns are typed
//!
//! - A column is **categorical** if any non-empty value fails a strict float parse; otherwise it is
//!   **numeric** (an all-empty column is numeric).
//! - Categorical cells hold their category id (first-seen order from 0). Empty cells use the id of
//!   the `"nan"` entry, which exists only when the column has empty cells.
//! - Numeric cells hold the parsed value; empty or unparseable cells are `NaN`. Numeric columns also
//!   carry a *shadow* map of their distinct literals, replaced by the two-entry overflow sentinel
//!   (`"Overflow"`, `"Too Many"`) past [`ingestion::LoadOptions::max_shadow_categories`].
//! - Bad cells never fail a load; they become `NaN`.
//!
//! ## Quick example
//!
//! ```rust
//! use rust_csv_matrix::ingestion::{load_from_str, LoadOptions};
//!
//! let csv = "id,color,score\n1,red,3.5\n2,blue,\n3,red,4.0\n";
//! let table = load_from_str(csv, &LoadOptions::default()).unwrap();
//!
//! assert_eq!(table.shape(), (3, 3));
//! assert_eq!(table.categorical, vec![false, true, false]);
//! assert_eq!(table.matrix.column(1), Some(vec![0.0, 1.0, 0.0]));
//! assert!(table.matrix.get(1, 2).unwrap().is_nan());
//! ```
//!
//! ## Selecting columns
//!
//! ```rust
//! use rust_csv_matrix::ingestion::{load_from_str, LoadOptions};
//! use rust_csv_matrix::LoadError;
//!
//! let csv = "id,color,score\n1,red,3.5\n";
//! let table = load_from_str(csv, &LoadOptions::with_columns(["score", "id"])).unwrap();
//! assert_eq!(table.labels, vec!["score", "id"]);
//!
//! let err = load_from_str(csv, &LoadOptions::with_columns(["weight"])).unwrap_err();
//! assert!(matches!(err, LoadError::ColumnNotFound(label) if label == "weight"));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: load entrypoints, tokenizer, options and observers
//! - [`encoding`]: the column-typing and encoding engine
//! - [`processing`]: matrix merge and shape utilities
//! - [`export`]: CSV export and JSON snapshots
//! - [`types`]: matrix, category map and table types
//! - [`error`]: error types

#[cfg(feature = "polars")]
mod dataframe;
pub mod encoding;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{LoadError, LoadResult};
