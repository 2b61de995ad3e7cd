//! Writing loaded tables back out.
//!
//! - [`csv`]: the encoded matrix as CSV (labels as header, `NaN` as empty)
//! - [`json`]: full snapshots (matrix, labels, category maps, flags) for caching

pub mod csv;
pub mod json;

pub use self::csv::{write_table_csv, write_table_csv_to_path};
pub use self::json::{from_json_str, to_json_string, Infinity, SnapshotCell, TableSnapshot};
