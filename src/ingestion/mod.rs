//! Load entrypoints and the text front end.
//!
//! Most callers should use [`load_from_path`] (from [`loader`]) which:
//!
//! - reads and tokenizes the file ([`source`], [`tokenize`])
//! - runs the [`crate::encoding`] engine into a [`crate::types::LoadedTable`]
//! - optionally reports progress and success/failure/alerts to a [`LoadObserver`]

pub mod loader;
pub mod observability;
pub mod source;
pub mod tokenize;

pub use loader::{load_from_path, load_from_reader, load_from_str, load_table, LoadOptions, LoadRequest};
pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadEvent, LoadObserver, LoadSeverity, LoadSource, LoadStats,
    StdErrObserver,
};
pub use source::{read_raw_table, read_raw_table_from_path};
pub use tokenize::split_fields;
