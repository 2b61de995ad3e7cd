use thiserror::Error;

/// Convenience result type for load, merge and export operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned by the loader and the matrix utilities.
///
/// Cell-level problems (a value that does not parse, a category lookup miss) are never reported
/// here; they become `NaN` in the output matrix.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The source has no header line, or no data rows after the header.
    #[error("empty input: {message}")]
    EmptyInput { message: String },

    /// A requested column label is not present in the header.
    #[error("column not found: '{0}'")]
    ColumnNotFound(String),

    /// Two matrices could not be merged because their row counts differ.
    #[error("shape mismatch: left has {left_rows} rows, right has {right_rows} rows")]
    ShapeMismatch { left_rows: usize, right_rows: usize },

    /// CSV export error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON snapshot (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A deserialized snapshot is internally inconsistent.
    #[error("invalid snapshot: {message}")]
    InvalidSnapshot { message: String },
}
