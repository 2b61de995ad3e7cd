//! Load entrypoints.
//!
//! Most callers should use [`load_from_path`], which reads a comma-separated file into a
//! [`crate::types::LoadedTable`].
//!
//! - [`LoadOptions::columns`] selects and orders the output columns (empty = all).
//! - [`LoadOptions::max_shadow_categories`] caps the shadow mapping of numeric columns.
//! - If a [`LoadObserver`] is provided, checkpoints and success/failure/alerts are reported to it.

use std::fmt;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::encoding::{encode_table, DEFAULT_MAX_SHADOW_CATEGORIES};
use crate::error::{LoadError, LoadResult};
use crate::types::{LoadedTable, RawTable};

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadSource, LoadStats};
use super::source::{read_raw_table, read_raw_table_from_path};

/// Options controlling a load.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Requested column labels, in output order. Empty selects every column.
    pub columns: Vec<String>,
    /// Most distinct literals a numeric column's shadow mapping may hold before it is replaced
    /// by the overflow sentinel.
    pub max_shadow_categories: usize,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl LoadOptions {
    /// Default options selecting `columns`.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("columns", &self.columns)
            .field("max_shadow_categories", &self.max_shadow_categories)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            max_shadow_categories: DEFAULT_MAX_SHADOW_CATEGORIES,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a comma-separated file.
///
/// When an observer is configured, this function reports:
///
/// - `on_event` at each checkpoint (selection, classification, shadow mapping, overflow)
/// - `on_success` on success, with shape stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use rust_csv_matrix::ingestion::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), rust_csv_matrix::LoadError> {
/// let table = load_from_path("cells.csv", &LoadOptions::with_columns(["cluster", "depth"]))?;
/// println!("shape={:?} categorical={:?}", table.shape(), table.categorical);
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use rust_csv_matrix::ingestion::{load_from_path, LoadOptions, LoadSeverity, StdErrObserver};
///
/// let opts = LoadOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     alert_at_or_above: LoadSeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are treated as Critical and will trigger `on_alert` at this threshold.
/// let _err = load_from_path("does_not_exist.csv", &opts).unwrap_err();
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<LoadedTable> {
    let path = path.as_ref();
    let ctx = LoadContext {
        source: LoadSource::Path(path.to_path_buf()),
    };
    let result = read_raw_table_from_path(path).and_then(|raw| encode_observed(&ctx, &raw, options));
    report(&ctx, options, result)
}

/// Load comma-separated text from a buffered reader.
pub fn load_from_reader<R: BufRead>(reader: R, options: &LoadOptions) -> LoadResult<LoadedTable> {
    let ctx = LoadContext {
        source: LoadSource::Memory,
    };
    let result = read_raw_table(reader).and_then(|raw| encode_observed(&ctx, &raw, options));
    report(&ctx, options, result)
}

/// Load comma-separated text held in memory.
///
/// ```
/// use rust_csv_matrix::ingestion::{load_from_str, LoadOptions};
///
/// let table = load_from_str("id,color\n1,red\n2,blue\n", &LoadOptions::default()).unwrap();
/// assert_eq!(table.shape(), (2, 2));
/// assert_eq!(table.categorical, vec![false, true]);
/// assert_eq!(table.mapping_for("color").and_then(|m| m.get("blue")), Some(1));
/// ```
pub fn load_from_str(text: &str, options: &LoadOptions) -> LoadResult<LoadedTable> {
    load_from_reader(text.as_bytes(), options)
}

/// Run the engine over a table whose rows were tokenized elsewhere.
pub fn load_table(raw: &RawTable, options: &LoadOptions) -> LoadResult<LoadedTable> {
    let ctx = LoadContext {
        source: LoadSource::Memory,
    };
    let result = encode_observed(&ctx, raw, options);
    report(&ctx, options, result)
}

fn encode_observed(ctx: &LoadContext, raw: &RawTable, options: &LoadOptions) -> LoadResult<LoadedTable> {
    encode_table(raw, &options.columns, options.max_shadow_categories, |event| {
        if let Some(obs) = options.observer.as_ref() {
            obs.on_event(ctx, &event);
        }
    })
}

fn report(ctx: &LoadContext, options: &LoadOptions, result: LoadResult<LoadedTable>) -> LoadResult<LoadedTable> {
    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(
                ctx,
                LoadStats {
                    rows: table.row_count(),
                    cols: table.column_count(),
                    categorical_columns: table.categorical.iter().filter(|&&c| c).count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::Io(_) => LoadSeverity::Critical,
        LoadError::EmptyInput { .. }
        | LoadError::ColumnNotFound(_)
        | LoadError::ShapeMismatch { .. }
        | LoadError::Csv(_)
        | LoadError::Json(_)
        | LoadError::InvalidSnapshot { .. } => LoadSeverity::Error,
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue load work in a job system.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling the load.
    pub options: LoadOptions,
}

impl LoadRequest {
    /// Execute the request by calling [`load_from_path`].
    pub fn run(&self) -> LoadResult<LoadedTable> {
        load_from_path(&self.path, &self.options)
    }
}
