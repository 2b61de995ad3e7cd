use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::LoadError;

/// Severity classification used for observer callbacks and alerting thresholds.
///
/// Failed loads are only ever classified [`Error`](Self::Error) or
/// [`Critical`](Self::Critical); `Info` and `Warning` exist as threshold values for
/// `LoadOptions::alert_at_or_above`, to alert on every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Threshold only: alert on every failure.
    Info,
    /// Threshold only.
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O failures).
    Critical,
}

/// Where a load reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// A file path.
    Path(PathBuf),
    /// An in-memory reader or string.
    Memory,
}

impl fmt::Display for LoadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Memory => f.write_str("<memory>"),
        }
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub source: LoadSource,
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Matrix rows (non-empty data lines).
    pub rows: usize,
    /// Matrix columns (selected columns).
    pub cols: usize,
    /// How many of the columns were classified categorical.
    pub categorical_columns: usize,
}

/// Checkpoints reported while a load runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    /// Requested labels were resolved to raw column indices.
    SelectionResolved { indices: Vec<usize>, labels: Vec<String> },
    /// One output column was classified.
    ColumnClassified {
        column: usize,
        label: String,
        categorical: bool,
        /// The value that made the column categorical, quotes stripped.
        first_non_numeric: Option<String>,
    },
    /// A numeric column got a shadow mapping of `distinct` literals.
    ShadowMappingBuilt { column: usize, label: String, distinct: usize },
    /// A numeric column had more than `limit` distinct literals.
    CardinalityOverflow { column: usize, label: String, limit: usize },
}

impl fmt::Display for LoadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectionResolved { indices, labels } => {
                write!(f, "selection indices={indices:?} labels={labels:?}")
            }
            Self::ColumnClassified {
                column,
                label,
                categorical,
                first_non_numeric,
            } => {
                write!(f, "classified column={column} label='{label}' categorical={categorical}")?;
                if let Some(v) = first_non_numeric {
                    write!(f, " first_non_numeric='{v}'")?;
                }
                Ok(())
            }
            Self::ShadowMappingBuilt {
                column,
                label,
                distinct,
            } => write!(f, "shadow_mapping column={column} label='{label}' distinct={distinct}"),
            Self::CardinalityOverflow { column, label, limit } => {
                write!(f, "overflow column={column} label='{label}' limit={limit}")
            }
        }
    }
}

/// Observer interface for load progress and outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts. Observers never affect the result of
/// a load.
pub trait LoadObserver: Send + Sync {
    /// Called at each pipeline checkpoint.
    fn on_event(&self, _ctx: &LoadContext, _event: &LoadEvent) {}

    /// Called when a load succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &LoadError) {}

    /// Called when a load failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_event(&self, ctx: &LoadContext, event: &LoadEvent) {
        for o in &self.observers {
            o.on_event(ctx, event);
        }
    }

    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs load events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl LoadObserver for StdErrObserver {
    fn on_event(&self, ctx: &LoadContext, event: &LoadEvent) {
        eprintln!("[load][event] source={} {event}", ctx.source);
    }

    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        eprintln!(
            "[load][ok] source={} rows={} cols={} categorical={}",
            ctx.source, stats.rows, stats.cols, stats.categorical_columns
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        eprintln!("[load][{severity:?}] source={} err={error}", ctx.source);
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        eprintln!("[ALERT][load][{severity:?}] source={} err={error}", ctx.source);
    }
}

/// Appends load events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl LoadObserver for FileObserver {
    fn on_event(&self, ctx: &LoadContext, event: &LoadEvent) {
        self.append_line(&format!("{} event source={} {event}", unix_ts(), ctx.source));
    }

    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.append_line(&format!(
            "{} ok source={} rows={} cols={} categorical={}",
            unix_ts(),
            ctx.source,
            stats.rows,
            stats.cols,
            stats.categorical_columns
        ));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.append_line(&format!(
            "{} fail severity={severity:?} source={} err={error}",
            unix_ts(),
            ctx.source
        ));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &LoadError) {
        self.append_line(&format!(
            "{} ALERT severity={severity:?} source={} err={error}",
            unix_ts(),
            ctx.source
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
