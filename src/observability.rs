//! Observer hooks for loading and graph building.
//!
//! Nothing in this crate logs on its own. Callers that want logs, metrics, or alerts attach an
//! observer through [`crate::ingestion::IngestionOptions::observer`] or
//! [`crate::crosstab::BuildOptions::observer`]. The bundled sinks ([`StdErrObserver`],
//! [`FileObserver`], [`CompositeObserver`]) implement both observer traits.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{GraphError, IngestionError};
use crate::ingestion::IngestionFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, e.g. a row excluded from a link count).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// The input path used for ingestion.
    pub path: PathBuf,
    /// Format used for ingestion.
    pub format: IngestionFormat,
}

/// Stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of ingested rows.
    pub rows: usize,
}

/// Observer interface for ingestion outcomes.
pub trait IngestionObserver: Send + Sync {
    /// Called when ingestion succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when ingestion fails.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: Severity, _error: &IngestionError) {}

    /// Called when an ingestion failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: Severity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Context about one graph build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Selected columns, in selection order.
    pub columns: Vec<String>,
    /// Number of input rows.
    pub rows: usize,
}

/// Why a row did not contribute to an adjacent pair's counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Null cell, short row, or column absent from the dataset schema.
    Missing,
    /// The cell's category code is not part of the column's domain.
    OutOfDomain { code: String },
}

/// A row excluded from one adjacent pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedRow {
    /// Index of the adjacent pair (`0` is `columns[0] → columns[1]`).
    pub pair: usize,
    /// Zero-based row index in the input.
    pub row: usize,
    /// The column whose cell caused the exclusion.
    pub column: String,
    pub reason: ExclusionReason,
}

/// Per-pair counting summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairStats {
    pub source_column: String,
    pub target_column: String,
    /// Rows that landed in some link of this pair (sum of the pair's link values).
    pub counted: u64,
    /// Rows excluded from this pair.
    pub excluded: u64,
}

/// Summary reported after a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub nodes: usize,
    pub links: usize,
    pub pairs: Vec<PairStats>,
}

impl BuildStats {
    /// Total rows excluded across all pairs (a row may count once per pair).
    pub fn total_excluded(&self) -> u64 {
        self.pairs.iter().map(|p| p.excluded).sum()
    }
}

/// Observer interface for cross-tabulation builds.
///
/// Observers only watch; they cannot change what the builder returns.
pub trait BuildObserver: Send + Sync {
    /// Called once per (row, pair) the row was excluded from.
    fn on_row_excluded(&self, _ctx: &BuildContext, _excluded: &ExcludedRow) {}

    /// Called when a build succeeds.
    fn on_built(&self, _ctx: &BuildContext, _stats: &BuildStats) {}

    /// Called when a build fails with a configuration error.
    fn on_failure(&self, _ctx: &BuildContext, _severity: Severity, _error: &GraphError) {}

    /// Called when a build failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &BuildContext, severity: Severity, error: &GraphError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Anything that observes both loading and building. Blanket-implemented.
pub trait Observer: IngestionObserver + BuildObserver {}

impl<T: IngestionObserver + BuildObserver> Observer for T {}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn Observer>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn Observer>>) -> Self {
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

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: Severity, error: &IngestionError) {
        for o in &self.observers {
            IngestionObserver::on_failure(o.as_ref(), ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: Severity, error: &IngestionError) {
        for o in &self.observers {
            IngestionObserver::on_alert(o.as_ref(), ctx, severity, error);
        }
    }
}

impl BuildObserver for CompositeObserver {
    fn on_row_excluded(&self, ctx: &BuildContext, excluded: &ExcludedRow) {
        for o in &self.observers {
            o.on_row_excluded(ctx, excluded);
        }
    }

    fn on_built(&self, ctx: &BuildContext, stats: &BuildStats) {
        for o in &self.observers {
            o.on_built(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &BuildContext, severity: Severity, error: &GraphError) {
        for o in &self.observers {
            BuildObserver::on_failure(o.as_ref(), ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &BuildContext, severity: Severity, error: &GraphError) {
        for o in &self.observers {
            BuildObserver::on_alert(o.as_ref(), ctx, severity, error);
        }
    }
}

/// Logs events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IngestionObserver for StdErrObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        eprintln!(
            "[ingest][ok] format={:?} path={} rows={}",
            ctx.format,
            ctx.path.display(),
            stats.rows
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: Severity, error: &IngestionError) {
        eprintln!(
            "[ingest][{:?}] format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: Severity, error: &IngestionError) {
        eprintln!(
            "[ALERT][ingest][{:?}] format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }
}

impl BuildObserver for StdErrObserver {
    fn on_row_excluded(&self, ctx: &BuildContext, excluded: &ExcludedRow) {
        eprintln!(
            "[crosstab][{:?}] {}",
            Severity::Warning,
            describe_exclusion(ctx, excluded)
        );
    }

    fn on_built(&self, ctx: &BuildContext, stats: &BuildStats) {
        eprintln!(
            "[crosstab][ok] columns={:?} rows={} nodes={} links={} excluded={}",
            ctx.columns,
            ctx.rows,
            stats.nodes,
            stats.links,
            stats.total_excluded()
        );
    }

    fn on_failure(&self, ctx: &BuildContext, severity: Severity, error: &GraphError) {
        eprintln!("[crosstab][{severity:?}] columns={:?} err={error}", ctx.columns);
    }

    fn on_alert(&self, ctx: &BuildContext, severity: Severity, error: &GraphError) {
        eprintln!(
            "[ALERT][crosstab][{severity:?}] columns={:?} err={error}",
            ctx.columns
        );
    }
}

/// Appends events to a local log file, one line per event.
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
            let _ = writeln!(f, "{} {line}", unix_ts());
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.append_line(&format!(
            "ingest ok format={:?} path={} rows={}",
            ctx.format,
            ctx.path.display(),
            stats.rows
        ));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: Severity, error: &IngestionError) {
        self.append_line(&format!(
            "ingest fail severity={:?} format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: Severity, error: &IngestionError) {
        self.append_line(&format!(
            "ingest ALERT severity={:?} format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        ));
    }
}

impl BuildObserver for FileObserver {
    fn on_row_excluded(&self, ctx: &BuildContext, excluded: &ExcludedRow) {
        self.append_line(&format!(
            "crosstab excluded {}",
            describe_exclusion(ctx, excluded)
        ));
    }

    fn on_built(&self, ctx: &BuildContext, stats: &BuildStats) {
        self.append_line(&format!(
            "crosstab ok columns={:?} rows={} nodes={} links={} excluded={}",
            ctx.columns,
            ctx.rows,
            stats.nodes,
            stats.links,
            stats.total_excluded()
        ));
    }

    fn on_failure(&self, ctx: &BuildContext, severity: Severity, error: &GraphError) {
        self.append_line(&format!(
            "crosstab fail severity={severity:?} columns={:?} err={error}",
            ctx.columns
        ));
    }

    fn on_alert(&self, ctx: &BuildContext, severity: Severity, error: &GraphError) {
        self.append_line(&format!(
            "crosstab ALERT severity={severity:?} columns={:?} err={error}",
            ctx.columns
        ));
    }
}

fn describe_exclusion(ctx: &BuildContext, excluded: &ExcludedRow) -> String {
    let pair = ctx
        .columns
        .get(excluded.pair)
        .zip(ctx.columns.get(excluded.pair + 1))
        .map(|(s, t)| format!("{s}->{t}"))
        .unwrap_or_else(|| format!("#{}", excluded.pair));
    match &excluded.reason {
        ExclusionReason::Missing => format!(
            "pair={pair} row={} column={} reason=missing",
            excluded.row, excluded.column
        ),
        ExclusionReason::OutOfDomain { code } => format!(
            "pair={pair} row={} column={} reason=out_of_domain code='{code}'",
            excluded.row, excluded.column
        ),
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
