//! Path-based loading with format detection and observer reporting.
//!
//! [`ingest_from_path`] picks the reader from [`IngestionOptions::format`], or from the file
//! extension when that is `None`, and reports the outcome to the configured
//! [`IngestionObserver`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::observability::{IngestionContext, IngestionObserver, IngestionStats, Severity};
use crate::types::{DataSet, Schema};

use super::{csv, json};

/// File formats [`ingest_from_path`] can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Delimiter-separated values (comma by default, `;` for the UCI student files).
    Csv,
    /// JSON array-of-objects, single object, or NDJSON.
    Json,
}

impl IngestionFormat {
    /// Format for a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loading options.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Forced format; `None` infers it from the extension.
    pub format: Option<IngestionFormat>,
    /// Field delimiter for CSV input.
    pub csv_delimiter: u8,
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Failures at or above this severity also go to `on_alert`.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("csv_delimiter", &(self.csv_delimiter as char))
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            csv_delimiter: b',',
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Load `path` into a [`DataSet`] shaped by `schema`.
///
/// A missing or unreadable file is [`Severity::Critical`]; schema and parse failures are
/// [`Severity::Error`]. Data anomalies in categorical columns (empty cells, absent JSON keys,
/// codes outside a domain) are not failures here; they load as values the graph builder excludes.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use sankey_crosstab::ingestion::{ingest_from_path, IngestionOptions};
/// use sankey_crosstab::observability::StdErrObserver;
/// use sankey_crosstab::student;
///
/// # fn main() -> Result<(), sankey_crosstab::IngestionError> {
/// let opts = IngestionOptions {
///     csv_delimiter: b';',
///     observer: Some(Arc::new(StdErrObserver)),
///     ..Default::default()
/// };
/// let ds = ingest_from_path("student-por.csv", &student::schema(), &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let result = match format {
        IngestionFormat::Csv => {
            csv::ingest_csv_from_path_with_delimiter(path, schema, options.csv_delimiter)
        }
        IngestionFormat::Json => json::ingest_json_from_path(path, schema),
    };

    if let Some(obs) = options.observer.as_deref() {
        let ctx = IngestionContext {
            path: path.to_path_buf(),
            format,
        };
        report(obs, &ctx, &result, options.alert_at_or_above);
    }

    result
}

fn report(
    obs: &dyn IngestionObserver,
    ctx: &IngestionContext,
    result: &IngestionResult<DataSet>,
    alert_at_or_above: Severity,
) {
    match result {
        Ok(ds) => obs.on_success(ctx, IngestionStats { rows: ds.row_count() }),
        Err(e) => {
            let severity = severity_for_error(e);
            obs.on_failure(ctx, severity, e);
            if severity >= alert_at_or_above {
                obs.on_alert(ctx, severity, e);
            }
        }
    }
}

fn severity_for_error(e: &IngestionError) -> Severity {
    match e {
        IngestionError::Io(_) => Severity::Critical,
        IngestionError::Csv(err) if matches!(err.kind(), ::csv::ErrorKind::Io(_)) => {
            Severity::Critical
        }
        IngestionError::Csv(_)
        | IngestionError::SchemaMismatch { .. }
        | IngestionError::ParseError { .. } => Severity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> IngestionResult<IngestionFormat> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or_default();
    IngestionFormat::from_extension(ext).ok_or_else(|| IngestionError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({}); set IngestionOptions::format",
            path.display()
        ),
    })
}
