use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by the data-source layer.
///
/// Shared across CSV and JSON ingestion.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not conform to the provided schema (missing CSV columns, malformed JSON, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// Convenience result type for registry and graph-building operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Configuration errors raised while registering domains or building a graph.
///
/// Data anomalies (missing or out-of-domain cells) are never errors; those rows are excluded
/// from the affected link counts instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No columns were selected.
    #[error("column selection is empty")]
    EmptySelection,

    /// A selected column has no registered domain.
    #[error("unknown column '{column}': no domain registered")]
    UnknownColumn { column: String },

    /// A column was registered twice.
    #[error("duplicate column '{column}' in domain registry")]
    DuplicateColumn { column: String },

    /// A domain lists the same code twice, which would produce colliding node ids.
    #[error("duplicate code '{code}' in domain of column '{column}'")]
    DuplicateCode { column: String, code: String },

    /// Two selected `(column, code)` pairs produce the same node id (including a column
    /// selected twice).
    #[error("node id '{id}' is not unique across the selected columns")]
    DuplicateNodeId { id: String },

    /// A domain was registered with no values.
    #[error("domain of column '{column}' is empty")]
    EmptyDomain { column: String },
}
