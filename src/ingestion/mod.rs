//! Data-source layer: loading rows into a [`crate::types::DataSet`].
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - performs ingestion into an in-memory [`crate::types::DataSet`]
//! - optionally reports success/failure/alerts to an
//!   [`IngestionObserver`](crate::observability::IngestionObserver)
//!
//! Format-specific functions are also available under [`csv`] and [`json`].

pub mod csv;
pub mod json;
pub mod unified;

pub use unified::{ingest_from_path, IngestionFormat, IngestionOptions};
