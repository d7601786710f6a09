//! `sankey-crosstab` turns rows of categorical data into the node/link graph a Sankey layout
//! engine consumes.
//!
//! Pick an ordered list of categorical columns. Every value in each column's domain becomes a
//! node. Every adjacent pair of columns gets the full cross product of links, each weighted by
//! how many rows have that source and target value. Layout geometry and drawing belong to
//! external libraries. This crate produces their inputs: the layout JSON, display strings, and
//! the redraw gate for the surface size.
//!
//! ## Pipeline
//!
//! 1. Load rows into a [`types::DataSet`] ([`ingestion::ingest_from_path`], CSV or JSON).
//! 2. Describe each categorical column's ordered `(code, label)` domain in a
//!    [`domain::DomainRegistry`] (or use [`student::registry`]).
//! 3. [`crosstab::build`] the [`graph::SankeyGraph`].
//! 4. Hand [`graph::SankeyGraph::to_layout_json`] to the layout engine, or prepare a full
//!    [`render::RenderPlan`] for the current surface size.
//!
//! ## Example: student dataset
//!
//! ```no_run
//! use sankey_crosstab::crosstab::build;
//! use sankey_crosstab::ingestion::{ingest_from_path, IngestionOptions};
//! use sankey_crosstab::render::{RenderPlan, SankeyStyle, SurfaceSize};
//! use sankey_crosstab::student;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = IngestionOptions {
//!     csv_delimiter: b';',
//!     ..Default::default()
//! };
//! let rows = ingest_from_path("student-mat.csv", &student::schema(), &opts)?;
//! let registry = student::registry()?;
//!
//! let graph = build(&rows, &["school", "sex", "studyTime", "failures"], &registry)?;
//! if let Some(plan) = RenderPlan::prepare(&graph, SurfaceSize::new(960.0, 640.0), &SankeyStyle::default()) {
//!     println!("{}", plan.layout_json());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: in-memory rows
//!
//! ```rust
//! use sankey_crosstab::crosstab::build;
//! use sankey_crosstab::domain::DomainRegistry;
//! use sankey_crosstab::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let registry = DomainRegistry::new()
//!     .with_domain("school", [("GP", "Gabriel Pereira"), ("MS", "Mousinho Da Silveira")])
//!     .unwrap();
//! let schema = Schema::new(vec![Field::new("school", DataType::Utf8)]);
//! let ds = DataSet::new(schema, vec![vec![Value::Utf8("GP".to_string())]]);
//!
//! // One column: all of its nodes, no links.
//! let graph = build(&ds, &["school"], &registry).unwrap();
//! assert_eq!(graph.nodes.len(), 2);
//! assert!(graph.links.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`ingestion`]: CSV/JSON loading into a dataset
//! - [`domain`]: categorical domains and the column registry
//! - [`crosstab`]: the graph builder
//! - [`graph`]: nodes, links, and the layout JSON contract
//! - [`render`]: display strings, surface gating, resize debouncing
//! - [`student`]: built-in schema and domains for the UCI student-performance data
//! - [`observability`]: observer hooks and stderr/file sinks
//! - [`error`]: error types

pub mod crosstab;
pub mod domain;
pub mod error;
pub mod graph;
pub mod ingestion;
pub mod observability;
pub mod render;
pub mod student;
pub mod types;

pub use error::{GraphError, GraphResult, IngestionError, IngestionResult};
