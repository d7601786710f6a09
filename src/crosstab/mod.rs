//! Categorical cross-tabulation: rows + selected columns → Sankey nodes and links.
//!
//! [`build`] is a pure function of its inputs. Every call recomputes the graph from scratch.
//!
//! - **Nodes**: one per `(column, code)` in each selected column's full domain, in selection
//!   order then domain order. Values with zero rows still get a node.
//! - **Links**: for each adjacent pair of selected columns, the complete cross product of the two
//!   domains (zero-valued pairs included), in source-domain × target-domain order. Non-adjacent
//!   columns are never linked.
//! - **Exclusion**: a row whose cell is missing or outside the column's domain is left out of that
//!   pair's counts. This is not an error; attach a [`BuildObserver`] to see it.
//!
//! ## Example
//!
//! ```rust
//! use sankey_crosstab::crosstab::build;
//! use sankey_crosstab::domain::DomainRegistry;
//! use sankey_crosstab::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let registry = DomainRegistry::new()
//!     .with_domain("school", [("GP", "Gabriel Pereira"), ("MS", "Mousinho Da Silveira")])
//!     .unwrap()
//!     .with_domain("sex", [("M", "Male"), ("F", "Female")])
//!     .unwrap();
//!
//! let schema = Schema::new(vec![
//!     Field::new("school", DataType::Utf8),
//!     Field::new("sex", DataType::Utf8),
//! ]);
//! let row = |school: &str, sex: &str| vec![Value::Utf8(school.into()), Value::Utf8(sex.into())];
//! let ds = DataSet::new(schema, vec![row("GP", "M"), row("GP", "F"), row("MS", "F")]);
//!
//! let graph = build(&ds, &["school", "sex"], &registry).unwrap();
//! assert_eq!(graph.nodes.len(), 4);
//! assert_eq!(graph.links.len(), 4);
//! assert_eq!(graph.links[0].source, "schoolGP");
//! assert_eq!(graph.links[0].target, "sexM");
//! assert_eq!(graph.links[0].value, 1);
//! ```

mod table;

use std::fmt;
use std::sync::Arc;

use crate::domain::{self, Domain, DomainRegistry};
use crate::error::{GraphError, GraphResult};
use crate::graph::{Link, Node, SankeyGraph};
use crate::observability::{BuildContext, BuildObserver, BuildStats, ExcludedRow, PairStats, Severity};
use crate::types::DataSet;

use table::{ColumnRef, CountTable};

/// Options for [`build_with_options`].
#[derive(Clone)]
pub struct BuildOptions {
    /// Receives row exclusions, build summaries, and configuration failures.
    pub observer: Option<Arc<dyn BuildObserver>>,
    /// Severity threshold at which `on_alert` is invoked for failures.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for BuildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Build the Sankey graph for `selected` columns over `dataset`, silently excluding anomalous rows.
///
/// # Errors
///
/// - [`GraphError::EmptySelection`] if `selected` is empty.
/// - [`GraphError::UnknownColumn`] if a selected column has no domain in `registry`.
/// - [`GraphError::DuplicateNodeId`] if two selected `(column, code)` pairs share a node id,
///   e.g. when a column is selected twice.
pub fn build<S: AsRef<str>>(
    dataset: &DataSet,
    selected: &[S],
    registry: &DomainRegistry,
) -> GraphResult<SankeyGraph> {
    build_with_options(dataset, selected, registry, &BuildOptions::default())
}

/// [`build`] with an optional observer.
///
/// The observer sees one [`ExcludedRow`] per (row, pair) exclusion and a [`BuildStats`] summary
/// on success; on failure it gets `on_failure` (severity [`Severity::Error`]) and `on_alert` when
/// that meets `options.alert_at_or_above`. The returned graph is the same with or without it.
pub fn build_with_options<S: AsRef<str>>(
    dataset: &DataSet,
    selected: &[S],
    registry: &DomainRegistry,
    options: &BuildOptions,
) -> GraphResult<SankeyGraph> {
    let columns: Vec<&str> = selected.iter().map(|s| s.as_ref()).collect();
    let ctx = BuildContext {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows: dataset.row_count(),
    };
    let observer = options.observer.as_deref();

    let result = build_graph(dataset, &columns, registry, &ctx, observer);

    if let Some(obs) = observer {
        match &result {
            Ok((_, stats)) => obs.on_built(&ctx, stats),
            Err(e) => {
                let sev = Severity::Error;
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(graph, _)| graph)
}

fn build_graph(
    dataset: &DataSet,
    columns: &[&str],
    registry: &DomainRegistry,
    ctx: &BuildContext,
    observer: Option<&dyn BuildObserver>,
) -> GraphResult<(SankeyGraph, BuildStats)> {
    if columns.is_empty() {
        return Err(GraphError::EmptySelection);
    }

    let domains: Vec<(&str, &Domain)> = columns
        .iter()
        .map(|&c| registry.require(c).map(|d| (c, d)))
        .collect::<GraphResult<_>>()?;

    if let Some(id) = domain::find_id_collision(registry, columns) {
        return Err(GraphError::DuplicateNodeId { id });
    }

    let nodes = build_nodes(&domains);

    let mut links = Vec::new();
    let mut pairs = Vec::with_capacity(domains.len().saturating_sub(1));
    for (pair, window) in domains.windows(2).enumerate() {
        let (source_name, source_domain) = window[0];
        let (target_name, target_domain) = window[1];

        let table = CountTable::tally(
            dataset,
            ColumnRef::resolve(dataset, source_name, source_domain),
            ColumnRef::resolve(dataset, target_name, target_domain),
            |row, column, reason| {
                if let Some(obs) = observer {
                    obs.on_row_excluded(
                        ctx,
                        &ExcludedRow {
                            pair,
                            row,
                            column: column.to_string(),
                            reason,
                        },
                    );
                }
            },
        );

        for (s, source) in source_domain.entries().iter().enumerate() {
            for (t, target) in target_domain.entries().iter().enumerate() {
                links.push(Link {
                    source: domain::node_id(source_name, &source.code),
                    target: domain::node_id(target_name, &target.code),
                    value: table.get(s, t),
                });
            }
        }

        pairs.push(PairStats {
            source_column: source_name.to_string(),
            target_column: target_name.to_string(),
            counted: table.counted(),
            excluded: table.excluded(),
        });
    }

    let stats = BuildStats {
        nodes: nodes.len(),
        links: links.len(),
        pairs,
    };
    Ok((SankeyGraph { nodes, links }, stats))
}

fn build_nodes(domains: &[(&str, &Domain)]) -> Vec<Node> {
    domains
        .iter()
        .flat_map(|&(column, values)| {
            values.entries().iter().map(move |e| Node {
                column: column.to_string(),
                id: domain::node_id(column, &e.code),
                code: e.code.clone(),
                label: e.label.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{BuildOptions, build, build_with_options};
    use crate::domain::DomainRegistry;
    use crate::error::GraphError;
    use crate::observability::{
        BuildContext, BuildObserver, BuildStats, ExcludedRow, ExclusionReason, Severity,
    };
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn registry() -> DomainRegistry {
        DomainRegistry::new()
            .with_domain("school", [("GP", "Gabriel Pereira"), ("MS", "Mousinho Da Silveira")])
            .unwrap()
            .with_domain("sex", [("M", "Male"), ("F", "Female")])
            .unwrap()
            .with_domain("address", [("U", "Urban"), ("R", "Rural")])
            .unwrap()
    }

    fn dataset(rows: &[(&str, &str, &str)]) -> DataSet {
        let schema = Schema::new(vec![
            Field::new("school", DataType::Utf8),
            Field::new("sex", DataType::Utf8),
            Field::new("address", DataType::Utf8),
        ]);
        let cell = |s: &str| {
            if s.is_empty() {
                Value::Null
            } else {
                Value::Utf8(s.to_string())
            }
        };
        DataSet::new(
            schema,
            rows.iter()
                .map(|(a, b, c)| vec![cell(a), cell(b), cell(c)])
                .collect(),
        )
    }

    fn link_triples(g: &crate::graph::SankeyGraph) -> Vec<(&str, &str, u64)> {
        g.links
            .iter()
            .map(|l| (l.source.as_str(), l.target.as_str(), l.value))
            .collect()
    }

    #[test]
    fn school_sex_counts_match_rows() {
        let ds = dataset(&[
            ("GP", "M", "U"),
            ("GP", "F", "U"),
            ("GP", "F", "R"),
            ("MS", "M", "U"),
            ("MS", "M", "R"),
            ("MS", "F", "R"),
            ("MS", "F", "R"),
        ]);
        let g = build(&ds, &["school", "sex"], &registry()).unwrap();

        let ids: Vec<&str> = g.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["schoolGP", "schoolMS", "sexM", "sexF"]);
        assert_eq!(
            link_triples(&g),
            vec![
                ("schoolGP", "sexM", 1),
                ("schoolGP", "sexF", 2),
                ("schoolMS", "sexM", 2),
                ("schoolMS", "sexF", 2),
            ]
        );
    }

    #[test]
    fn only_adjacent_pairs_are_linked() {
        let ds = dataset(&[("GP", "M", "U"), ("MS", "F", "R")]);
        let g = build(&ds, &["school", "sex", "address"], &registry()).unwrap();

        assert_eq!(g.nodes.len(), 6);
        assert_eq!(g.links.len(), 8);
        assert_eq!(g.links_for_pair("school", "address").count(), 0);
        assert_eq!(g.links_for_pair("sex", "address").map(|l| l.value).sum::<u64>(), 2);
    }

    #[test]
    fn missing_value_only_affects_its_pairs() {
        // The null address drops the row from sex→address but not school→sex.
        let ds = dataset(&[("GP", "M", ""), ("GP", "M", "U")]);
        let g = build(&ds, &["school", "sex", "address"], &registry()).unwrap();

        assert_eq!(g.links_for_pair("school", "sex").map(|l| l.value).sum::<u64>(), 2);
        assert_eq!(g.links_for_pair("sex", "address").map(|l| l.value).sum::<u64>(), 1);
        assert!(g.nodes.iter().all(|n| !n.code.is_empty()));
    }

    #[test]
    fn unknown_column_fails_fast() {
        let ds = dataset(&[]);
        let err = build(&ds, &["school", "studyTime"], &registry()).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownColumn {
                column: "studyTime".to_string()
            }
        );
    }

    #[test]
    fn empty_selection_is_rejected() {
        let ds = dataset(&[]);
        let none: [&str; 0] = [];
        assert_eq!(build(&ds, &none, &registry()).unwrap_err(), GraphError::EmptySelection);
    }

    #[test]
    fn column_selected_twice_is_a_duplicate_node_id() {
        let ds = dataset(&[]);
        let err = build(&ds, &["sex", "sex"], &registry()).unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateNodeId {
                id: "sexM".to_string()
            }
        );
    }

    #[test]
    fn selection_accepts_owned_strings() {
        let ds = dataset(&[("GP", "M", "U")]);
        let selected = vec!["school".to_string(), "sex".to_string()];
        let g = build(&ds, &selected, &registry()).unwrap();
        assert_eq!(g.links.len(), 4);
    }

    #[derive(Default)]
    struct Recording {
        excluded: Mutex<Vec<ExcludedRow>>,
        built: Mutex<Vec<BuildStats>>,
        failures: Mutex<Vec<Severity>>,
        alerts: Mutex<Vec<Severity>>,
    }

    impl BuildObserver for Recording {
        fn on_row_excluded(&self, _ctx: &BuildContext, excluded: &ExcludedRow) {
            self.excluded.lock().unwrap().push(excluded.clone());
        }

        fn on_built(&self, _ctx: &BuildContext, stats: &BuildStats) {
            self.built.lock().unwrap().push(stats.clone());
        }

        fn on_failure(&self, _ctx: &BuildContext, severity: Severity, _error: &GraphError) {
            self.failures.lock().unwrap().push(severity);
        }

        fn on_alert(&self, _ctx: &BuildContext, severity: Severity, _error: &GraphError) {
            self.alerts.lock().unwrap().push(severity);
        }
    }

    #[test]
    fn observer_sees_exclusions_without_changing_output() {
        let ds = dataset(&[("GP", "M", "U"), ("XX", "F", "U"), ("MS", "", "R")]);
        let obs = Arc::new(Recording::default());
        let opts = BuildOptions {
            observer: Some(obs.clone()),
            ..Default::default()
        };

        let observed = build_with_options(&ds, &["school", "sex", "address"], &registry(), &opts)
            .unwrap();
        let silent = build(&ds, &["school", "sex", "address"], &registry()).unwrap();
        assert_eq!(observed, silent);

        let excluded = obs.excluded.lock().unwrap().clone();
        assert_eq!(
            excluded,
            vec![
                ExcludedRow {
                    pair: 0,
                    row: 1,
                    column: "school".to_string(),
                    reason: ExclusionReason::OutOfDomain {
                        code: "XX".to_string()
                    },
                },
                ExcludedRow {
                    pair: 0,
                    row: 2,
                    column: "sex".to_string(),
                    reason: ExclusionReason::Missing,
                },
                ExcludedRow {
                    pair: 1,
                    row: 2,
                    column: "sex".to_string(),
                    reason: ExclusionReason::Missing,
                },
            ]
        );

        let built = obs.built.lock().unwrap().clone();
        assert_eq!(built.len(), 1);
        assert_eq!(built[0].nodes, 6);
        assert_eq!(built[0].links, 8);
        assert_eq!(built[0].pairs[0].counted, 1);
        assert_eq!(built[0].pairs[0].excluded, 2);
        assert_eq!(built[0].pairs[1].counted, 2);
        assert_eq!(built[0].pairs[1].excluded, 1);
    }

    #[test]
    fn observer_alerts_on_configuration_error_at_threshold() {
        let ds = dataset(&[]);
        let obs = Arc::new(Recording::default());
        let opts = BuildOptions {
            observer: Some(obs.clone()),
            alert_at_or_above: Severity::Error,
        };

        let _ = build_with_options(&ds, &["nope"], &registry(), &opts).unwrap_err();

        assert_eq!(*obs.failures.lock().unwrap(), vec![Severity::Error]);
        assert_eq!(*obs.alerts.lock().unwrap(), vec![Severity::Error]);
        assert!(obs.built.lock().unwrap().is_empty());
    }
}
