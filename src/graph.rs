//! Sankey graph output: nodes, links, and the layout-engine JSON contract.
//!
//! Field names are fixed by what Sankey layout engines (d3-sankey and ports of it) read:
//! nodes are joined on `id`, links carry `source`, `target` and `value`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// A graph vertex for one `(column, code)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub column: String,
    /// `column + code`; unique across the whole node list.
    pub id: String,
    pub code: String,
    pub label: String,
}

/// A weighted edge between nodes of two adjacent selected columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Source [`Node::id`].
    pub source: String,
    /// Target [`Node::id`].
    pub target: String,
    /// Number of rows with this source and target value.
    pub value: u64,
}

/// Output of [`crate::crosstab::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SankeyGraph {
    /// Column order, then domain order within each column.
    pub nodes: Vec<Node>,
    /// Pair order, then source-domain × target-domain order within each pair.
    pub links: Vec<Link>,
}

impl SankeyGraph {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Links whose source node belongs to `source_column` and target node to `target_column`.
    pub fn links_for_pair<'a>(
        &'a self,
        source_column: &'a str,
        target_column: &'a str,
    ) -> impl Iterator<Item = &'a Link> + 'a {
        let columns = self.columns_by_id();
        self.links.iter().filter(move |l| {
            columns.get(l.source.as_str()) == Some(&source_column)
                && columns.get(l.target.as_str()) == Some(&target_column)
        })
    }

    /// Sankey node value: the larger of total incoming and total outgoing link value.
    ///
    /// Nodes in the first column only have outgoing flow and nodes in the last only incoming;
    /// middle nodes can differ when rows are excluded from one pair but not the other.
    pub fn node_value(&self, id: &str) -> u64 {
        let incoming: u64 = self.links.iter().filter(|l| l.target == id).map(|l| l.value).sum();
        let outgoing: u64 = self.links.iter().filter(|l| l.source == id).map(|l| l.value).sum();
        incoming.max(outgoing)
    }

    /// Node values for every node, keyed by id. One pass over the links.
    pub fn node_values(&self) -> HashMap<&str, u64> {
        let mut incoming: HashMap<&str, u64> = HashMap::new();
        let mut outgoing: HashMap<&str, u64> = HashMap::new();
        for l in &self.links {
            *incoming.entry(l.target.as_str()).or_default() += l.value;
            *outgoing.entry(l.source.as_str()).or_default() += l.value;
        }
        self.nodes
            .iter()
            .map(|n| {
                let id = n.id.as_str();
                let v = incoming
                    .get(id)
                    .copied()
                    .unwrap_or(0)
                    .max(outgoing.get(id).copied().unwrap_or(0));
                (id, v)
            })
            .collect()
    }

    /// Returns the first link endpoint that does not resolve to a node, if any.
    pub fn validate_endpoints(&self) -> Result<(), String> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        for l in &self.links {
            for endpoint in [&l.source, &l.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(endpoint.clone());
                }
            }
        }
        Ok(())
    }

    /// Serialize an owned copy of the graph for a layout engine.
    ///
    /// The engine annotates whatever it is given with geometry, so it gets its own copy.
    pub fn to_layout_json(&self) -> serde_json::Value {
        serde_json::json!({
            "nodes": self.nodes,
            "links": self.links,
        })
    }

    fn columns_by_id(&self) -> HashMap<&str, &str> {
        self.nodes
            .iter()
            .map(|n| (n.id.as_str(), n.column.as_str()))
            .collect()
    }
}
