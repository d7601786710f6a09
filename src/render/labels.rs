//! Display strings shown by the drawing surface.

use crate::graph::{Link, Node, SankeyGraph};

/// Node label and tooltip: `"{label}: {value}"`.
pub fn node_text(node: &Node, value: u64) -> String {
    format!("{}: {}", node.label, value)
}

/// Link tooltip: `"{sourceColumn}={sourceLabel} --> {targetColumn}={targetLabel}: {value}"`.
///
/// Returns `None` if either endpoint is not a node of `graph`.
pub fn link_text(graph: &SankeyGraph, link: &Link) -> Option<String> {
    let source = graph.node(&link.source)?;
    let target = graph.node(&link.target)?;
    Some(format!(
        "{}={} --> {}={}: {}",
        source.column, source.label, target.column, target.label, link.value
    ))
}
