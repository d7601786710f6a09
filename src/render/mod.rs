//! Boundary with the layout engine and the drawing surface.
//!
//! Geometry is not computed here. [`RenderPlan::prepare`] packages what the external engine and
//! surface need: the layout request (graph copy + extent + node sizing), per-node and per-link
//! display strings, and the keys the surface feeds into its color scale.
//!
//! ```rust
//! use sankey_crosstab::graph::SankeyGraph;
//! use sankey_crosstab::render::{RenderPlan, SankeyStyle, SurfaceSize};
//!
//! let graph = SankeyGraph::default();
//! // Not laid out yet: nothing to draw.
//! assert!(RenderPlan::prepare(&graph, SurfaceSize::new(0.0, 0.0), &SankeyStyle::default()).is_none());
//! ```

mod labels;
mod surface;

use serde::Serialize;

use crate::graph::SankeyGraph;

pub use labels::{link_text, node_text};
pub use surface::{DebounceOptions, ResizeDebouncer, SurfaceSize};

/// Space reserved around the diagram, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Node sizing and margins passed through to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SankeyStyle {
    pub node_width: f64,
    pub node_padding: f64,
    pub margin: Margin,
}

impl Default for SankeyStyle {
    fn default() -> Self {
        Self {
            node_width: 15.0,
            node_padding: 15.0,
            margin: Margin {
                top: 100.0,
                right: 10.0,
                bottom: 100.0,
                left: 10.0,
            },
        }
    }
}

/// Input handed to the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRequest {
    /// Owned copy of the graph; the engine may annotate it freely.
    pub graph: SankeyGraph,
    pub node_width: f64,
    pub node_padding: f64,
    /// `[[x0, y0], [x1, y1]]` drawing area inside the margins.
    pub extent: [[f64; 2]; 2],
}

/// What the surface draws for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDraw {
    pub id: String,
    pub value: u64,
    /// Label beside the rectangle and its tooltip: `"{label}: {value}"`.
    pub text: String,
    /// Color-scale key.
    pub color_key: String,
}

/// What the surface draws for one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkDraw {
    pub source: String,
    pub target: String,
    pub value: u64,
    pub tooltip: String,
    /// Color-scale key; flows take the color of their source node.
    pub color_key: String,
}

/// Everything needed for one redraw at one surface size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub surface: SurfaceSize,
    pub layout: LayoutRequest,
    pub nodes: Vec<NodeDraw>,
    pub links: Vec<LinkDraw>,
}

impl RenderPlan {
    /// Prepare a redraw, or `None` if the surface is not renderable yet.
    ///
    /// Links whose endpoints do not resolve are left out; a graph from
    /// [`crate::crosstab::build`] never has any.
    pub fn prepare(graph: &SankeyGraph, surface: SurfaceSize, style: &SankeyStyle) -> Option<Self> {
        if !surface.is_renderable() {
            return None;
        }

        let values = graph.node_values();
        let nodes = graph
            .nodes
            .iter()
            .map(|n| {
                let value = values.get(n.id.as_str()).copied().unwrap_or(0);
                NodeDraw {
                    id: n.id.clone(),
                    value,
                    text: node_text(n, value),
                    color_key: n.id.clone(),
                }
            })
            .collect();

        let links = graph
            .links
            .iter()
            .filter_map(|l| {
                let tooltip = link_text(graph, l)?;
                Some(LinkDraw {
                    source: l.source.clone(),
                    target: l.target.clone(),
                    value: l.value,
                    tooltip,
                    color_key: l.source.clone(),
                })
            })
            .collect();

        let m = style.margin;
        Some(Self {
            surface,
            layout: LayoutRequest {
                graph: graph.clone(),
                node_width: style.node_width,
                node_padding: style.node_padding,
                extent: [
                    [m.left, m.top],
                    [surface.width - m.right, surface.height - m.bottom],
                ],
            },
            nodes,
            links,
        })
    }

    /// The layout request as JSON, in the field names the layout engine reads.
    pub fn layout_json(&self) -> serde_json::Value {
        serde_json::json!({
            "nodes": self.layout.graph.nodes,
            "links": self.layout.graph.links,
            "nodeWidth": self.layout.node_width,
            "nodePadding": self.layout.node_padding,
            "extent": self.layout.extent,
        })
    }
}
