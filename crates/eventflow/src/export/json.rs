//! JSON render model.
//!
//! A flat description of what to draw, with the selection emphasis already
//! applied, for front ends that do their own rendering:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "command-PlaceOrder", "kind": "command", "label": "PlaceOrder",
//!               "x": 100.0, "y": 0.0, "color": "#3b82f6", "opacity": 1.0, "style": { .. } }],
//!   "edges": [{ "id": "command-PlaceOrder-event-OrderPlaced", "source": "command-PlaceOrder",
//!               "target": "event-OrderPlaced", "color": "#64748b", "animated": true,
//!               "strokeWidth": 2.0, "opacity": 1.0 }],
//!   "warnings": []
//! }
//! ```

use serde::Serialize;

use eventflow_core::{
    color::Color,
    draw::NodeStyle,
    identifier::{EdgeId, NodeId, NodeKind},
};

use super::{Error, Exporter};
use crate::{
    graph::FlowGraph,
    highlight::{HighlightedEdge, HighlightedNode},
    layout::LayoutWarning,
};

#[derive(Debug, Serialize)]
struct RenderModel<'a> {
    nodes: Vec<RenderNode<'a>>,
    edges: Vec<RenderEdge<'a>>,
    warnings: &'a [LayoutWarning],
}

#[derive(Debug, Serialize)]
struct RenderNode<'a> {
    id: &'a NodeId,
    kind: NodeKind,
    label: &'a str,
    x: f32,
    y: f32,
    color: Color,
    opacity: f32,
    style: &'a NodeStyle,
}

impl<'a> From<&HighlightedNode<'a>> for RenderNode<'a> {
    fn from(highlighted: &HighlightedNode<'a>) -> Self {
        let node = highlighted.node();
        Self {
            id: node.id(),
            kind: node.kind(),
            label: node.label(),
            x: node.position().x(),
            y: node.position().y(),
            color: node.color(),
            opacity: highlighted.opacity(),
            style: node.style(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderEdge<'a> {
    id: &'a EdgeId,
    source: &'a NodeId,
    target: &'a NodeId,
    color: Color,
    animated: bool,
    stroke_width: f32,
    opacity: f32,
}

impl<'a> From<&HighlightedEdge<'a>> for RenderEdge<'a> {
    fn from(highlighted: &HighlightedEdge<'a>) -> Self {
        let edge = highlighted.edge();
        Self {
            id: edge.id(),
            source: edge.source(),
            target: edge.target(),
            color: highlighted.color(),
            animated: highlighted.animated(),
            stroke_width: highlighted.stroke_width(),
            opacity: highlighted.opacity(),
        }
    }
}

/// Writes the render model as pretty-printed JSON.
#[derive(Debug, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export(&self, graph: &FlowGraph, selected: Option<&NodeId>) -> Result<String, Error> {
        let view = graph.highlight(selected);
        let model = RenderModel {
            nodes: view.nodes().iter().map(RenderNode::from).collect(),
            edges: view.edges().iter().map(RenderEdge::from).collect(),
            warnings: graph.warnings(),
        };
        Ok(serde_json::to_string_pretty(&model)?)
    }
}
