//! Positioned flow graph.
//!
//! [`FlowGraph`] is the output of the layout builder: nodes with coordinates
//! and base styles, edges with base styles, and the warnings collected while
//! building. Nodes are keyed by id and edges by their `(source, target)` pair,
//! both in insertion order, so creation is "insert if absent": a second
//! declaration of the same node or edge is a no-op and can never move or
//! restyle what already exists.

use indexmap::{IndexMap, map::Entry};

use eventflow_core::{
    color::Color,
    draw::{EdgeStyle, NodeStyle},
    geometry::{Bounds, Point},
    identifier::{EdgeId, NodeId, NodeKind},
};

use crate::{
    highlight::{self, Highlighted},
    layout::LayoutWarning,
};

/// A positioned node.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    id: NodeId,
    position: Point,
    style: NodeStyle,
}

impl GraphNode {
    pub fn new(id: NodeId, position: Point, style: NodeStyle) -> Self {
        Self {
            id,
            position,
            style,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.id.kind()
    }

    /// Returns the label shown in the node, which is the entity name.
    pub fn label(&self) -> &str {
        self.id.label()
    }

    /// Returns the top-left corner of the node.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the node's fill color.
    pub fn color(&self) -> Color {
        self.style.fill()
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.style.size())
    }
}

/// A directed edge between two nodes of the same graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    style: EdgeStyle,
}

impl GraphEdge {
    /// Creates the edge from `source` to `target`; its id is derived from both.
    pub fn new(source: NodeId, target: NodeId, style: EdgeStyle) -> Self {
        Self {
            id: EdgeId::between(&source, &target),
            source,
            target,
            style,
        }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn color(&self) -> Color {
        self.style.color()
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }

    /// Returns `true` if `node` is the source or the target of this edge.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }
}

/// The node and edge sets of a laid out diagram.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    nodes: IndexMap<NodeId, GraphNode>,
    edges: IndexMap<(NodeId, NodeId), GraphEdge>,
    warnings: Vec<LayoutWarning>,
}

impl FlowGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` unless a node with the same id exists.
    ///
    /// Returns `true` if the node was inserted.
    pub fn insert_node(&mut self, node: GraphNode) -> bool {
        match self.nodes.entry(node.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(node);
                true
            }
        }
    }

    /// Inserts `edge` unless an edge between the same endpoints exists.
    ///
    /// Edges are deduplicated on their endpoints rather than on [`EdgeId`],
    /// since distinct endpoint pairs can render to the same id string.
    ///
    /// Returns `true` if the edge was inserted.
    ///
    /// # Panics
    /// Panics in debug builds if either endpoint is not a node of this graph.
    pub fn insert_edge(&mut self, edge: GraphEdge) -> bool {
        #[cfg(debug_assertions)]
        {
            assert!(
                self.nodes.contains_key(&edge.source),
                "Adding edge: Source node {} does not exist for {}",
                edge.source,
                edge.id,
            );
            assert!(
                self.nodes.contains_key(&edge.target),
                "Adding edge: Target node {} does not exist for {}",
                edge.target,
                edge.id,
            );
        }

        match self.edges.entry((edge.source.clone(), edge.target.clone())) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(edge);
                true
            }
        }
    }

    pub(crate) fn push_warning(&mut self, warning: LayoutWarning) {
        self.warnings.push(warning);
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Returns the edge from `source` to `target`, if any.
    pub fn edge(&self, source: &NodeId, target: &NodeId) -> Option<&GraphEdge> {
        self.edges.get(&(source.clone(), target.clone()))
    }

    /// Returns the nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Returns the edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the warnings recorded while the graph was built.
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    /// Returns the smallest bounds containing every node, or `None` for an
    /// empty graph.
    pub fn bounds(&self) -> Option<Bounds> {
        self.nodes
            .values()
            .map(GraphNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Computes the selection emphasis of every node and edge.
    ///
    /// See [`highlight::highlight`].
    pub fn highlight(&self, selected: Option<&NodeId>) -> Highlighted<'_> {
        highlight::highlight(self.nodes(), self.edges(), selected)
    }
}
