//! Selection emphasis.
//!
//! Selecting a node brings its one-hop neighborhood forward and fades the
//! rest of the diagram. The result is a view over the graph's nodes and
//! edges; their base styles are left untouched, so clearing the selection
//! needs no undo.

use eventflow_core::{color::Color, draw::EDGE_WIDTH, identifier::NodeId};

use crate::graph::{GraphEdge, GraphNode};

/// Opacity of nodes outside the selected neighborhood.
pub const DIMMED_NODE_OPACITY: f32 = 0.3;

/// Opacity of edges not incident to the selected node.
pub const DIMMED_EDGE_OPACITY: f32 = 0.15;

/// Stroke width of edges incident to the selected node.
pub const ACTIVE_EDGE_WIDTH: f32 = 3.0;

/// How an element is drawn relative to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Nothing is selected.
    Normal,
    /// The element is the selected node, a neighbor of it, or an edge
    /// touching it.
    Connected,
    /// Something else is selected.
    Dimmed,
}

/// A node together with its emphasis.
#[derive(Debug, Clone, Copy)]
pub struct HighlightedNode<'a> {
    node: &'a GraphNode,
    emphasis: Emphasis,
}

impl<'a> HighlightedNode<'a> {
    pub fn node(&self) -> &'a GraphNode {
        self.node
    }

    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    pub fn opacity(&self) -> f32 {
        match self.emphasis {
            Emphasis::Normal | Emphasis::Connected => 1.0,
            Emphasis::Dimmed => DIMMED_NODE_OPACITY,
        }
    }
}

/// An edge together with its emphasis.
#[derive(Debug, Clone, Copy)]
pub struct HighlightedEdge<'a> {
    edge: &'a GraphEdge,
    emphasis: Emphasis,
}

impl<'a> HighlightedEdge<'a> {
    pub fn edge(&self) -> &'a GraphEdge {
        self.edge
    }

    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    pub fn color(&self) -> Color {
        self.edge.color()
    }

    pub fn opacity(&self) -> f32 {
        match self.emphasis {
            Emphasis::Normal | Emphasis::Connected => 1.0,
            Emphasis::Dimmed => DIMMED_EDGE_OPACITY,
        }
    }

    pub fn stroke_width(&self) -> f32 {
        match self.emphasis {
            Emphasis::Normal => self.edge.style().stroke().width(),
            Emphasis::Connected => ACTIVE_EDGE_WIDTH,
            Emphasis::Dimmed => EDGE_WIDTH,
        }
    }

    pub fn animated(&self) -> bool {
        match self.emphasis {
            Emphasis::Normal => self.edge.style().animated(),
            Emphasis::Connected => true,
            Emphasis::Dimmed => false,
        }
    }
}

/// Nodes and edges with their emphasis, in the order they were given.
#[derive(Debug, Clone)]
pub struct Highlighted<'a> {
    nodes: Vec<HighlightedNode<'a>>,
    edges: Vec<HighlightedEdge<'a>>,
}

impl<'a> Highlighted<'a> {
    pub fn nodes(&self) -> &[HighlightedNode<'a>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[HighlightedEdge<'a>] {
        &self.edges
    }
}

/// Computes the emphasis of every node and edge for `selected`.
///
/// With no selection everything is [`Emphasis::Normal`]. Otherwise the
/// selected node and every node sharing an edge with it are
/// [`Emphasis::Connected`], as are the edges touching the selected node.
/// Neighbors of neighbors are not included.
///
/// A selection that names no node dims the whole diagram.
///
/// # Examples
///
/// ```
/// use eventflow::{FlowBuilder, highlight::Emphasis, identifier::NodeId};
/// use eventflow::semantic::{CommandEvent, FlowDocument};
///
/// let document = FlowDocument::new(vec![CommandEvent::new("Pay", ["Paid"])], vec![]);
/// let graph = FlowBuilder::default().build(&document);
///
/// let view = graph.highlight(Some(&NodeId::event("Paid")));
/// assert!(view.nodes().iter().all(|n| n.emphasis() == Emphasis::Connected));
/// assert_eq!(view.edges()[0].stroke_width(), 3.0);
/// ```
pub fn highlight<'a, N, E>(nodes: N, edges: E, selected: Option<&NodeId>) -> Highlighted<'a>
where
    N: IntoIterator<Item = &'a GraphNode>,
    E: IntoIterator<Item = &'a GraphEdge>,
{
    let Some(selected) = selected else {
        return Highlighted {
            nodes: nodes
                .into_iter()
                .map(|node| HighlightedNode {
                    node,
                    emphasis: Emphasis::Normal,
                })
                .collect(),
            edges: edges
                .into_iter()
                .map(|edge| HighlightedEdge {
                    edge,
                    emphasis: Emphasis::Normal,
                })
                .collect(),
        };
    };

    let edges: Vec<HighlightedEdge<'a>> = edges
        .into_iter()
        .map(|edge| HighlightedEdge {
            edge,
            emphasis: if edge.touches(selected) {
                Emphasis::Connected
            } else {
                Emphasis::Dimmed
            },
        })
        .collect();

    let neighborhood: Vec<&NodeId> = edges
        .iter()
        .filter(|edge| edge.emphasis == Emphasis::Connected)
        .flat_map(|edge| [edge.edge.source(), edge.edge.target()])
        .collect();

    let nodes = nodes
        .into_iter()
        .map(|node| HighlightedNode {
            node,
            emphasis: if node.id() == selected || neighborhood.contains(&node.id()) {
                Emphasis::Connected
            } else {
                Emphasis::Dimmed
            },
        })
        .collect();

    Highlighted { nodes, edges }
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use eventflow_core::semantic::{CommandEvent, PolicyCommand};
    use proptest::{prelude::*, sample::Index};

    use super::*;
    use crate::{
        config::{LayoutConfig, UndeclaredCommands},
        graph::FlowGraph,
        layout::LayoutBuilder,
        selection::Selection,
    };

    fn name_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["A", "B", "C", "D"]).prop_map(str::to_string)
    }

    fn graph_strategy() -> impl Strategy<Value = FlowGraph> {
        let command_events = prop::collection::vec(
            (name_strategy(), prop::collection::vec(name_strategy(), 0..4))
                .prop_map(|(from, to)| CommandEvent::new(from, to)),
            0..6,
        );
        let policy_commands = prop::collection::vec(
            (name_strategy(), name_strategy(), name_strategy())
                .prop_map(|(policy, event, command)| PolicyCommand::new(policy, event, command)),
            0..6,
        );
        (command_events, policy_commands, any::<bool>()).prop_map(|(ce, pc, materialize)| {
            let handling = if materialize {
                UndeclaredCommands::Materialize
            } else {
                UndeclaredCommands::Skip
            };
            let config = LayoutConfig::default().with_undeclared_commands(handling);
            LayoutBuilder::new(&config).build(&ce, &pc)
        })
    }

    fn pick(graph: &FlowGraph, index: Index) -> Option<NodeId> {
        if graph.node_count() == 0 {
            return None;
        }
        graph
            .nodes()
            .nth(index.index(graph.node_count()))
            .map(|node| node.id().clone())
    }

    /// Active edges are exactly the edges incident to the selection.
    fn check_active_edges_are_incident(
        graph: &FlowGraph,
        selected: &NodeId,
    ) -> Result<(), TestCaseError> {
        let view = graph.highlight(Some(selected));
        prop_assert_eq!(view.edges().len(), graph.edge_count());

        for highlighted in view.edges() {
            let edge = highlighted.edge();
            let incident = edge.source() == selected || edge.target() == selected;
            if incident {
                prop_assert_eq!(highlighted.emphasis(), Emphasis::Connected);
                prop_assert_eq!(highlighted.opacity(), 1.0);
                prop_assert_eq!(highlighted.stroke_width(), ACTIVE_EDGE_WIDTH);
                prop_assert!(highlighted.animated());
            } else {
                prop_assert_eq!(highlighted.emphasis(), Emphasis::Dimmed);
                prop_assert_eq!(highlighted.opacity(), DIMMED_EDGE_OPACITY);
                prop_assert_eq!(highlighted.stroke_width(), EDGE_WIDTH);
                prop_assert!(!highlighted.animated());
            }
        }
        Ok(())
    }

    /// Full-opacity nodes are the selection and its direct neighbors.
    fn check_bright_nodes_are_neighborhood(
        graph: &FlowGraph,
        selected: &NodeId,
    ) -> Result<(), TestCaseError> {
        let mut expected: HashSet<&NodeId> = graph
            .edges()
            .filter_map(|edge| {
                if edge.source() == selected {
                    Some(edge.target())
                } else if edge.target() == selected {
                    Some(edge.source())
                } else {
                    None
                }
            })
            .collect();
        expected.insert(selected);

        let view = graph.highlight(Some(selected));
        let bright: HashSet<&NodeId> = view
            .nodes()
            .iter()
            .filter(|node| node.opacity() == 1.0)
            .map(|node| node.node().id())
            .collect();

        prop_assert_eq!(bright, expected);
        for node in view.nodes() {
            if node.emphasis() == Emphasis::Dimmed {
                prop_assert_eq!(node.opacity(), DIMMED_NODE_OPACITY);
            }
        }
        Ok(())
    }

    /// Clicking the same node twice renders like no selection at all.
    fn check_double_click_clears(graph: &FlowGraph, node: &NodeId) -> Result<(), TestCaseError> {
        let mut selection = Selection::default();
        selection.click_node(node);
        selection.click_node(node);
        prop_assert!(selection.selected().is_none());

        let cleared = graph.highlight(selection.selected());
        let unselected = graph.highlight(None);
        let emphases = |view: &Highlighted<'_>| {
            (
                view.nodes().iter().map(HighlightedNode::emphasis).collect::<Vec<_>>(),
                view.edges().iter().map(HighlightedEdge::emphasis).collect::<Vec<_>>(),
            )
        };
        prop_assert_eq!(emphases(&cleared), emphases(&unselected));
        prop_assert!(cleared.nodes().iter().all(|n| n.emphasis() == Emphasis::Normal));
        Ok(())
    }

    proptest! {
        #[test]
        fn active_edges_are_incident(graph in graph_strategy(), index in any::<Index>()) {
            if let Some(selected) = pick(&graph, index) {
                check_active_edges_are_incident(&graph, &selected)?;
            }
        }

        #[test]
        fn bright_nodes_are_neighborhood(graph in graph_strategy(), index in any::<Index>()) {
            if let Some(selected) = pick(&graph, index) {
                check_bright_nodes_are_neighborhood(&graph, &selected)?;
            }
        }

        #[test]
        fn double_click_clears(graph in graph_strategy(), index in any::<Index>()) {
            if let Some(node) = pick(&graph, index) {
                check_double_click_clears(&graph, &node)?;
            }
        }
    }
}
