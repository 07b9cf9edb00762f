//! The layout passes, written as folds over the input records.
//!
//! Each pass threads a [`LayoutState`] through the records it consumes, so
//! any prefix of the input can be laid out and inspected on its own.

use indexmap::IndexMap;
use log::{debug, trace, warn};

use eventflow_core::{
    color::Color,
    draw::{EdgeCurve, EdgeStyle, NodeStyle},
    geometry::Point,
    identifier::NodeId,
    semantic::{CommandEvent, PolicyCommand},
};

use super::{
    LayoutWarning, Resolution,
    palette::{self, Swatches},
};
use crate::{
    config::{LayoutConfig, UndeclaredCommands},
    graph::{FlowGraph, GraphEdge, GraphNode},
};

/// State carried from record to record and from pass to pass.
#[derive(Debug, Default)]
struct LayoutState {
    /// Running vertical cursor shared by the command, external-event, and
    /// materialized-command placements.
    y_offset: f32,
    /// Number of distinct policies placed so far.
    policy_count: usize,
    graph: FlowGraph,
}

/// Builds a positioned [`FlowGraph`] from input records.
///
/// # Placement rules
///
/// 1. **Commands**: for a command with `k` events, a band of height
///    `(k - 1) * event_step` is reserved at the cursor. The command sits at
///    the middle of the band, its `i`-th event at `cursor + i * event_step`.
///    The cursor then advances by the band height plus `spacing`.
/// 2. **External events**: every triggering event that no command emits is
///    placed at the cursor, which advances by `spacing`.
/// 3. **Colors**: each triggering event gets a palette color
///    ([`palette::color_of`]).
/// 4. **Policies**: the `n`-th distinct policy is placed at
///    `n * spacing`, in its event's color.
///
/// Whenever an entity is declared again, the existing node is kept as is.
///
/// # Examples
///
/// ```
/// use eventflow::{config::LayoutConfig, layout::LayoutBuilder};
/// use eventflow::semantic::{CommandEvent, PolicyCommand};
/// use eventflow::identifier::NodeId;
///
/// let config = LayoutConfig::default();
/// let graph = LayoutBuilder::new(&config).build(
///     &[CommandEvent::new("PlaceOrder", ["OrderPlaced", "PaymentRequested"])],
///     &[PolicyCommand::new("Charge", "PaymentRequested", "PlaceOrder")],
/// );
///
/// let command = graph.node(&NodeId::command("PlaceOrder")).unwrap();
/// assert_eq!(command.position().y(), 50.0);
/// assert_eq!(graph.edge_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutBuilder<'a> {
    config: &'a LayoutConfig,
    curve: EdgeCurve,
}

impl<'a> LayoutBuilder<'a> {
    /// Creates a builder using the given layout constants and smooth-step edges.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            curve: EdgeCurve::default(),
        }
    }

    /// Sets the routing of every edge the builder creates.
    pub fn with_edge_curve(mut self, curve: EdgeCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Lays out the records. Never fails; see [`FlowGraph::warnings`] for
    /// input that looked suspicious.
    pub fn build(
        &self,
        command_events: &[CommandEvent],
        policy_commands: &[PolicyCommand],
    ) -> FlowGraph {
        let state = command_events
            .iter()
            .fold(LayoutState::default(), |state, record| {
                self.place_command(state, record)
            });
        debug!(
            nodes = state.graph.node_count(),
            y_offset = state.y_offset;
            "Commands pass complete"
        );

        let state = policy_commands
            .iter()
            .fold(state, |state, record| self.place_external_event(state, record));
        debug!(
            nodes = state.graph.node_count(),
            y_offset = state.y_offset;
            "External events pass complete"
        );

        let event_colors = event_colors(policy_commands);
        debug!(colors = event_colors.len(); "Event colors assigned");

        let state = policy_commands.iter().fold(state, |state, record| {
            self.place_policy(state, record, &event_colors)
        });
        debug!(policies = state.policy_count; "Policies pass complete");

        state.graph
    }

    fn place_command(&self, mut state: LayoutState, record: &CommandEvent) -> LayoutState {
        let swatches = Swatches::get();
        let band = (record.to.len() as f32 - 1.0) * self.config.event_step();
        let command_id = NodeId::command(record.from.as_str());

        let position = Point::new(self.config.command_x(), state.y_offset + band / 2.0);
        self.add_node(
            &mut state,
            command_id.clone(),
            position,
            swatches.command_fill,
            swatches.command_border,
        );

        for (index, event) in record.to.iter().enumerate() {
            let event_id = NodeId::event(event.as_str());
            let y = state.y_offset + index as f32 * self.config.event_step();
            self.add_node(
                &mut state,
                event_id.clone(),
                Point::new(self.config.event_x(), y),
                swatches.event_fill,
                swatches.event_border,
            );
            self.add_edge(&mut state, command_id.clone(), event_id, swatches.connector);
        }

        state.y_offset += band + self.config.spacing();
        state
    }

    fn place_external_event(&self, mut state: LayoutState, record: &PolicyCommand) -> LayoutState {
        let event_id = NodeId::event(record.from_event.as_str());
        if state.graph.contains_node(&event_id) {
            return state;
        }

        trace!(event = record.from_event; "Placing external event");
        let swatches = Swatches::get();
        let position = Point::new(self.config.event_x(), state.y_offset);
        self.add_node(
            &mut state,
            event_id,
            position,
            swatches.event_fill,
            swatches.event_border,
        );
        state.y_offset += self.config.spacing();
        state
    }

    fn place_policy(
        &self,
        mut state: LayoutState,
        record: &PolicyCommand,
        event_colors: &IndexMap<&str, Color>,
    ) -> LayoutState {
        let color = event_colors
            .get(record.from_event.as_str())
            .copied()
            .unwrap_or_else(|| palette::color_of(&record.from_event));
        let policy_id = NodeId::policy(record.policy.as_str());
        let event_id = NodeId::event(record.from_event.as_str());
        let command_id = NodeId::command(record.to_command.as_str());

        let position = Point::new(
            self.config.policy_x(),
            state.policy_count as f32 * self.config.spacing(),
        );
        if self.add_node(&mut state, policy_id.clone(), position, color, color) {
            state.policy_count += 1;
        }

        self.add_edge(&mut state, event_id, policy_id.clone(), color);

        if !state.graph.contains_node(&command_id) {
            let resolution = match self.config.undeclared_commands() {
                UndeclaredCommands::Skip => Resolution::EdgeDropped,
                UndeclaredCommands::Materialize => {
                    let swatches = Swatches::get();
                    let position = Point::new(self.config.command_x(), state.y_offset);
                    self.add_node(
                        &mut state,
                        command_id.clone(),
                        position,
                        swatches.command_fill,
                        swatches.command_border,
                    );
                    state.y_offset += self.config.spacing();
                    Resolution::NodeCreated
                }
            };
            warn!(
                policy = record.policy,
                command = record.to_command,
                resolution:% = resolution;
                "Policy issues an undeclared command"
            );
            state.graph.push_warning(LayoutWarning::UndeclaredCommand {
                policy: record.policy.clone(),
                command: record.to_command.clone(),
                resolution,
            });
        }

        if state.graph.contains_node(&command_id) {
            self.add_edge(&mut state, policy_id, command_id, color);
        }

        state
    }

    /// Inserts a node unless one with the same id exists. Returns `true` if
    /// the node was created.
    fn add_node(
        &self,
        state: &mut LayoutState,
        id: NodeId,
        position: Point,
        fill: Color,
        border: Color,
    ) -> bool {
        let kind = id.kind();
        let empty_label = id.label().is_empty();
        let style = NodeStyle::filled(
            fill,
            border,
            self.config.node_width(),
            self.config.font_size(),
        );

        let created = state.graph.insert_node(GraphNode::new(id, position, style));
        if created && empty_label {
            warn!(kind:% = kind; "Node created with an empty name");
            state.graph.push_warning(LayoutWarning::EmptyLabel { kind });
        }
        created
    }

    fn add_edge(&self, state: &mut LayoutState, source: NodeId, target: NodeId, color: Color) {
        let style = EdgeStyle::connector(color, self.curve);
        state
            .graph
            .insert_edge(GraphEdge::new(source, target, style));
    }
}

/// Assigns a palette color to every distinct triggering event, in first-seen
/// order.
fn event_colors(policy_commands: &[PolicyCommand]) -> IndexMap<&str, Color> {
    let mut colors = IndexMap::new();
    for record in policy_commands {
        colors
            .entry(record.from_event.as_str())
            .or_insert_with(|| palette::color_of(&record.from_event));
    }
    colors
}

#[cfg(test)]
mod tests {
    use eventflow_core::identifier::NodeKind;

    use super::*;

    fn build(command_events: &[CommandEvent], policy_commands: &[PolicyCommand]) -> FlowGraph {
        LayoutBuilder::new(&LayoutConfig::default()).build(command_events, policy_commands)
    }

    fn position(graph: &FlowGraph, id: &NodeId) -> (f32, f32) {
        let point = graph
            .node(id)
            .unwrap_or_else(|| panic!("node {id} should exist"))
            .position();
        (point.x(), point.y())
    }

    #[test]
    fn test_empty_input() {
        let graph = build(&[], &[]);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.warnings().is_empty());
    }

    #[test]
    fn test_command_centered_on_its_events() {
        let graph = build(
            &[CommandEvent::new("Checkout", ["A", "B", "C"])],
            &[],
        );

        assert_eq!(position(&graph, &NodeId::command("Checkout")), (100.0, 100.0));
        assert_eq!(position(&graph, &NodeId::event("A")), (600.0, 0.0));
        assert_eq!(position(&graph, &NodeId::event("B")), (600.0, 100.0));
        assert_eq!(position(&graph, &NodeId::event("C")), (600.0, 200.0));
    }

    #[test]
    fn test_cursor_advances_by_band_and_spacing() {
        let graph = build(
            &[
                CommandEvent::new("First", ["A", "B"]),
                CommandEvent::new("Second", ["C"]),
                CommandEvent::new("Third", ["D", "E"]),
            ],
            &[],
        );

        // First: band 100, cursor 0 -> 175
        assert_eq!(position(&graph, &NodeId::command("First")), (100.0, 50.0));
        // Second: band 0, cursor 175 -> 250
        assert_eq!(position(&graph, &NodeId::command("Second")), (100.0, 175.0));
        assert_eq!(position(&graph, &NodeId::event("C")), (600.0, 175.0));
        // Third: band 100 at cursor 250
        assert_eq!(position(&graph, &NodeId::command("Third")), (100.0, 300.0));
        assert_eq!(position(&graph, &NodeId::event("E")), (600.0, 350.0));
    }

    #[test]
    fn test_command_without_events_is_degenerate_but_valid() {
        let graph = build(
            &[CommandEvent::new("Noop", Vec::<String>::new()), CommandEvent::new("Next", ["E"])],
            &[],
        );

        // Band of -100: command at -50, cursor advances by -25.
        assert_eq!(position(&graph, &NodeId::command("Noop")), (100.0, -50.0));
        assert_eq!(position(&graph, &NodeId::command("Next")), (100.0, -25.0));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_repeated_command_keeps_first_position() {
        let graph = build(
            &[
                CommandEvent::new("Pay", ["Paid"]),
                CommandEvent::new("Refund", ["Refunded"]),
                CommandEvent::new("Pay", ["PaymentFailed"]),
            ],
            &[],
        );

        let commands = graph
            .nodes()
            .filter(|node| node.id() == &NodeId::command("Pay"))
            .count();
        assert_eq!(commands, 1);
        assert_eq!(position(&graph, &NodeId::command("Pay")), (100.0, 0.0));
        // The repeated declaration still reserves its band and adds its edge.
        assert_eq!(position(&graph, &NodeId::event("PaymentFailed")), (600.0, 150.0));
        assert!(graph
            .edge(&NodeId::command("Pay"), &NodeId::event("PaymentFailed"))
            .is_some());
    }

    #[test]
    fn test_shared_event_is_not_moved() {
        let graph = build(
            &[
                CommandEvent::new("Create", ["Changed"]),
                CommandEvent::new("Update", ["Other", "Changed"]),
            ],
            &[],
        );

        assert_eq!(position(&graph, &NodeId::event("Changed")), (600.0, 0.0));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_same_command_twice_with_same_event_adds_one_edge() {
        let graph = build(
            &[
                CommandEvent::new("Ping", ["Ponged"]),
                CommandEvent::new("Ping", ["Ponged"]),
            ],
            &[],
        );
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_command_and_event_with_same_name_are_distinct() {
        let graph = build(&[CommandEvent::new("Foo", ["Foo"])], &[]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node(&NodeId::command("Foo")).unwrap().kind(), NodeKind::Command);
        assert_eq!(graph.node(&NodeId::event("Foo")).unwrap().kind(), NodeKind::Event);
    }

    #[test]
    fn test_external_events_go_below_commands() {
        let graph = build(
            &[CommandEvent::new("Register", ["Registered", "Welcomed"])],
            &[
                PolicyCommand::new("Audit", "ExternalAudit", "Register"),
                PolicyCommand::new("Sync", "Registered", "Register"),
                PolicyCommand::new("Mirror", "CrmUpdated", "Register"),
                PolicyCommand::new("Audit2", "ExternalAudit", "Register"),
            ],
        );

        // Cursor after the command: 100 + 75
        assert_eq!(position(&graph, &NodeId::event("ExternalAudit")), (600.0, 175.0));
        assert_eq!(position(&graph, &NodeId::event("CrmUpdated")), (600.0, 250.0));
        assert_eq!(position(&graph, &NodeId::event("Registered")), (600.0, 0.0));
    }

    #[test]
    fn test_policies_stack_by_distinct_count() {
        let graph = build(
            &[CommandEvent::new("Ship", ["Shipped"])],
            &[
                PolicyCommand::new("A", "Shipped", "Ship"),
                PolicyCommand::new("B", "Shipped", "Ship"),
                PolicyCommand::new("A", "Shipped", "Ship"),
                PolicyCommand::new("C", "Shipped", "Ship"),
            ],
        );

        assert_eq!(position(&graph, &NodeId::policy("A")), (1100.0, 0.0));
        assert_eq!(position(&graph, &NodeId::policy("B")), (1100.0, 75.0));
        assert_eq!(position(&graph, &NodeId::policy("C")), (1100.0, 150.0));
    }

    #[test]
    fn test_repeated_policy_record_adds_edges_once() {
        let record = PolicyCommand::new("Notify", "Placed", "Place");
        let graph = build(
            &[CommandEvent::new("Place", ["Placed"])],
            &[record.clone(), record],
        );

        // command->event, event->policy, policy->command
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_policy_edges_use_event_color() {
        let graph = build(
            &[CommandEvent::new("Place", ["Placed"])],
            &[PolicyCommand::new("Notify", "Placed", "Place")],
        );
        let expected = palette::color_of("Placed");

        let policy = graph.node(&NodeId::policy("Notify")).unwrap();
        assert_eq!(policy.color(), expected);
        assert_eq!(policy.style().border().color(), expected);

        let (command, event, policy) = (
            NodeId::command("Place"),
            NodeId::event("Placed"),
            NodeId::policy("Notify"),
        );
        assert_eq!(graph.edge(&event, &policy).unwrap().color(), expected);
        assert_eq!(graph.edge(&policy, &command).unwrap().color(), expected);
        assert_eq!(graph.edge(&command, &event).unwrap().color().to_hex(), "#64748b");
    }

    #[test]
    fn test_lookalike_edge_ids_keep_both_edges() {
        let graph = build(
            &[
                CommandEvent::new("X", ["event-Y"]),
                CommandEvent::new("X-event", ["Y"]),
            ],
            &[],
        );

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.edge(&NodeId::command("X"), &NodeId::event("event-Y")).is_some());
        assert!(graph.edge(&NodeId::command("X-event"), &NodeId::event("Y")).is_some());
    }

    #[test]
    fn test_policy_keeps_color_of_first_event() {
        let graph = build(
            &[],
            &[
                PolicyCommand::new("Shared", "A", "X"),
                PolicyCommand::new("Shared", "AB", "X"),
            ],
        );

        // "A" -> orange, "AB" -> cyan; the node keeps its first color.
        assert_eq!(graph.node(&NodeId::policy("Shared")).unwrap().color().to_hex(), "#f97316");
        let second_edge = graph.edge(&NodeId::event("AB"), &NodeId::policy("Shared"));
        assert_eq!(second_edge.unwrap().color().to_hex(), "#06b6d4");
    }

    #[test]
    fn test_undeclared_command_edge_is_skipped_with_warning() {
        let graph = build(
            &[CommandEvent::new("Place", ["Placed"])],
            &[PolicyCommand::new("Notify", "Placed", "Ship")],
        );

        assert!(!graph.contains_node(&NodeId::command("Ship")));
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.warnings(),
            [LayoutWarning::UndeclaredCommand {
                policy: "Notify".to_string(),
                command: "Ship".to_string(),
                resolution: Resolution::EdgeDropped,
            }]
        );
    }

    #[test]
    fn test_undeclared_command_materialized_at_cursor() {
        let config = LayoutConfig::default().with_undeclared_commands(UndeclaredCommands::Materialize);
        let graph = LayoutBuilder::new(&config).build(
            &[CommandEvent::new("Place", ["Placed"])],
            &[
                PolicyCommand::new("Notify", "Placed", "Ship"),
                PolicyCommand::new("Remind", "Placed", "Ship"),
                PolicyCommand::new("Bill", "Placed", "Invoice"),
            ],
        );

        assert_eq!(position(&graph, &NodeId::command("Ship")), (100.0, 75.0));
        assert_eq!(position(&graph, &NodeId::command("Invoice")), (100.0, 150.0));
        assert!(graph.edge(&NodeId::policy("Remind"), &NodeId::command("Ship")).is_some());
        // Only the first reference to each command is undeclared.
        assert_eq!(graph.warnings().len(), 2);
    }

    #[test]
    fn test_empty_labels_are_warned_once() {
        let graph = build(
            &[CommandEvent::new("", [""]), CommandEvent::new("", [""])],
            &[],
        );

        assert_eq!(graph.node_count(), 2);
        assert_eq!(
            graph.warnings(),
            [
                LayoutWarning::EmptyLabel { kind: NodeKind::Command },
                LayoutWarning::EmptyLabel { kind: NodeKind::Event },
            ]
        );
    }

    #[test]
    fn test_every_edge_references_existing_nodes() {
        let graph = build(
            &[
                CommandEvent::new("A", ["E1", "E2"]),
                CommandEvent::new("B", ["E2"]),
            ],
            &[
                PolicyCommand::new("P1", "E1", "B"),
                PolicyCommand::new("P2", "Ext", "Missing"),
            ],
        );

        for edge in graph.edges() {
            assert!(graph.contains_node(edge.source()), "{} missing source", edge.id());
            assert!(graph.contains_node(edge.target()), "{} missing target", edge.id());
        }
    }

    #[test]
    fn test_edge_curve_is_applied() {
        let config = LayoutConfig::default();
        let graph = LayoutBuilder::new(&config)
            .with_edge_curve(EdgeCurve::Straight)
            .build(&[CommandEvent::new("A", ["B"])], &[]);

        assert!(graph.edges().all(|edge| edge.style().curve() == EdgeCurve::Straight));
    }
}

#[cfg(test)]
mod proptest_tests {
    use eventflow_core::identifier::NodeKind;
    use proptest::prelude::*;

    use super::*;

    fn name_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["A", "B", "C", "D", "E", ""]).prop_map(str::to_string)
    }

    fn command_events_strategy() -> impl Strategy<Value = Vec<CommandEvent>> {
        prop::collection::vec(
            (name_strategy(), prop::collection::vec(name_strategy(), 0..4))
                .prop_map(|(from, to)| CommandEvent::new(from, to)),
            0..6,
        )
    }

    fn policy_commands_strategy() -> impl Strategy<Value = Vec<PolicyCommand>> {
        prop::collection::vec(
            (name_strategy(), name_strategy(), name_strategy())
                .prop_map(|(policy, event, command)| PolicyCommand::new(policy, event, command)),
            0..6,
        )
    }

    fn build(command_events: &[CommandEvent], policy_commands: &[PolicyCommand]) -> FlowGraph {
        LayoutBuilder::new(&LayoutConfig::default()).build(command_events, policy_commands)
    }

    /// Every node sits in the column of its kind.
    fn check_column_invariant(graph: &FlowGraph) -> Result<(), TestCaseError> {
        for node in graph.nodes() {
            let expected = match node.kind() {
                NodeKind::Command => 100.0,
                NodeKind::Event => 600.0,
                NodeKind::Policy => 1100.0,
            };
            prop_assert_eq!(node.position().x(), expected, "{} in wrong column", node.id());
        }
        Ok(())
    }

    /// Edges never dangle.
    fn check_edges_reference_nodes(graph: &FlowGraph) -> Result<(), TestCaseError> {
        for edge in graph.edges() {
            prop_assert!(graph.contains_node(edge.source()));
            prop_assert!(graph.contains_node(edge.target()));
        }
        Ok(())
    }

    /// Appending records never moves a node created by the prefix.
    fn check_prefix_positions_are_stable(
        command_events: &[CommandEvent],
        policy_commands: &[PolicyCommand],
    ) -> Result<(), TestCaseError> {
        let split = command_events.len() / 2;
        let prefix = build(&command_events[..split], &[]);
        let full = build(command_events, policy_commands);

        for node in prefix.nodes() {
            let later = full.node(node.id()).expect("prefix nodes survive");
            prop_assert_eq!(later.position(), node.position());
        }
        Ok(())
    }

    /// Two builds of the same input are identical, node order included.
    fn check_deterministic(
        command_events: &[CommandEvent],
        policy_commands: &[PolicyCommand],
    ) -> Result<(), TestCaseError> {
        let first = build(command_events, policy_commands);
        let second = build(command_events, policy_commands);

        prop_assert!(first.nodes().eq(second.nodes()));
        prop_assert!(first.edges().eq(second.edges()));
        Ok(())
    }

    proptest! {
        #[test]
        fn column_invariant(ce in command_events_strategy(), pc in policy_commands_strategy()) {
            check_column_invariant(&build(&ce, &pc))?;
        }

        #[test]
        fn edges_reference_nodes(ce in command_events_strategy(), pc in policy_commands_strategy()) {
            check_edges_reference_nodes(&build(&ce, &pc))?;
        }

        #[test]
        fn prefix_positions_are_stable(ce in command_events_strategy(), pc in policy_commands_strategy()) {
            check_prefix_positions_are_stable(&ce, &pc)?;
        }

        #[test]
        fn deterministic(ce in command_events_strategy(), pc in policy_commands_strategy()) {
            check_deterministic(&ce, &pc)?;
        }
    }
}
