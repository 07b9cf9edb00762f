//! Eventflow - Command, event, and policy flow diagrams.
//!
//! Turns a list of "command emits events" and "policy reacts to event by
//! issuing command" records into a positioned three-column diagram, and
//! computes which parts of it to emphasize when a node is selected.

pub mod config;
pub mod graph;
pub mod highlight;
pub mod layout;
pub mod selection;

mod error;
mod export;

pub use eventflow_core::{color, draw, geometry, identifier, semantic};

pub use error::FlowError;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use graph::FlowGraph;
use identifier::NodeId;
use layout::LayoutBuilder;
use semantic::FlowDocument;

/// Builder for parsing, laying out, and rendering flow diagrams.
///
/// # Examples
///
/// ```
/// use eventflow::{FlowBuilder, identifier::NodeId};
///
/// let source = r#"{
///     "commandEvents": [{ "from": "PlaceOrder", "to": ["OrderPlaced"] }],
///     "policyCommands": []
/// }"#;
///
/// let builder = FlowBuilder::default();
/// let document = builder.parse(source).expect("Failed to parse");
/// let graph = builder.build(&document);
///
/// let svg = builder
///     .render_svg(&graph, Some(&NodeId::command("PlaceOrder")))
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Default)]
pub struct FlowBuilder {
    config: AppConfig,
}

impl FlowBuilder {
    /// Create a new flow builder with the given configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventflow::{FlowBuilder, config::AppConfig};
    ///
    /// let builder = FlowBuilder::new(AppConfig::default());
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON input document.
    ///
    /// Both `commandEvents` and `policyCommands` may be omitted. Records are
    /// accepted as they are: empty names and duplicates are laid out, not
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Input`] if the text is not a well-shaped document.
    pub fn parse(&self, source: &str) -> Result<FlowDocument, FlowError> {
        info!("Parsing input document");

        let document: FlowDocument = serde_json::from_str(source)
            .map_err(|err| FlowError::new_input_error(err, source))?;

        debug!(
            command_events = document.command_events.len(),
            policy_commands = document.policy_commands.len();
            "Input document parsed"
        );
        trace!(document:?; "Parsed document");

        Ok(document)
    }

    /// Lay out a document. Layout never fails.
    pub fn build(&self, document: &FlowDocument) -> FlowGraph {
        info!("Laying out flow");

        let graph = LayoutBuilder::new(self.config.layout())
            .with_edge_curve(self.config.style().edge_curve())
            .build(&document.command_events, &document.policy_commands);

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            warnings = graph.warnings().len();
            "Layout calculated"
        );
        graph
    }

    /// Fails if the layout recorded any warning.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] carrying every recorded warning.
    pub fn deny_warnings(&self, graph: &FlowGraph) -> Result<(), FlowError> {
        if graph.warnings().is_empty() {
            Ok(())
        } else {
            Err(FlowError::Validation(graph.warnings().to_vec()))
        }
    }

    /// Render a laid out graph to an SVG string, emphasizing `selected`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Config`] for an invalid background color and
    /// [`FlowError::Export`] for rendering failures.
    pub fn render_svg(
        &self,
        graph: &FlowGraph,
        selected: Option<&NodeId>,
    ) -> Result<String, FlowError> {
        let svg_exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()
            .map_err(|err| FlowError::Config(err.to_string()))?;

        let svg = svg_exporter.export(graph, selected)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render a laid out graph to the JSON render model, emphasizing `selected`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Export`] if serialization fails.
    pub fn render_json(
        &self,
        graph: &FlowGraph,
        selected: Option<&NodeId>,
    ) -> Result<String, FlowError> {
        let json = export::json::JsonExporter.export(graph, selected)?;
        info!("JSON model rendered successfully");
        Ok(json)
    }
}
