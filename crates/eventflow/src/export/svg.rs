//! SVG rendering of a highlighted flow graph.
//!
//! Every node is a rounded rectangle with its label centered inside. Every
//! edge is a path ending in a closed arrowhead of the edge color; animated
//! edges are dashed and the dashes flow toward the target. The view box is
//! the union of the node bounds plus a fixed margin.

use std::collections::BTreeMap;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use eventflow_core::{
    apply_stroke,
    color::Color,
    draw::{EdgeCurve, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Insets, Point},
    identifier::NodeId,
};

use super::{Error, Exporter};
use crate::{
    config::StyleConfig,
    graph::{FlowGraph, GraphNode},
    highlight::{HighlightedEdge, HighlightedNode},
};

/// Margin around the node bounds.
const CANVAS_PADDING: f32 = 35.0;

/// Largest corner radius of a smooth-step edge.
const STEP_RADIUS: f32 = 5.0;

/// Builder for [`Svg`].
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the configured background color is invalid.
    pub fn build(self) -> Result<Svg, Error> {
        let background = match self.style {
            Some(style) => style.background_color().map_err(Error::Render)?,
            None => None,
        };
        Ok(Svg { background })
    }
}

/// SVG exporter.
#[derive(Debug)]
pub struct Svg {
    background: Option<Color>,
}

impl Exporter for Svg {
    fn export(&self, graph: &FlowGraph, selected: Option<&NodeId>) -> Result<String, Error> {
        let document = self.render(graph, selected)?;
        Ok(document.to_string())
    }
}

impl Svg {
    /// Renders `graph` to an SVG document.
    pub fn render(&self, graph: &FlowGraph, selected: Option<&NodeId>) -> Result<Document, Error> {
        let bounds = graph
            .bounds()
            .unwrap_or_default()
            .add_padding(Insets::uniform(CANVAS_PADDING));
        let view = graph.highlight(selected);

        let mut output = LayeredOutput::new();
        if let Some(background) = self.background {
            output.add_to_layer(RenderLayer::Background, Box::new(render_background(bounds, background)));
        }
        for edge in view.edges() {
            output.merge(render_edge(graph, edge)?);
        }
        for node in view.nodes() {
            output.merge(render_node(node));
        }

        let markers = marker_definitions(view.edges());
        debug!(
            nodes = view.nodes().len(),
            edges = view.edges().len(),
            markers = markers.len();
            "Rendering SVG document"
        );

        let mut defs = svg_element::Definitions::new();
        for marker in markers.into_values() {
            defs = defs.add(marker);
        }

        let document = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    bounds.min_x(),
                    bounds.min_y(),
                    bounds.width(),
                    bounds.height()
                ),
            )
            .set("width", bounds.width())
            .set("height", bounds.height())
            .add(defs);

        let document = output
            .render()
            .into_iter()
            .fold(document, |document, group| document.add(group));

        info!(width = bounds.width(), height = bounds.height(); "SVG rendered");
        Ok(document)
    }
}

fn render_background(bounds: Bounds, color: Color) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", &color)
}

fn render_node(highlighted: &HighlightedNode<'_>) -> LayeredOutput {
    let node = highlighted.node();
    let style = node.style();
    let bounds = node.bounds();
    let mut output = LayeredOutput::new();

    let rect = svg_element::Rectangle::new()
        .set("data-node-id", node.id().to_string())
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("rx", style.corner_radius())
        .set("fill", &style.fill())
        .set("opacity", highlighted.opacity());
    let rect = apply_stroke!(rect, style.border());
    output.add_to_layer(RenderLayer::Node, Box::new(rect));

    let center = Point::new(bounds.min_x(), bounds.min_y())
        .midpoint(Point::new(bounds.max_x(), bounds.max_y()));
    let text = svg_element::Text::new(node.label())
        .set("x", center.x())
        .set("y", center.y())
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("font-family", "sans-serif")
        .set("font-size", style.font_size())
        .set("fill", &style.text_color())
        .set("opacity", highlighted.opacity());
    output.add_to_layer(RenderLayer::Text, Box::new(text));

    output
}

fn render_edge(graph: &FlowGraph, highlighted: &HighlightedEdge<'_>) -> Result<LayeredOutput, Error> {
    let edge = highlighted.edge();
    let endpoint = |id: &NodeId| {
        graph
            .node(id)
            .ok_or_else(|| Error::Render(format!("edge `{}` references unknown node `{id}`", edge.id())))
    };
    let (start, end) = anchor_points(endpoint(edge.source())?, endpoint(edge.target())?);

    let d = match edge.style().curve() {
        EdgeCurve::SmoothStep => smooth_step_path(start, end),
        EdgeCurve::Straight => format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y()),
    };

    let stroke = if highlighted.animated() {
        StrokeDefinition::dashed(highlighted.color(), highlighted.stroke_width())
    } else {
        StrokeDefinition::solid(highlighted.color(), highlighted.stroke_width())
    };

    let path = svg_element::Path::new()
        .set("data-edge-id", edge.id().as_str())
        .set("d", d)
        .set("fill", "none")
        .set("opacity", highlighted.opacity())
        .set("marker-end", format!("url(#{})", marker_id(highlighted.color())));
    let mut path = apply_stroke!(path, &stroke);

    if highlighted.animated() {
        path = path.add(
            svg_element::Animate::new()
                .set("attributeName", "stroke-dashoffset")
                .set("from", 10)
                .set("to", 0)
                .set("dur", "0.5s")
                .set("repeatCount", "indefinite"),
        );
    }

    let mut output = LayeredOutput::new();
    output.add_to_layer(RenderLayer::Edge, Box::new(path));
    Ok(output)
}

/// Picks the facing sides of the two boxes: right to left when the target is
/// to the right of the source, left to right otherwise.
fn anchor_points(source: &GraphNode, target: &GraphNode) -> (Point, Point) {
    let source = source.bounds();
    let target = target.bounds();
    let source_mid = (source.min_y() + source.max_y()) / 2.0;
    let target_mid = (target.min_y() + target.max_y()) / 2.0;

    if target.min_x() >= source.max_x() {
        (
            Point::new(source.max_x(), source_mid),
            Point::new(target.min_x(), target_mid),
        )
    } else {
        (
            Point::new(source.min_x(), source_mid),
            Point::new(target.max_x(), target_mid),
        )
    }
}

/// Horizontal, vertical, horizontal segments joined by quarter curves.
fn smooth_step_path(start: Point, end: Point) -> String {
    let dy = end.y() - start.y();
    if dy == 0.0 {
        return format!("M {} {} H {}", start.x(), start.y(), end.x());
    }

    let mid_x = (start.x() + end.x()) / 2.0;
    let dir_x = if end.x() >= start.x() { 1.0 } else { -1.0 };
    let dir_y = dy.signum();
    let radius = STEP_RADIUS
        .min(dy.abs() / 2.0)
        .min((end.x() - start.x()).abs() / 2.0);

    format!(
        "M {sx} {sy} H {h1} Q {mx} {sy} {mx} {v1} V {v2} Q {mx} {ey} {h2} {ey} H {ex}",
        sx = start.x(),
        sy = start.y(),
        h1 = mid_x - dir_x * radius,
        mx = mid_x,
        v1 = start.y() + dir_y * radius,
        v2 = end.y() - dir_y * radius,
        ey = end.y(),
        h2 = mid_x + dir_x * radius,
        ex = end.x(),
    )
}

fn marker_id(color: Color) -> String {
    format!("arrow-{}", color.to_id_safe_string())
}

/// One closed arrowhead per distinct edge color, keyed by marker id.
fn marker_definitions(edges: &[HighlightedEdge<'_>]) -> BTreeMap<String, svg_element::Marker> {
    edges
        .iter()
        .map(|edge| {
            let id = marker_id(edge.color());
            let marker = svg_element::Marker::new()
                .set("id", id.clone())
                .set("viewBox", "0 0 10 10")
                .set("refX", 10)
                .set("refY", 5)
                .set("markerWidth", 8)
                .set("markerHeight", 8)
                .set("markerUnits", "userSpaceOnUse")
                .set("orient", "auto")
                .add(
                    svg_element::Path::new()
                        .set("d", "M 0 0 L 10 5 L 0 10 z")
                        .set("fill", &edge.color()),
                );
            (id, marker)
        })
        .collect()
}
