//! Base visual definitions for diagram elements.
//!
//! Styles here are the *base* layer assigned once by the layout builder.
//! Selection emphasis (opacity, thicker active edges) is computed separately
//! and applied on top at export time, so base styles never carry highlight
//! state.

mod edge_style;
mod layer;
mod node_style;
mod stroke;

pub use edge_style::{EDGE_WIDTH, EdgeCurve, EdgeStyle};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use node_style::{BORDER_WIDTH, CORNER_RADIUS, NodeStyle, PADDING};
pub use stroke::{StrokeDefinition, StrokeStyle};
