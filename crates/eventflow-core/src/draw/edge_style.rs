//! Base visual style of a diagram edge.

use serde::{Deserialize, Serialize};

use crate::{color::Color, draw::StrokeDefinition};

/// Stroke width of an edge at rest.
pub const EDGE_WIDTH: f32 = 2.0;

/// Routing of an edge between two nodes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeCurve {
    /// Horizontal, vertical, horizontal segments with rounded corners.
    #[default]
    SmoothStep,
    /// A single straight segment.
    Straight,
}

/// Base style of an edge.
///
/// Every edge ends in a closed arrowhead drawn in the stroke color.
///
/// # Examples
///
/// ```
/// use eventflow_core::{color::Color, draw::{EdgeCurve, EdgeStyle}};
///
/// let slate = Color::new("#64748b").unwrap();
/// let style = EdgeStyle::connector(slate, EdgeCurve::SmoothStep);
///
/// assert!(style.animated());
/// assert_eq!(style.stroke().width(), 2.0);
/// assert_eq!(style.color(), slate);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeStyle {
    stroke: StrokeDefinition,
    animated: bool,
    curve: EdgeCurve,
}

impl EdgeStyle {
    /// Animated connector with a closed arrowhead.
    pub fn connector(color: Color, curve: EdgeCurve) -> Self {
        Self {
            stroke: StrokeDefinition::solid(color, EDGE_WIDTH),
            animated: true,
            curve,
        }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn color(&self) -> Color {
        self.stroke.color()
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    pub fn curve(&self) -> EdgeCurve {
        self.curve
    }
}
