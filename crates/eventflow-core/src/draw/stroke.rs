//! Stroke and line-style definitions.
//!
//! [`StrokeDefinition`] describes a node border or an edge line: color, width,
//! and dash pattern. The [`apply_stroke!`](crate::apply_stroke!) macro applies
//! it to any SVG element.
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke` | `"#64748b"` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"5,5"` |

use serde::Serialize;

use crate::color::Color;

/// Defines the visual style of a stroke.
///
/// # SVG Mapping
///
/// - `Solid`: No dasharray attribute
/// - `Dashed`: "5,5"
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line with equal dash and gap lengths (5px dash, 5px gap)
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use eventflow_core::draw::{StrokeDefinition, StrokeStyle};
/// use eventflow_core::color::Color;
///
/// let slate = StrokeDefinition::solid(Color::new("#64748b").unwrap(), 2.0);
/// assert_eq!(slate.width(), 2.0);
/// assert_eq!(slate.style(), StrokeStyle::Solid);
///
/// let flowing = StrokeDefinition::dashed(slate.color(), 3.0);
/// assert_eq!(flowing.style(), StrokeStyle::Dashed);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a solid stroke (convenience constructor).
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke (convenience constructor).
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Dashed,
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// # Examples
///
/// ```
/// use eventflow_core::draw::StrokeDefinition;
/// use eventflow_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::dashed(Color::new("#10b981").unwrap(), 2.0);
/// let path = svg_element::Path::new().set("d", "M 0 0 H 10");
///
/// let path = eventflow_core::apply_stroke!(path, &stroke);
/// let rendered = path.to_string();
/// assert!(rendered.contains("stroke-dasharray=\"5,5\""));
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_hex())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
