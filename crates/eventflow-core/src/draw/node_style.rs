//! Base visual style of a diagram node.

use serde::Serialize;

use crate::{color::Color, draw::StrokeDefinition, geometry::Size};

/// Border width shared by every node kind.
pub const BORDER_WIDTH: f32 = 2.0;

/// Corner radius shared by every node kind.
pub const CORNER_RADIUS: f32 = 8.0;

/// Inner padding between the border and the label.
pub const PADDING: f32 = 10.0;

/// Base style of a node: a filled, bordered, rounded box holding a single
/// line of label text.
///
/// Width and font size are layout constants supplied by the caller; the
/// height follows from the font size and padding.
///
/// # Examples
///
/// ```
/// use eventflow_core::{color::Color, draw::NodeStyle};
///
/// let fill = Color::new("#3b82f6").unwrap();
/// let border = Color::new("#2563eb").unwrap();
/// let style = NodeStyle::filled(fill, border, 400.0, 16.0);
///
/// assert_eq!(style.fill(), fill);
/// assert_eq!(style.border().color(), border);
/// assert_eq!(style.size().width(), 400.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    fill: Color,
    text_color: Color,
    border: StrokeDefinition,
    corner_radius: f32,
    padding: f32,
    width: f32,
    font_size: f32,
}

impl NodeStyle {
    /// Creates a style with white label text and the shared border, radius,
    /// and padding.
    pub fn filled(fill: Color, border_color: Color, width: f32, font_size: f32) -> Self {
        Self {
            fill,
            text_color: Color::new("#ffffff").expect("'#ffffff' is a valid CSS color"),
            border: StrokeDefinition::solid(border_color, BORDER_WIDTH),
            corner_radius: CORNER_RADIUS,
            padding: PADDING,
            width,
            font_size,
        }
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn border(&self) -> &StrokeDefinition {
        &self.border
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the rendered box size, including padding and border.
    pub fn size(&self) -> Size {
        let height = self.font_size + 2.0 * (self.padding + self.border.width());
        Size::new(self.width, height)
    }
}
