//! Geometric primitives for diagram layout and positioning.
//!
//! # Coordinate System
//!
//! Eventflow uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! A node's position is its top-left corner. Columns are laid out along X,
//! entities within a column along Y.

use serde::Serialize;

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use eventflow_core::geometry::Point;
/// let p = Point::new(600.0, 75.0);
/// assert_eq!(p.x(), 600.0);
/// assert_eq!(p.y(), 75.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use eventflow_core::geometry::{Bounds, Point, Size};
    /// let command = Bounds::new_from_top_left(Point::new(100.0, 0.0), Size::new(400.0, 44.0));
    /// let policy = Bounds::new_from_top_left(Point::new(1100.0, 75.0), Size::new(400.0, 44.0));
    ///
    /// let combined = command.merge(&policy);
    /// assert_eq!(combined.min_x(), 100.0);
    /// assert_eq!(combined.width(), 1400.0);
    /// assert_eq!(combined.height(), 119.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Expands the bounds by adding insets on every side.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left,
            min_y: self.min_y - insets.top,
            max_x: self.max_x + insets.right,
            max_y: self.max_y + insets.bottom,
        }
    }
}

/// Represents spacing around an element with potentially different values
/// for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with the same value on all four sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_midpoint() {
        let mid = Point::new(500.0, 0.0).midpoint(Point::new(600.0, 100.0));
        assert_approx_eq!(f32, mid.x(), 550.0);
        assert_approx_eq!(f32, mid.y(), 50.0);
    }

    #[test]
    fn test_bounds_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(600.0, 75.0), Size::new(400.0, 44.0));
        assert_approx_eq!(f32, bounds.max_x(), 1000.0);
        assert_approx_eq!(f32, bounds.max_y(), 119.0);
    }

    #[test]
    fn test_bounds_merge_with_negative_coordinates() {
        let a = Bounds::new_from_top_left(Point::new(100.0, -50.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let merged = a.merge(&b);

        assert_approx_eq!(f32, merged.min_x(), 0.0);
        assert_approx_eq!(f32, merged.min_y(), -50.0);
        assert_approx_eq!(f32, merged.width(), 110.0);
        assert_approx_eq!(f32, merged.height(), 60.0);
    }

    #[test]
    fn test_bounds_add_padding() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0))
            .add_padding(Insets::uniform(35.0));

        assert_approx_eq!(f32, bounds.min_x(), -35.0);
        assert_approx_eq!(f32, bounds.min_y(), -35.0);
        assert_approx_eq!(f32, bounds.width(), 170.0);
        assert_approx_eq!(f32, bounds.height(), 120.0);
    }
}
