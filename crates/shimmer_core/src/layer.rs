//! Layer value types for shimmer masks
//!
//! A shimmer mask is a gradient layer positioned over caller-owned content.
//! This module provides the geometry and color types that describe such a
//! layer, independent of any renderer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─────────────────────────────────────────────────────────────────────────────
// Core Geometry Types
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }
}

/// Axis a shimmer sweep travels along
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Length of `size` along this axis
    pub fn extent(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Length of `size` across this axis
    pub fn cross_extent(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.height,
            Axis::Vertical => size.width,
        }
    }

    /// Build a size with `along` on this axis and `across` on the other
    pub fn size(self, along: f32, across: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(along, across),
            Axis::Vertical => Size::new(across, along),
        }
    }

    /// Point displaced by `offset` along this axis
    pub fn point(self, offset: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(offset, 0.0),
            Axis::Vertical => Point::new(0.0, offset),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color and Gradient Types
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color (linear space)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Neutral white carrying `alpha`
    ///
    /// Mask gradients encode "how much content shows through" purely in alpha.
    pub const fn white(alpha: f32) -> Self {
        Self::rgba(1.0, 1.0, 1.0, alpha)
    }
}

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    /// Create a new gradient stop
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Stops inline up to the seven used by the feathered mask profile
pub type GradientStops = SmallVec<[GradientStop; 8]>;

/// Linear gradient in object-bounding-box space (0.0-1.0)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: GradientStops,
}

impl LinearGradient {
    /// Create a gradient running edge to edge along `axis`
    pub fn along(axis: Axis, stops: impl IntoIterator<Item = GradientStop>) -> Self {
        let (start, end) = match axis {
            Axis::Horizontal => (Point::new(0.0, 0.5), Point::new(1.0, 0.5)),
            Axis::Vertical => (Point::new(0.5, 0.0), Point::new(0.5, 1.0)),
        };
        Self {
            start,
            end,
            stops: stops.into_iter().collect(),
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_extents() {
        let size = Size::new(200.0, 40.0);
        assert_eq!(Axis::Horizontal.extent(size), 200.0);
        assert_eq!(Axis::Horizontal.cross_extent(size), 40.0);
        assert_eq!(Axis::Vertical.extent(size), 40.0);
        assert_eq!(Axis::Vertical.size(10.0, 5.0), Size::new(5.0, 10.0));
        assert_eq!(Axis::Vertical.point(3.0), Point::new(0.0, 3.0));
    }

    #[test]
    fn test_gradient_stop_clamps_offset() {
        assert_eq!(GradientStop::new(-0.2, Color::white(1.0)).offset, 0.0);
        assert_eq!(GradientStop::new(1.7, Color::white(1.0)).offset, 1.0);
    }

    #[test]
    fn test_gradient_along_axis() {
        let stops = [
            GradientStop::new(0.25, Color::white(0.5)),
            GradientStop::new(0.5, Color::white(1.0)),
            GradientStop::new(0.75, Color::white(0.5)),
        ];

        let horizontal = LinearGradient::along(Axis::Horizontal, stops);
        assert_eq!(horizontal.start, Point::new(0.0, 0.5));
        assert_eq!(horizontal.end, Point::new(1.0, 0.5));
        assert_eq!(horizontal.stops(), &stops[..]);

        let vertical = LinearGradient::along(Axis::Vertical, []);
        assert_eq!(vertical.start, Point::new(0.5, 0.0));
        assert_eq!(vertical.end, Point::new(0.5, 1.0));
        assert!(vertical.stops().is_empty());
    }
}
