//! Shimmer Core
//!
//! Foundational value types shared by the shimmer animation engine:
//!
//! - **Geometry**: `Point`, `Size`, `Rect` and the sweep `Axis`
//! - **Color**: linear RGBA colors used as brightness-as-alpha mask values
//! - **Gradients**: `LinearGradient` with clamped `GradientStop`s
//!
//! # Example
//!
//! ```rust
//! use shimmer_core::{Axis, Size};
//!
//! let size = Size::new(200.0, 40.0);
//! assert_eq!(Axis::Horizontal.extent(size), 200.0);
//! assert_eq!(Axis::Vertical.extent(size), 40.0);
//! ```

pub mod layer;

pub use layer::{Axis, Color, GradientStop, LinearGradient, Point, Rect, Size};
