//! Shimmer View
//!
//! A loading-placeholder effect: a bright band sweeps repeatedly across
//! caller-supplied content by animating an opacity mask over it.
//!
//! # Components
//!
//! - [`ShimmerConfiguration`]: sweep parameters, compared by full equality
//! - [`MaskGeometry`]: pure mapping from configuration and content size to
//!   mask extent, travel distance, gradient stops and cycle duration
//! - [`SweepAnimationDriver`]: installs, retimes and replaces the repeating slide
//! - [`FadeTransitionController`]: begin/end fades with interruption continuity
//! - [`ShimmerView`]: the orchestrator hosts talk to
//!
//! # Example
//!
//! ```rust
//! use shimmer_animation::AnimationCompositor;
//! use shimmer_core::Size;
//! use shimmer_view::ShimmerView;
//!
//! let compositor = AnimationCompositor::new();
//! let mut view = ShimmerView::new(compositor.handle());
//! view.set_bounds(Size::new(200.0, 40.0));
//! view.set_shimmering(true);
//! assert!(view.has_mask());
//!
//! view.set_shimmering(false);
//! compositor.advance(1.0);
//! view.process_completions();
//! assert!(!view.has_mask());
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod fade;
pub mod geometry;
pub mod mask;
pub mod view;

pub use config::{ConfigurationChange, Direction, GradientProfile, ShimmerConfiguration};
pub use driver::{SweepAnimationDriver, SweepState, SweepTimeBase};
pub use error::{ConfigError, Result};
pub use fade::{FadePhase, FadeTransitionController};
pub use geometry::MaskGeometry;
pub use mask::{MaskAnimationKey, MaskSnapshot, ShimmerMask};
pub use view::ShimmerView;
