//! Shimmer Animation Runtime
//!
//! Declarative animations played back on an explicit, single-threaded
//! compositor clock.
//!
//! # Features
//!
//! - **Basic Animations**: linear from/to values with duration, begin time,
//!   repeat, play direction and fill mode
//! - **Shared Media Clock**: every animation on a compositor samples the same
//!   time base, so independently started sweeps can be phase-aligned
//! - **Completion Delivery**: finished or removed animations notify their
//!   delegate through a channel, tagged so stale notifications can be ignored
//! - **Weak Handles**: components hold a `CompositorHandle` that degrades to
//!   no-ops once the compositor is gone

pub mod animation;
pub mod compositor;

pub use animation::{BasicAnimation, FillMode, PlayDirection, Repeat};
pub use compositor::{AnimationCompositor, AnimationId, Completion, CompositorHandle, Delegate};
