//! Shimmer mask layer
//!
//! The mask is the only object the engine creates. It carries the gradient
//! that dims and brightens the content, the frame that gradient is laid out
//! in, and the animations installed on it, keyed the way a compositor layer
//! keys them.

use crate::config::ShimmerConfiguration;
use crate::geometry::MaskGeometry;
use rustc_hash::FxHashMap;
use serde::Serialize;
use shimmer_animation::{AnimationId, CompositorHandle};
use shimmer_core::{LinearGradient, Rect};

/// Slot an animation occupies on the mask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskAnimationKey {
    /// Repeating translation along the sweep axis
    Slide,
    /// Effect opacity (begin and end fades)
    Fade,
}

impl MaskAnimationKey {
    pub fn as_str(self) -> &'static str {
        match self {
            MaskAnimationKey::Slide => "shimmer.slide",
            MaskAnimationKey::Fade => "shimmer.fade",
        }
    }
}

/// Mask layer state for one shimmering region
#[derive(Debug)]
pub struct ShimmerMask {
    geometry: MaskGeometry,
    frame: Rect,
    gradient: LinearGradient,
    /// Model value of the effect opacity (0.0 = content unmasked)
    effect_opacity: f32,
    animations: FxHashMap<MaskAnimationKey, AnimationId>,
}

impl ShimmerMask {
    /// Create a mask laid out for `geometry`, effect fully transparent
    pub fn new(geometry: MaskGeometry, config: &ShimmerConfiguration) -> Self {
        Self {
            geometry,
            frame: geometry.frame(),
            gradient: geometry.gradient(config),
            effect_opacity: 0.0,
            animations: FxHashMap::default(),
        }
    }

    /// Re-lay out the mask for new geometry or appearance
    pub fn apply_geometry(&mut self, geometry: MaskGeometry, config: &ShimmerConfiguration) {
        self.geometry = geometry;
        self.frame = geometry.frame();
        self.gradient = geometry.gradient(config);
    }

    pub fn geometry(&self) -> &MaskGeometry {
        &self.geometry
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn gradient(&self) -> &LinearGradient {
        &self.gradient
    }

    pub fn effect_opacity(&self) -> f32 {
        self.effect_opacity
    }

    pub fn set_effect_opacity(&mut self, opacity: f32) {
        self.effect_opacity = opacity;
    }

    pub fn animation(&self, key: MaskAnimationKey) -> Option<AnimationId> {
        self.animations.get(&key).copied()
    }

    /// Record `id` under `key`, returning the animation it displaces
    pub fn set_animation(&mut self, key: MaskAnimationKey, id: AnimationId) -> Option<AnimationId> {
        self.animations.insert(key, id)
    }

    pub fn take_animation(&mut self, key: MaskAnimationKey) -> Option<AnimationId> {
        self.animations.remove(&key)
    }

    /// Remove the animation under `key` from the compositor
    pub fn remove_animation(&mut self, key: MaskAnimationKey, compositor: &CompositorHandle) {
        if let Some(id) = self.animations.remove(&key) {
            tracing::trace!("Removing {} animation", key.as_str());
            compositor.remove_animation(id);
        }
    }

    pub fn remove_all_animations(&mut self, compositor: &CompositorHandle) {
        for (_, id) in self.animations.drain() {
            compositor.remove_animation(id);
        }
    }

    /// Presentation state at the compositor's current time
    pub fn snapshot(&self, compositor: &CompositorHandle) -> MaskSnapshot {
        let sample = |key| {
            self.animation(key)
                .and_then(|id| compositor.sample(id))
        };

        let offset = sample(MaskAnimationKey::Slide).unwrap_or(self.geometry.start_offset());
        let effect_opacity = sample(MaskAnimationKey::Fade).unwrap_or(self.effect_opacity);
        let along = self.geometry.axis.point(offset);

        MaskSnapshot {
            frame: Rect::from_origin_size(along, self.frame.size),
            offset,
            effect_opacity,
            gradient: self.gradient.clone(),
        }
    }
}

/// Presentation state of a mask at one instant
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MaskSnapshot {
    /// Mask frame translated to its current position
    pub frame: Rect,
    /// Current translation along the sweep axis
    pub offset: f32,
    /// How strongly the mask applies (0.0 = content unmasked, 1.0 = full shimmer)
    pub effect_opacity: f32,
    pub gradient: LinearGradient,
}
