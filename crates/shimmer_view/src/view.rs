//! ShimmerView orchestrator
//!
//! Composes the geometry calculator, sweep driver and fade controller behind
//! the two switches hosts touch: `set_shimmering` and `set_configuration`.
//! Hosts also report size changes through `set_bounds` and pump completions
//! with `process_completions` after each compositor tick.
//!
//! Lifecycle of the mask:
//!
//! ```text
//! start ──► mask created, slide installed, begin fade
//! stop  ──► end fade (slide keeps running)
//!             ├─ completion ──► mask torn down
//!             └─ start again ──► fade cancelled, mask and slide reused
//! ```

use crate::config::{ConfigurationChange, ShimmerConfiguration};
use crate::driver::{SweepAnimationDriver, SweepState, SweepTimeBase};
use crate::fade::{FadePhase, FadeTransitionController};
use crate::geometry::MaskGeometry;
use crate::mask::{MaskAnimationKey, MaskSnapshot, ShimmerMask};
use shimmer_animation::{AnimationId, Completion, CompositorHandle};
use shimmer_core::Size;
use std::sync::mpsc::{self, Receiver, Sender};

/// A region that shimmers over caller-owned content
///
/// `C` is the content container. The view never looks inside it; only the
/// size reported through [`set_bounds`](Self::set_bounds) matters.
pub struct ShimmerView<C = ()> {
    content: C,
    bounds: Size,
    configuration: ShimmerConfiguration,
    is_shimmering: bool,
    compositor: CompositorHandle,
    mask: Option<ShimmerMask>,
    driver: SweepAnimationDriver,
    fade: FadeTransitionController,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
    /// Content extent along the sweep axis the mask was last laid out for
    content_extent: f32,
}

impl ShimmerView<()> {
    /// Create a view without content
    pub fn new(compositor: CompositorHandle) -> Self {
        Self::with_content(compositor, ())
    }
}

impl<C> ShimmerView<C> {
    pub fn with_content(compositor: CompositorHandle, content: C) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        Self {
            content,
            bounds: Size::ZERO,
            configuration: ShimmerConfiguration::default(),
            is_shimmering: false,
            compositor,
            mask: None,
            driver: SweepAnimationDriver::new(),
            fade: FadeTransitionController::new(),
            completion_tx,
            completion_rx,
            content_extent: 0.0,
        }
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    // =========================================================================
    // Activity
    // =========================================================================

    pub fn is_shimmering(&self) -> bool {
        self.is_shimmering
    }

    /// Start or stop shimmering; repeating the current value does nothing
    pub fn set_shimmering(&mut self, shimmering: bool) {
        if self.is_shimmering == shimmering {
            tracing::trace!("set_shimmering({}) unchanged", shimmering);
            return;
        }
        self.is_shimmering = shimmering;

        if shimmering {
            self.start();
        } else {
            self.stop();
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn configuration(&self) -> &ShimmerConfiguration {
        &self.configuration
    }

    /// Replace the configuration
    ///
    /// Equal values are ignored. While idle the value is only stored for the
    /// next start.
    pub fn set_configuration(&mut self, configuration: ShimmerConfiguration) {
        let change = ShimmerConfiguration::diff(&self.configuration, &configuration);
        if change == ConfigurationChange::Unchanged {
            tracing::trace!("set_configuration: unchanged");
            return;
        }
        self.configuration = configuration;

        if self.is_shimmering {
            self.refresh(change);
        }
    }

    /// Edit a copy of the configuration and apply it
    ///
    /// ```
    /// # use shimmer_animation::AnimationCompositor;
    /// # use shimmer_view::{Direction, ShimmerView};
    /// # let compositor = AnimationCompositor::new();
    /// let mut view = ShimmerView::new(compositor.handle());
    /// view.update_configuration(|c| {
    ///     c.speed = 100.0;
    ///     c.direction = Direction::Left;
    /// });
    /// assert_eq!(view.configuration().speed, 100.0);
    /// ```
    pub fn update_configuration<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ShimmerConfiguration),
    {
        let mut configuration = self.configuration;
        f(&mut configuration);
        self.set_configuration(configuration);
    }

    pub fn time_base(&self) -> SweepTimeBase {
        self.driver.time_base()
    }

    /// Anchor future slides to a time base (see [`SweepTimeBase`])
    pub fn set_time_base(&mut self, time_base: SweepTimeBase) {
        self.driver.set_time_base(time_base);
    }

    // =========================================================================
    // Layout
    // =========================================================================

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Size-change notification from the hosting layout system
    pub fn set_bounds(&mut self, bounds: Size) {
        if self.bounds == bounds {
            return;
        }
        self.bounds = bounds;
        self.layout();
    }

    /// Bring the mask in line with the current bounds
    ///
    /// Starts a deferred shimmer once the content has a positive extent, and
    /// recomputes geometry when the extent along the sweep axis changed. A
    /// deferred start can leave a fading-out mask behind, which is picked up
    /// here as well.
    pub fn layout(&mut self) {
        if !self.is_shimmering {
            return;
        }

        let laid_out_cross = self.mask.as_ref().map(|m| m.geometry().cross_length);
        let Some(laid_out_cross) = laid_out_cross.filter(|_| self.is_sweeping()) else {
            self.start();
            return;
        };

        let axis = self.configuration.direction.axis();
        if axis.extent(self.bounds) != self.content_extent {
            self.refresh(ConfigurationChange::Retime);
        } else if axis.cross_extent(self.bounds) != laid_out_cross {
            self.refresh(ConfigurationChange::Appearance);
        }
    }

    // =========================================================================
    // Completions
    // =========================================================================

    /// Drain completion notifications delivered by the compositor
    ///
    /// Returns the number of notifications processed.
    pub fn process_completions(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            processed += 1;
            if self.fade.handle_completion(&completion) {
                self.teardown();
            }
        }
        processed
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// True while a mask exists, including during the end fade
    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    pub fn mask(&self) -> Option<&ShimmerMask> {
        self.mask.as_ref()
    }

    /// Identity of the installed slide animation
    pub fn slide_animation(&self) -> Option<AnimationId> {
        self.mask
            .as_ref()
            .and_then(|mask| mask.animation(MaskAnimationKey::Slide))
    }

    pub fn sweep_state(&self) -> SweepState {
        self.driver.state()
    }

    pub fn fade_phase(&self) -> FadePhase {
        let now = self.compositor.now().unwrap_or_default();
        self.fade.phase(now)
    }

    pub fn last_end_fade_duration(&self) -> Option<f64> {
        self.fade.last_end_fade_duration()
    }

    /// Presentation state of the mask at the compositor's current time
    pub fn mask_snapshot(&self) -> Option<MaskSnapshot> {
        self.mask
            .as_ref()
            .map(|mask| mask.snapshot(&self.compositor))
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn start(&mut self) {
        let Some(now) = self.compositor.now() else {
            tracing::warn!("Compositor dropped, cannot start shimmer");
            return;
        };
        let Some(geometry) = MaskGeometry::compute(&self.configuration, self.bounds) else {
            tracing::debug!(
                "Deferring shimmer until content has extent (bounds {:?})",
                self.bounds
            );
            return;
        };

        match self.mask.as_mut() {
            Some(mask) => mask.apply_geometry(geometry, &self.configuration),
            None => {
                tracing::debug!("Created shimmer mask {:?}", geometry.frame());
                self.mask = Some(ShimmerMask::new(geometry, &self.configuration));
            }
        }
        self.content_extent = geometry.content_length;

        let Some(mask) = self.mask.as_mut() else {
            return;
        };
        self.driver
            .start(mask, &self.compositor, &self.configuration, now);
        self.fade
            .begin(mask, &self.compositor, &self.configuration, now);
    }

    fn stop(&mut self) {
        self.driver.stop();

        if self.mask.is_none() {
            tracing::trace!("Stopped shimmer had no mask");
            return;
        }
        let Some(now) = self.compositor.now() else {
            self.teardown();
            return;
        };
        let Some(mask) = self.mask.as_mut() else {
            return;
        };

        let scheduled = self.fade.end(
            mask,
            &self.compositor,
            &self.configuration,
            &self.completion_tx,
            now,
        );
        if scheduled.is_none() {
            self.teardown();
        }
    }

    /// Re-apply configuration or geometry while shimmering
    fn refresh(&mut self, change: ConfigurationChange) {
        if self.mask.is_none() || !self.is_sweeping() {
            self.start();
            return;
        }
        let Some(now) = self.compositor.now() else {
            return;
        };
        let Some(geometry) = MaskGeometry::compute(&self.configuration, self.bounds) else {
            tracing::debug!("Shimmer geometry unavailable, keeping current mask");
            return;
        };
        let Some(mask) = self.mask.as_mut() else {
            return;
        };

        mask.apply_geometry(geometry, &self.configuration);
        self.content_extent = geometry.content_length;
        self.driver
            .update(mask, &self.compositor, &self.configuration, change, now);
    }

    fn is_sweeping(&self) -> bool {
        self.driver.state() == SweepState::Sweeping
    }

    fn teardown(&mut self) {
        let Some(mut mask) = self.mask.take() else {
            return;
        };
        self.driver.teardown(&mut mask, &self.compositor);
        mask.remove_all_animations(&self.compositor);
        self.fade.reset();
        self.content_extent = 0.0;
        tracing::debug!("Shimmer mask torn down");
    }
}

impl<C> Drop for ShimmerView<C> {
    fn drop(&mut self) {
        if let Some(mask) = self.mask.as_mut() {
            mask.remove_all_animations(&self.compositor);
        }
    }
}
