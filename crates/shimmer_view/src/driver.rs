//! Sweep animation driver
//!
//! Owns the repeating slide on the mask. Starting installs it, configuration
//! and size changes retime or replace it, and it is only removed when the
//! mask is torn down after the end fade.

use crate::config::{ConfigurationChange, Direction, ShimmerConfiguration};
use crate::mask::{MaskAnimationKey, ShimmerMask};
use shimmer_animation::{BasicAnimation, CompositorHandle, FillMode, Repeat};

/// Time base a sweep's cycles are anchored to
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SweepTimeBase {
    /// First cycle begins once the begin fade has elapsed
    #[default]
    Local,
    /// Cycles are anchored to a fixed media time shared by other views
    ///
    /// Views on the same compositor with equal configurations sweep in
    /// lockstep.
    Shared { epoch: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepState {
    Idle,
    Sweeping,
}

/// Parameters the installed slide was built with
#[derive(Clone, Copy, Debug, PartialEq)]
struct SlideParams {
    direction: Direction,
    speed: f32,
}

impl SlideParams {
    fn of(config: &ShimmerConfiguration) -> Self {
        Self {
            direction: config.direction,
            speed: config.speed,
        }
    }
}

#[derive(Debug)]
pub struct SweepAnimationDriver {
    state: SweepState,
    time_base: SweepTimeBase,
    installed: Option<SlideParams>,
}

impl SweepAnimationDriver {
    pub fn new() -> Self {
        Self {
            state: SweepState::Idle,
            time_base: SweepTimeBase::Local,
            installed: None,
        }
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn time_base(&self) -> SweepTimeBase {
        self.time_base
    }

    /// Takes effect the next time a slide is installed
    pub fn set_time_base(&mut self, time_base: SweepTimeBase) {
        self.time_base = time_base;
    }

    /// Enter the sweeping state on a mask whose geometry is current
    ///
    /// A slide left running by an interrupted end fade is reused when its
    /// direction and speed still match, so the band keeps its place.
    pub fn start(
        &mut self,
        mask: &mut ShimmerMask,
        compositor: &CompositorHandle,
        config: &ShimmerConfiguration,
        now: f64,
    ) {
        let reusable = mask.animation(MaskAnimationKey::Slide).is_some()
            && self.installed == Some(SlideParams::of(config));

        if reusable {
            self.retime(mask, compositor, config, now, true);
        } else {
            let begin = self.begin_time(config, now, true);
            self.install(mask, compositor, config, begin);
        }
        self.state = SweepState::Sweeping;
    }

    /// Apply new geometry or configuration while sweeping
    pub fn update(
        &mut self,
        mask: &mut ShimmerMask,
        compositor: &CompositorHandle,
        config: &ShimmerConfiguration,
        change: ConfigurationChange,
        now: f64,
    ) {
        if self.state != SweepState::Sweeping {
            return;
        }

        match change {
            ConfigurationChange::Unchanged | ConfigurationChange::Appearance => {}
            ConfigurationChange::Retime => self.retime(mask, compositor, config, now, false),
            ConfigurationChange::Replace => {
                let begin = self.begin_time(config, now, false);
                self.install(mask, compositor, config, begin);
            }
        }
    }

    /// Leave the sweeping state; the slide keeps running under the end fade
    pub fn stop(&mut self) {
        self.state = SweepState::Idle;
    }

    /// Remove the slide from a mask that is being torn down
    pub fn teardown(&mut self, mask: &mut ShimmerMask, compositor: &CompositorHandle) {
        mask.remove_animation(MaskAnimationKey::Slide, compositor);
        self.installed = None;
        self.state = SweepState::Idle;
    }

    /// Media time a newly installed slide begins at
    ///
    /// Only a slide installed when shimmering starts waits out the fade-in;
    /// replacing one mid-sweep keeps the band moving.
    fn begin_time(&self, config: &ShimmerConfiguration, now: f64, starting: bool) -> f64 {
        match self.time_base {
            // Motion starts under the fade-in rather than after a static pause
            SweepTimeBase::Local if starting => now + lead_in(config.begin_fade_duration),
            SweepTimeBase::Local => now,
            SweepTimeBase::Shared { epoch } => epoch,
        }
    }

    fn slide(&self, mask: &ShimmerMask, config: &ShimmerConfiguration, begin: f64) -> BasicAnimation {
        let geometry = mask.geometry();
        BasicAnimation::new(geometry.start_offset(), 0.0, geometry.cycle_duration)
            .begin_at(begin)
            .repeat(Repeat::Forever)
            .direction(config.direction.play_direction())
            .fill(FillMode::Both)
    }

    fn install(
        &mut self,
        mask: &mut ShimmerMask,
        compositor: &CompositorHandle,
        config: &ShimmerConfiguration,
        begin: f64,
    ) {
        let animation = self.slide(mask, config, begin);
        let Some(id) = compositor.add_animation(animation, None) else {
            tracing::warn!("Compositor dropped, shimmer slide not installed");
            return;
        };

        if let Some(previous) = mask.set_animation(MaskAnimationKey::Slide, id) {
            compositor.remove_animation(previous);
            tracing::debug!("Replaced shimmer slide ({:?})", config.direction);
        } else {
            tracing::debug!(
                "Installed shimmer slide: {:?}, {:.3}s cycle",
                config.direction,
                animation.duration
            );
        }
        self.installed = Some(SlideParams::of(config));
    }

    /// Update the running slide in place for new geometry
    ///
    /// With a local time base the slide is re-anchored so the current cycle
    /// fraction carries over into the new duration. A shared epoch is left
    /// alone so synchronized views stay aligned.
    fn retime(
        &mut self,
        mask: &mut ShimmerMask,
        compositor: &CompositorHandle,
        config: &ShimmerConfiguration,
        now: f64,
        starting: bool,
    ) {
        let Some(id) = mask.animation(MaskAnimationKey::Slide) else {
            let begin = self.begin_time(config, now, starting);
            self.install(mask, compositor, config, begin);
            return;
        };

        let time_base = self.time_base;
        let updated = self.slide(mask, config, 0.0);
        let retimed = compositor.with_animation_mut(id, |anim| {
            let fraction = anim.cycle_fraction_at(now);
            let begin_time = match time_base {
                SweepTimeBase::Local if now > anim.begin_time => {
                    now - fraction * updated.duration
                }
                SweepTimeBase::Local => anim.begin_time,
                SweepTimeBase::Shared { epoch } => epoch,
            };
            *anim = updated.begin_at(begin_time);
        });

        match retimed {
            Some(()) => {
                tracing::debug!("Retimed shimmer slide to {:.3}s cycle", updated.duration);
                self.installed = Some(SlideParams::of(config));
            }
            None => {
                mask.take_animation(MaskAnimationKey::Slide);
                let begin = self.begin_time(config, now, starting);
                self.install(mask, compositor, config, begin);
            }
        }
    }
}

impl Default for SweepAnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

fn lead_in(begin_fade_duration: f64) -> f64 {
    if begin_fade_duration.is_finite() && begin_fade_duration > 0.0 {
        begin_fade_duration
    } else {
        0.0
    }
}
