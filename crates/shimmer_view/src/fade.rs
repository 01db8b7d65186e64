//! Begin/end fade transitions
//!
//! Fades animate the mask's effect opacity, never the content. The end fade
//! is the only path to tearing the mask down: its completion arrives through
//! the compositor's delegate channel, and only a completion matching the
//! currently pending fade (same animation, same generation tag) counts.
//!
//! Interrupting a begin fade scales the end fade by how far the begin fade
//! got, so a barely started fade-in is not followed by a long fade-out.

use crate::config::ShimmerConfiguration;
use crate::mask::{MaskAnimationKey, ShimmerMask};
use shimmer_animation::{
    AnimationId, BasicAnimation, Completion, CompositorHandle, Delegate, FillMode,
};
use std::sync::mpsc::Sender;

/// Where the fade controller is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadePhase {
    /// No shimmer shown
    Idle,
    FadingIn,
    /// Begin fade complete, effect fully applied
    Visible,
    /// End fade running; the mask goes away when it completes
    FadingOut,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingEndFade {
    animation: AnimationId,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct FadeTransitionController {
    fade_start_time: Option<f64>,
    begin_duration: f64,
    pending_end: Option<PendingEndFade>,
    generation: u64,
    last_end_fade_duration: Option<f64>,
}

impl FadeTransitionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, now: f64) -> FadePhase {
        if self.pending_end.is_some() {
            FadePhase::FadingOut
        } else if self.fade_start_time.is_none() {
            FadePhase::Idle
        } else if self.begin_progress(now) < 1.0 {
            FadePhase::FadingIn
        } else {
            FadePhase::Visible
        }
    }

    /// Media time the current begin fade started at
    pub fn fade_start_time(&self) -> Option<f64> {
        self.fade_start_time
    }

    /// Duration chosen for the most recent end fade
    pub fn last_end_fade_duration(&self) -> Option<f64> {
        self.last_end_fade_duration
    }

    pub fn is_end_fade_pending(&self) -> bool {
        self.pending_end.is_some()
    }

    /// Fraction of the begin fade elapsed at `now`
    ///
    /// A zero (or unusable) begin duration counts as fully elapsed.
    pub fn begin_progress(&self, now: f64) -> f64 {
        let Some(start) = self.fade_start_time else {
            return 1.0;
        };
        if !(self.begin_duration.is_finite() && self.begin_duration > 0.0) {
            return 1.0;
        }
        ((now - start) / self.begin_duration).clamp(0.0, 1.0)
    }

    /// Duration an end fade requested at `now` would run for
    pub fn end_fade_duration(&self, config: &ShimmerConfiguration, now: f64) -> f64 {
        self.begin_progress(now) * config.end_fade_duration
    }

    /// Fade the effect in, cancelling any end fade still pending
    pub fn begin(
        &mut self,
        mask: &mut ShimmerMask,
        compositor: &CompositorHandle,
        config: &ShimmerConfiguration,
        now: f64,
    ) {
        if self.pending_end.take().is_some() {
            tracing::debug!("Cancelled pending shimmer end fade");
        }
        self.generation += 1;

        let current = presentation_opacity(mask, compositor);
        mask.remove_animation(MaskAnimationKey::Fade, compositor);
        mask.set_effect_opacity(1.0);

        let duration = config.begin_fade_duration;
        if duration.is_finite() && duration > 0.0 {
            let fade = BasicAnimation::new(current, 1.0, duration)
                .begin_at(now)
                .fill(FillMode::Both);
            if let Some(id) = compositor.add_animation(fade, None) {
                mask.set_animation(MaskAnimationKey::Fade, id);
            }
        }

        self.fade_start_time = Some(now);
        self.begin_duration = duration;
        tracing::debug!("Shimmer begin fade from {:.2} over {:.3}s", current, duration);
    }

    /// Fade the effect out and arm the completion that tears the mask down
    ///
    /// Returns the end fade duration, or `None` when the compositor is gone
    /// and the caller should tear down immediately.
    pub fn end(
        &mut self,
        mask: &mut ShimmerMask,
        compositor: &CompositorHandle,
        config: &ShimmerConfiguration,
        completions: &Sender<Completion>,
        now: f64,
    ) -> Option<f64> {
        let duration = self.end_fade_duration(config, now);
        let current = presentation_opacity(mask, compositor);
        mask.remove_animation(MaskAnimationKey::Fade, compositor);
        mask.set_effect_opacity(0.0);
        self.generation += 1;

        let fade = BasicAnimation::new(current, 0.0, duration)
            .begin_at(now)
            .fill(FillMode::Both);
        let delegate = Delegate::new(completions.clone(), self.generation);
        let id = compositor.add_animation(fade, Some(delegate))?;

        mask.set_animation(MaskAnimationKey::Fade, id);
        self.pending_end = Some(PendingEndFade {
            animation: id,
            generation: self.generation,
        });
        self.last_end_fade_duration = Some(duration);
        tracing::debug!(
            "Shimmer end fade over {:.3}s (begin fade {:.0}% complete)",
            duration,
            self.begin_progress(now) * 100.0
        );
        Some(duration)
    }

    /// Check a completion against the pending end fade
    ///
    /// Returns true when the mask should now be torn down. Completions from
    /// removed, cancelled or superseded fades are ignored.
    pub fn handle_completion(&mut self, completion: &Completion) -> bool {
        let current = self.pending_end.is_some_and(|pending| {
            pending.animation == completion.animation && pending.generation == completion.tag
        });

        if current && completion.finished {
            self.pending_end = None;
            return true;
        }

        tracing::trace!(
            "Ignoring stale fade completion (tag {}, finished {})",
            completion.tag,
            completion.finished
        );
        false
    }

    /// Forget all fade state after the mask is gone
    pub fn reset(&mut self) {
        self.fade_start_time = None;
        self.begin_duration = 0.0;
        self.pending_end = None;
    }
}

fn presentation_opacity(mask: &ShimmerMask, compositor: &CompositorHandle) -> f32 {
    mask.animation(MaskAnimationKey::Fade)
        .and_then(|id| compositor.sample(id))
        .unwrap_or(mask.effect_opacity())
}
