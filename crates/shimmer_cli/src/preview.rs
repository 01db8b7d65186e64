//! Headless shimmer preview
//!
//! Runs a view against a manually advanced compositor clock and records what a
//! renderer would draw each frame.

use serde::Serialize;
use shimmer_animation::AnimationCompositor;
use shimmer_core::Size;
use shimmer_view::{FadePhase, ShimmerConfiguration, ShimmerView};

/// Simulation parameters
#[derive(Clone, Debug)]
pub struct PreviewOptions {
    pub size: Size,
    pub fps: u32,
    /// Seconds to simulate
    pub duration: f64,
    /// Stop shimmering at this media time
    pub stop_at: Option<f64>,
    /// Start shimmering again at this media time
    pub restart_at: Option<f64>,
}

/// One simulated frame
#[derive(Clone, Debug, Serialize)]
pub struct PreviewFrame {
    pub frame: u64,
    pub time: f64,
    pub shimmering: bool,
    pub phase: &'static str,
    /// Mask translation along the sweep axis; `None` once torn down
    pub offset: Option<f32>,
    pub effect_opacity: Option<f32>,
}

fn phase_name(phase: FadePhase) -> &'static str {
    match phase {
        FadePhase::Idle => "idle",
        FadePhase::FadingIn => "fading-in",
        FadePhase::Visible => "visible",
        FadePhase::FadingOut => "fading-out",
    }
}

/// Simulate a shimmer and return every frame
pub fn run(config: ShimmerConfiguration, options: &PreviewOptions) -> Vec<PreviewFrame> {
    let compositor = AnimationCompositor::new();
    let mut view = ShimmerView::new(compositor.handle());
    view.set_configuration(config);
    view.set_bounds(options.size);
    view.set_shimmering(true);

    let dt = 1.0 / f64::from(options.fps.max(1));
    let mut frames = Vec::new();
    let mut stopped = false;
    let mut restarted = false;
    let mut frame = 0u64;

    loop {
        let now = compositor.now();

        if !stopped && options.stop_at.is_some_and(|at| now >= at) {
            tracing::debug!("Stopping shimmer at {:.3}s", now);
            view.set_shimmering(false);
            stopped = true;
        }
        if stopped && !restarted && options.restart_at.is_some_and(|at| now >= at) {
            tracing::debug!("Restarting shimmer at {:.3}s", now);
            view.set_shimmering(true);
            restarted = true;
        }

        let snapshot = view.mask_snapshot();
        frames.push(PreviewFrame {
            frame,
            time: now,
            shimmering: view.is_shimmering(),
            phase: phase_name(view.fade_phase()),
            offset: snapshot.as_ref().map(|s| s.offset),
            effect_opacity: snapshot.as_ref().map(|s| s.effect_opacity),
        });

        let torn_down = !view.is_shimmering() && !view.has_mask();
        let waiting_for_restart = !restarted && options.restart_at.is_some();
        if now >= options.duration || (torn_down && !waiting_for_restart) {
            break;
        }

        compositor.advance(dt);
        view.process_completions();
        frame += 1;
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> PreviewOptions {
        PreviewOptions {
            size: Size::new(200.0, 40.0),
            fps: 10,
            duration: 2.0,
            stop_at: None,
            restart_at: None,
        }
    }

    #[test]
    fn test_preview_runs_for_duration() {
        let frames = run(ShimmerConfiguration::default(), &options());

        assert_eq!(frames.first().unwrap().phase, "fading-in");
        assert!(frames.last().unwrap().time >= 2.0);
        assert!(frames.iter().all(|f| f.offset.is_some()));
    }

    #[test]
    fn test_preview_ends_after_teardown() {
        let frames = run(
            ShimmerConfiguration::default(),
            &PreviewOptions {
                stop_at: Some(0.5),
                ..options()
            },
        );

        let last = frames.last().unwrap();
        assert!(last.time < 2.0);
        assert!(!last.shimmering);
        assert_eq!(last.offset, None);
        assert!(frames.iter().any(|f| f.phase == "fading-out"));
    }

    #[test]
    fn test_preview_restart_keeps_mask() {
        let frames = run(
            ShimmerConfiguration {
                end_fade_duration: 1.0,
                ..Default::default()
            },
            &PreviewOptions {
                stop_at: Some(0.5),
                restart_at: Some(0.8),
                ..options()
            },
        );

        let last = frames.last().unwrap();
        assert!(last.shimmering);
        assert!(frames.iter().all(|f| f.offset.is_some()));
    }

    #[test]
    fn test_zero_size_previews_nothing() {
        let frames = run(
            ShimmerConfiguration::default(),
            &PreviewOptions {
                size: Size::ZERO,
                duration: 0.3,
                ..options()
            },
        );
        assert!(frames.iter().all(|f| f.offset.is_none()));
    }
}
