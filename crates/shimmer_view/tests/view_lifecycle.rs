//! End-to-end lifecycle of a shimmer view driven by a manual compositor clock

use shimmer_animation::AnimationCompositor;
use shimmer_core::Size;
use shimmer_view::{
    Direction, FadePhase, ShimmerConfiguration, ShimmerView, SweepState,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// 200pt wide content, 100pt/s, half-length band, no pause: 400pt travel, 4s cycle
fn reference_config() -> ShimmerConfiguration {
    ShimmerConfiguration {
        speed: 100.0,
        highlight_length: 0.5,
        pause_duration: 0.0,
        ..Default::default()
    }
}

fn shimmering_view(compositor: &AnimationCompositor) -> ShimmerView {
    let mut view = ShimmerView::new(compositor.handle());
    view.set_configuration(reference_config());
    view.set_bounds(Size::new(200.0, 40.0));
    view.set_shimmering(true);
    view
}

#[test]
fn test_start_creates_mask_for_sized_content() {
    let compositor = AnimationCompositor::new();
    let view = shimmering_view(&compositor);

    assert!(view.is_shimmering());
    assert!(view.has_mask());
    assert!(view.slide_animation().is_some());
    assert_eq!(view.sweep_state(), SweepState::Sweeping);
    assert_eq!(view.fade_phase(), FadePhase::FadingIn);

    let geometry = *view.mask().unwrap().geometry();
    assert_eq!(geometry.travel_distance, 400.0);
    assert_eq!(geometry.cycle_duration, 4.0);
}

#[test]
fn test_zero_size_defers_mask_until_layout() {
    let compositor = AnimationCompositor::new();
    let mut view = ShimmerView::new(compositor.handle());
    view.set_shimmering(true);

    assert!(view.is_shimmering());
    assert!(!view.has_mask());
    assert_eq!(compositor.animation_count(), 0);

    view.set_bounds(Size::new(120.0, 20.0));
    assert!(view.has_mask());
    assert!(view.slide_animation().is_some());
}

#[test]
fn test_stop_keeps_mask_until_end_fade_completes() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);

    compositor.advance(1.0);
    view.process_completions();
    assert_eq!(view.fade_phase(), FadePhase::Visible);

    view.set_shimmering(false);
    assert!(!view.is_shimmering());
    assert!(view.has_mask());
    assert_eq!(view.fade_phase(), FadePhase::FadingOut);
    assert_eq!(view.last_end_fade_duration(), Some(0.3));

    // Mid-fade: still masked, effect on its way out
    compositor.advance(0.15);
    view.process_completions();
    let snapshot = view.mask_snapshot().unwrap();
    assert!((snapshot.effect_opacity - 0.5).abs() < 1e-3);

    compositor.advance(0.2);
    assert!(view.has_mask());
    assert_eq!(view.process_completions(), 1);
    assert!(!view.has_mask());
    assert_eq!(view.fade_phase(), FadePhase::Idle);
    assert_eq!(compositor.animation_count(), 0);
}

#[test]
fn test_repeated_start_is_a_no_op() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);
    let slide = view.slide_animation();

    compositor.advance(0.5);
    view.set_shimmering(true);
    view.set_shimmering(true);

    assert_eq!(view.slide_animation(), slide);
    assert_eq!(compositor.animation_count(), 2);
}

#[test]
fn test_equal_configuration_does_not_restart() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);
    let slide = view.slide_animation().unwrap();
    let before = compositor.handle().animation(slide).unwrap();

    compositor.advance(0.7);
    view.set_configuration(reference_config());

    assert_eq!(view.slide_animation(), Some(slide));
    assert_eq!(compositor.handle().animation(slide), Some(before));
}

#[test]
fn test_geometry_change_retimes_running_slide() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);
    let slide = view.slide_animation().unwrap();

    compositor.advance(1.0);
    view.update_configuration(|c| c.pause_duration = 1.0);

    // Same slide, new duration: travel 500 at 100pt/s plus 1s pause
    assert_eq!(view.slide_animation(), Some(slide));
    let animation = compositor.handle().animation(slide).unwrap();
    assert!(approx(animation.duration, 6.0));
    assert_eq!(animation.from, -500.0);
}

#[test]
fn test_speed_change_replaces_slide() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);
    let slide = view.slide_animation().unwrap();

    view.update_configuration(|c| c.speed = 200.0);

    let replaced = view.slide_animation().unwrap();
    assert_ne!(replaced, slide);
    assert!(compositor.handle().animation(slide).is_none());
    assert!(approx(
        compositor.handle().animation(replaced).unwrap().duration,
        2.0
    ));
}

#[test]
fn test_configuration_stored_while_idle() {
    let compositor = AnimationCompositor::new();
    let mut view = ShimmerView::new(compositor.handle());
    view.set_bounds(Size::new(200.0, 40.0));

    view.set_configuration(reference_config());
    assert!(!view.has_mask());
    assert_eq!(compositor.animation_count(), 0);

    view.set_shimmering(true);
    let slide = view.slide_animation().unwrap();
    assert!(approx(
        compositor.handle().animation(slide).unwrap().duration,
        4.0
    ));
}

#[test]
fn test_interrupted_begin_fade_shortens_end_fade() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);

    // Begin fade is 0.1s; stop halfway through
    compositor.advance(0.05);
    view.set_shimmering(false);

    let duration = view.last_end_fade_duration().unwrap();
    assert!((duration - 0.15).abs() < 1e-6);

    compositor.advance(0.2);
    view.process_completions();
    assert!(!view.has_mask());
}

#[test]
fn test_resize_scales_travel_distance() {
    let compositor = AnimationCompositor::new();
    let mut view = ShimmerView::new(compositor.handle());
    view.set_configuration(ShimmerConfiguration {
        begin_fade_duration: 0.0,
        ..reference_config()
    });
    view.set_bounds(Size::new(200.0, 40.0));
    view.set_shimmering(true);
    let slide = view.slide_animation().unwrap();

    compositor.advance(1.0);
    view.set_bounds(Size::new(400.0, 40.0));

    let geometry = *view.mask().unwrap().geometry();
    assert_eq!(geometry.travel_distance, 800.0);
    assert_eq!(view.slide_animation(), Some(slide));

    // A quarter of the way through the cycle before and after
    let animation = compositor.handle().animation(slide).unwrap();
    assert!(approx(animation.duration, 8.0));
    assert!(approx(animation.cycle_fraction_at(1.0), 0.25));
}

#[test]
fn test_cross_axis_resize_keeps_timing() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);
    let slide = view.slide_animation().unwrap();
    let before = compositor.handle().animation(slide).unwrap();

    view.set_bounds(Size::new(200.0, 80.0));

    assert_eq!(view.mask().unwrap().frame().height(), 80.0);
    assert_eq!(compositor.handle().animation(slide), Some(before));
}

#[test]
fn test_restart_during_end_fade_reuses_mask_and_slide() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);
    let slide = view.slide_animation().unwrap();

    compositor.advance(1.0);
    view.set_shimmering(false);
    compositor.advance(0.1);
    view.set_shimmering(true);

    assert_eq!(view.slide_animation(), Some(slide));
    assert_eq!(view.fade_phase(), FadePhase::FadingIn);

    // The cancelled end fade reports in, and must not tear anything down
    compositor.advance(1.0);
    view.process_completions();
    assert!(view.has_mask());
    assert_eq!(view.slide_animation(), Some(slide));
    assert_eq!(view.fade_phase(), FadePhase::Visible);
    assert!((view.mask_snapshot().unwrap().effect_opacity - 1.0).abs() < 1e-5);
}

#[test]
fn test_restart_while_collapsed_resumes_on_resize() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);

    compositor.advance(1.0);
    view.set_shimmering(false);

    // Restart requested while the content has no extent: deferred
    view.set_bounds(Size::ZERO);
    view.set_shimmering(true);
    assert!(view.is_shimmering());

    // Extent returns before the end fade finishes
    view.set_bounds(Size::new(200.0, 40.0));
    assert_eq!(view.sweep_state(), SweepState::Sweeping);
    assert_eq!(view.fade_phase(), FadePhase::FadingIn);

    compositor.advance(1.0);
    view.process_completions();
    assert!(view.has_mask());
    assert!(view.slide_animation().is_some());
    assert_eq!(view.fade_phase(), FadePhase::Visible);
}

#[test]
fn test_restart_while_collapsed_survives_end_fade_teardown() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);

    compositor.advance(1.0);
    view.set_shimmering(false);
    view.set_bounds(Size::ZERO);
    view.set_shimmering(true);

    // The old end fade completes while the restart is still deferred
    compositor.advance(1.0);
    view.process_completions();
    assert!(!view.has_mask());
    assert!(view.is_shimmering());

    view.set_bounds(Size::new(200.0, 40.0));
    assert!(view.has_mask());
    assert_eq!(view.sweep_state(), SweepState::Sweeping);
}

#[test]
fn test_speed_change_keeps_band_moving() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);

    compositor.advance(1.0);
    view.update_configuration(|c| c.speed = 200.0);
    let before = view.mask_snapshot().unwrap().offset;

    compositor.advance(0.05);
    let after = view.mask_snapshot().unwrap().offset;
    assert!(after > before);
}

#[test]
fn test_direction_change_switches_axis() {
    let compositor = AnimationCompositor::new();
    let mut view = shimmering_view(&compositor);

    view.update_configuration(|c| c.direction = Direction::Down);

    let geometry = *view.mask().unwrap().geometry();
    assert_eq!(geometry.content_length, 40.0);
    assert_eq!(geometry.cross_length, 200.0);
    assert_eq!(view.mask().unwrap().frame().width(), 200.0);
}

#[test]
fn test_dropping_view_removes_animations() {
    let compositor = AnimationCompositor::new();
    let view = shimmering_view(&compositor);
    assert_eq!(compositor.animation_count(), 2);

    drop(view);
    assert_eq!(compositor.animation_count(), 0);
}

#[test]
fn test_content_is_carried_untouched() {
    let compositor = AnimationCompositor::new();
    let mut view = ShimmerView::with_content(compositor.handle(), vec!["title", "subtitle"]);
    view.content_mut().push("body");
    view.set_bounds(Size::new(300.0, 60.0));
    view.set_shimmering(true);

    assert_eq!(view.content(), &vec!["title", "subtitle", "body"]);
    assert!(view.has_mask());
}
