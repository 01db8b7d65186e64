//! Mask geometry
//!
//! Pure mapping from a configuration and the content size to everything the
//! mask needs: its extent, how far it travels per cycle, its gradient and the
//! cycle duration. The pause between sweeps is modelled as extra travel at
//! the sweep speed, so the band moves at constant speed the whole cycle.

use crate::config::{GradientProfile, ShimmerConfiguration};
use serde::Serialize;
use shimmer_core::{Axis, Color, GradientStop, LinearGradient, Rect, Size};

/// Computed layout of a shimmer mask for one content size
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MaskGeometry {
    pub axis: Axis,
    /// Content length along the sweep axis
    pub content_length: f32,
    /// Content length across the sweep axis
    pub cross_length: f32,
    pub highlight_size: f32,
    /// Distance covered during the pause, plus one content length
    pub extra_distance: f32,
    /// Length of the mask element along the sweep axis
    pub full_sweep_extent: f32,
    /// Distance the mask translates per repetition
    pub travel_distance: f32,
    /// Seconds per repetition, pause included
    pub cycle_duration: f64,
}

impl MaskGeometry {
    /// Compute the geometry for `content` under `config`
    ///
    /// Returns `None` when there is nothing to animate: a non-positive content
    /// length along the sweep axis, or a speed that would make the cycle
    /// duration meaningless.
    pub fn compute(config: &ShimmerConfiguration, content: Size) -> Option<Self> {
        let axis = config.direction.axis();
        let length = axis.extent(content);
        if !(length > 0.0) {
            return None;
        }
        if !(config.speed.is_finite() && config.speed > 0.0) {
            tracing::debug!("Shimmer speed {} cannot drive a sweep", config.speed);
            return None;
        }

        let highlight_size = length * config.highlight_length;
        let extra_distance = length + config.speed * config.pause_duration as f32;
        let full_sweep_extent = highlight_size * 3.0 + extra_distance;
        let travel_distance = highlight_size * 2.0 + extra_distance;
        let cycle_duration = (travel_distance / config.speed) as f64 + config.pause_duration;

        Some(Self {
            axis,
            content_length: length,
            cross_length: axis.cross_extent(content),
            highlight_size,
            extra_distance,
            full_sweep_extent,
            travel_distance,
            cycle_duration,
        })
    }

    /// Mask translation at the start of each cycle
    pub fn start_offset(&self) -> f32 {
        -self.travel_distance
    }

    /// Mask frame in content coordinates, at the start of a cycle
    pub fn frame(&self) -> Rect {
        let origin = self.axis.point(self.start_offset());
        Rect::from_origin_size(
            origin,
            self.axis.size(self.full_sweep_extent, self.cross_length),
        )
    }

    /// Gradient stop positions and alphas for `config`'s profile
    ///
    /// The band occupies `highlight_length` of the gradient centered on 0.5.
    pub fn gradient(&self, config: &ShimmerConfiguration) -> LinearGradient {
        let band = config.highlight_length;
        let outside = (1.0 - band) / 2.0;
        let dim = config.animation_opacity;
        let bright = config.base_opacity;

        match config.profile {
            GradientProfile::ThreeStop => LinearGradient::along(
                self.axis,
                [
                    GradientStop::new(outside, Color::white(dim)),
                    GradientStop::new(0.5, Color::white(bright)),
                    GradientStop::new(1.0 - outside, Color::white(dim)),
                ],
            ),
            GradientProfile::Feathered => {
                let range = bright - dim;
                let alpha = |f: f32| Color::white(dim + range * f);
                LinearGradient::along(
                    self.axis,
                    [
                        GradientStop::new(outside, alpha(0.0)),
                        GradientStop::new(outside + band * 0.18, alpha(0.08)),
                        GradientStop::new(outside + band * 0.35, alpha(0.35)),
                        GradientStop::new(0.5, alpha(1.0)),
                        GradientStop::new(1.0 - outside - band * 0.35, alpha(0.35)),
                        GradientStop::new(1.0 - outside - band * 0.18, alpha(0.08)),
                        GradientStop::new(1.0 - outside, alpha(0.0)),
                    ],
                )
            }
        }
    }
}
