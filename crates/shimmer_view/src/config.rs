//! Shimmer configuration
//!
//! A plain value record. The engine never mutates it; a new value replaces the
//! old one wholesale, and [`ShimmerConfiguration::diff`] decides how much of a
//! running shimmer has to be rebuilt.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use shimmer_animation::PlayDirection;
use shimmer_core::Axis;

/// Direction the highlight band sweeps in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::Right | Direction::Left => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    /// Right and down translate the mask towards positive coordinates
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    pub(crate) fn play_direction(self) -> PlayDirection {
        if self.is_forward() {
            PlayDirection::Normal
        } else {
            PlayDirection::Reverse
        }
    }
}

/// Shape of the brightness curve across the highlight band
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientProfile {
    /// Dim, bright, dim
    #[default]
    ThreeStop,
    /// Seven-stop bell curve whose edges ease in slowly
    Feathered,
}

/// Parameters of a shimmer sweep
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimmerConfiguration {
    /// Sweep speed in points per second
    pub speed: f32,
    pub direction: Direction,
    /// Highlight band length as a fraction of the content extent [0, 1]
    pub highlight_length: f32,
    /// Pause between sweep repetitions in seconds
    pub pause_duration: f64,
    /// Opacity of the content in the dimmed part of the sweep
    pub animation_opacity: f32,
    /// Opacity of the content under the highlight band
    pub base_opacity: f32,
    /// Fade-in duration when shimmering starts, in seconds
    pub begin_fade_duration: f64,
    /// Fade-out duration when shimmering stops, in seconds
    pub end_fade_duration: f64,
    pub profile: GradientProfile,
}

impl ShimmerConfiguration {
    pub const DEFAULT: ShimmerConfiguration = ShimmerConfiguration {
        speed: 600.0,
        direction: Direction::Right,
        highlight_length: 0.42,
        pause_duration: 0.49,
        animation_opacity: 0.57,
        base_opacity: 1.0,
        begin_fade_duration: 0.1,
        end_fade_duration: 0.3,
        profile: GradientProfile::ThreeStop,
    };

    /// Check every field against its documented range
    ///
    /// The engine itself accepts any value and only guards its divisions;
    /// callers loading configuration from outside use this to reject bad input.
    pub fn validate(&self) -> Result<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }

        for (field, value) in [
            ("highlight_length", self.highlight_length),
            ("animation_opacity", self.animation_opacity),
            ("base_opacity", self.base_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::FractionOutOfRange { field, value });
            }
        }

        for (field, value) in [
            ("pause_duration", self.pause_duration),
            ("begin_fade_duration", self.begin_fade_duration),
            ("end_fade_duration", self.end_fade_duration),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidDuration { field, value });
            }
        }

        Ok(())
    }

    /// Classify what a running shimmer must redo to move from `old` to `new`
    pub fn diff(old: &ShimmerConfiguration, new: &ShimmerConfiguration) -> ConfigurationChange {
        if old == new {
            ConfigurationChange::Unchanged
        } else if old.direction != new.direction || old.speed != new.speed {
            ConfigurationChange::Replace
        } else if old.highlight_length != new.highlight_length
            || old.pause_duration != new.pause_duration
        {
            ConfigurationChange::Retime
        } else {
            ConfigurationChange::Appearance
        }
    }
}

impl Default for ShimmerConfiguration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Work needed to apply a configuration change to a running shimmer
///
/// Ordered by increasing cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigurationChange {
    Unchanged,
    /// Opacities, profile or fade durations: restyle the gradient only
    Appearance,
    /// Geometry changed: keep the running slide but retime it
    Retime,
    /// Direction or speed changed: install a new slide
    Replace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = ShimmerConfiguration::default();
        assert_eq!(config.speed, 600.0);
        assert_eq!(config.direction, Direction::Right);
        assert_eq!(config.highlight_length, 0.42);
        assert_eq!(config.pause_duration, 0.49);
        assert_eq!(config.animation_opacity, 0.57);
        assert_eq!(config.base_opacity, 1.0);
        assert_eq!(config.begin_fade_duration, 0.1);
        assert_eq!(config.end_fade_duration, 0.3);
        assert_eq!(config.profile, GradientProfile::ThreeStop);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configuration_equality() {
        let a = ShimmerConfiguration::default();
        let mut b = a;
        assert_eq!(a, b);

        b.speed = 100.0;
        assert_ne!(a, b);

        let mut c = a;
        c.end_fade_duration = 0.31;
        assert_ne!(a, c);
    }

    #[test]
    fn test_direction_axis() {
        assert_eq!(Direction::Right.axis(), Axis::Horizontal);
        assert_eq!(Direction::Left.axis(), Axis::Horizontal);
        assert_eq!(Direction::Up.axis(), Axis::Vertical);
        assert!(Direction::Down.is_forward());
        assert!(!Direction::Up.is_forward());
        assert_eq!(Direction::Left.play_direction(), PlayDirection::Reverse);
    }

    #[test]
    fn test_diff_classification() {
        let base = ShimmerConfiguration::default();

        assert_eq!(
            ShimmerConfiguration::diff(&base, &base),
            ConfigurationChange::Unchanged
        );

        let mut faster = base;
        faster.speed = 900.0;
        assert_eq!(
            ShimmerConfiguration::diff(&base, &faster),
            ConfigurationChange::Replace
        );

        let mut reversed = base;
        reversed.direction = Direction::Left;
        assert_eq!(
            ShimmerConfiguration::diff(&base, &reversed),
            ConfigurationChange::Replace
        );

        let mut longer_pause = base;
        longer_pause.pause_duration = 1.0;
        assert_eq!(
            ShimmerConfiguration::diff(&base, &longer_pause),
            ConfigurationChange::Retime
        );

        let mut dimmer = base;
        dimmer.animation_opacity = 0.2;
        dimmer.end_fade_duration = 1.0;
        assert_eq!(
            ShimmerConfiguration::diff(&base, &dimmer),
            ConfigurationChange::Appearance
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = ShimmerConfiguration::default();
        config.speed = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed(0.0)));

        let mut config = ShimmerConfiguration::default();
        config.highlight_length = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::FractionOutOfRange {
                field: "highlight_length",
                value: 1.5
            })
        );

        let mut config = ShimmerConfiguration::default();
        config.end_fade_duration = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration {
                field: "end_fade_duration",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ShimmerConfiguration = toml::from_str(
            r#"
            speed = 120.0
            direction = "up"
            profile = "feathered"
            "#,
        )
        .unwrap();

        assert_eq!(config.speed, 120.0);
        assert_eq!(config.direction, Direction::Up);
        assert_eq!(config.profile, GradientProfile::Feathered);
        assert_eq!(config.highlight_length, 0.42);
        assert_eq!(config.end_fade_duration, 0.3);
    }
}
