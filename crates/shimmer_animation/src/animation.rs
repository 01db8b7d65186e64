//! Declarative basic animations
//!
//! A `BasicAnimation` interpolates a single scalar property between two values.
//! It holds no playback state of its own: its presentation value is a pure
//! function of the compositor's media time, which is what lets a running
//! animation be retimed or replaced without losing track of where it is.

/// How many times an animation plays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    /// Play a single cycle, then finish
    #[default]
    Once,
    /// Repeat until removed
    Forever,
}

/// Direction progress runs through a cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    #[default]
    Normal,
    /// Run each cycle from `to` back to `from`
    Reverse,
}

/// Whether the animation affects its property outside its active interval
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    /// No effect before begin or after end
    #[default]
    Removed,
    /// Hold the final value after the end
    Forwards,
    /// Hold the initial value before begin
    Backwards,
    /// Both of the above
    Both,
}

impl FillMode {
    pub fn fills_forwards(self) -> bool {
        matches!(self, FillMode::Forwards | FillMode::Both)
    }

    pub fn fills_backwards(self) -> bool {
        matches!(self, FillMode::Backwards | FillMode::Both)
    }
}

/// A scalar animation anchored to an absolute media time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasicAnimation {
    pub from: f32,
    pub to: f32,
    /// Length of one cycle in seconds
    pub duration: f64,
    /// Media time at which the first cycle starts
    pub begin_time: f64,
    pub repeat: Repeat,
    pub direction: PlayDirection,
    pub fill: FillMode,
}

impl BasicAnimation {
    /// Create a linear, single-cycle animation beginning at media time zero
    pub fn new(from: f32, to: f32, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            begin_time: 0.0,
            repeat: Repeat::Once,
            direction: PlayDirection::Normal,
            fill: FillMode::Removed,
        }
    }

    pub fn begin_at(mut self, begin_time: f64) -> Self {
        self.begin_time = begin_time;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn direction(mut self, direction: PlayDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn fill(mut self, fill: FillMode) -> Self {
        self.fill = fill;
        self
    }

    fn has_duration(&self) -> bool {
        self.duration.is_finite() && self.duration > 0.0
    }

    /// Media time at which a single-cycle animation ends
    ///
    /// Returns `None` for repeating animations.
    pub fn end_time(&self) -> Option<f64> {
        match self.repeat {
            Repeat::Forever => None,
            Repeat::Once if self.has_duration() => Some(self.begin_time + self.duration),
            Repeat::Once => Some(self.begin_time),
        }
    }

    /// True once a single-cycle animation has played to its end
    pub fn is_finished_at(&self, now: f64) -> bool {
        self.end_time().is_some_and(|end| now >= end)
    }

    /// Fraction of the current cycle elapsed at `now`, before direction
    ///
    /// Zero before the animation begins and for degenerate durations.
    pub fn cycle_fraction_at(&self, now: f64) -> f64 {
        let elapsed = now - self.begin_time;
        if elapsed <= 0.0 || !self.has_duration() {
            return 0.0;
        }
        let cycles = elapsed / self.duration;
        match self.repeat {
            Repeat::Forever => cycles.fract(),
            Repeat::Once => cycles.min(1.0),
        }
    }

    /// Normalized progress at `now` with direction applied
    ///
    /// Returns `None` when the animation has no effect at `now` (outside its
    /// active interval without a matching fill mode).
    pub fn progress_at(&self, now: f64) -> Option<f32> {
        let elapsed = now - self.begin_time;
        let fraction = if elapsed < 0.0 {
            if !self.fill.fills_backwards() {
                return None;
            }
            0.0
        } else if self.is_finished_at(now) {
            if !self.fill.fills_forwards() {
                return None;
            }
            1.0
        } else {
            self.cycle_fraction_at(now) as f32
        };

        Some(match self.direction {
            PlayDirection::Normal => fraction,
            PlayDirection::Reverse => 1.0 - fraction,
        })
    }

    /// Presentation value at `now`
    pub fn value_at(&self, now: f64) -> Option<f32> {
        self.progress_at(now)
            .map(|p| self.from + (self.to - self.from) * p)
    }
}
