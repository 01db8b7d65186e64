//! Animation compositor
//!
//! Owns every installed animation and the media clock they are sampled
//! against. The compositor is driven explicitly: hosts either call `tick()`
//! once per frame (wall-clock time) or `advance(dt)` (manual time, used by
//! tests and headless previews).
//!
//! Completion is the only asynchronous boundary. When a single-cycle
//! animation reaches its end, or is removed before doing so, its `Delegate`
//! receives a `Completion` over a channel. The receiving component drains that
//! channel on its own thread, so callbacks never re-enter the compositor.

use crate::animation::BasicAnimation;
use slotmap::{new_key_type, SlotMap};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

new_key_type! {
    /// Handle to an installed animation
    pub struct AnimationId;
}

/// Notification that an animation stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    pub animation: AnimationId,
    /// Tag supplied with the delegate when the animation was installed
    pub tag: u64,
    /// `true` when the animation played to its end, `false` when removed early
    pub finished: bool,
}

/// Receiver side of completion notifications for one animation
#[derive(Clone, Debug)]
pub struct Delegate {
    sender: Sender<Completion>,
    tag: u64,
}

impl Delegate {
    pub fn new(sender: Sender<Completion>, tag: u64) -> Self {
        Self { sender, tag }
    }

    fn notify(&self, animation: AnimationId, finished: bool) {
        let completion = Completion {
            animation,
            tag: self.tag,
            finished,
        };
        if self.sender.send(completion).is_err() {
            tracing::trace!("Completion receiver dropped for {:?}", animation);
        }
    }
}

struct Entry {
    animation: BasicAnimation,
    delegate: Option<Delegate>,
    notified: bool,
}

/// Internal state of the compositor
struct CompositorInner {
    animations: SlotMap<AnimationId, Entry>,
    /// Media time in seconds since the compositor was created
    media_time: f64,
    last_frame: Instant,
}

impl CompositorInner {
    /// Collect delegates of animations that reached their end
    fn take_finished(&mut self) -> Vec<(Delegate, AnimationId)> {
        let now = self.media_time;
        let mut finished = Vec::new();
        for (id, entry) in self.animations.iter_mut() {
            if entry.notified || !entry.animation.is_finished_at(now) {
                continue;
            }
            entry.notified = true;
            if let Some(delegate) = &entry.delegate {
                finished.push((delegate.clone(), id));
            }
        }
        finished
    }

    fn has_active_animations(&self) -> bool {
        let now = self.media_time;
        self.animations
            .values()
            .any(|entry| !entry.animation.is_finished_at(now))
    }
}

fn lock(inner: &Mutex<CompositorInner>) -> MutexGuard<'_, CompositorInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The compositor that owns animations and the shared media clock
///
/// Typically one per window or event loop, shared with components via
/// `CompositorHandle`.
///
/// ```
/// use shimmer_animation::{AnimationCompositor, BasicAnimation};
///
/// let compositor = AnimationCompositor::new();
/// let handle = compositor.handle();
/// let id = handle
///     .add_animation(BasicAnimation::new(0.0, 10.0, 1.0), None)
///     .unwrap();
///
/// compositor.advance(0.5);
/// assert_eq!(handle.sample(id), Some(5.0));
/// ```
pub struct AnimationCompositor {
    inner: Arc<Mutex<CompositorInner>>,
}

impl AnimationCompositor {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CompositorInner {
                animations: SlotMap::with_key(),
                media_time: 0.0,
                last_frame: Instant::now(),
            })),
        }
    }

    /// Get a handle to this compositor for passing to components
    pub fn handle(&self) -> CompositorHandle {
        CompositorHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Current media time in seconds
    pub fn now(&self) -> f64 {
        lock(&self.inner).media_time
    }

    /// Advance the media clock by `dt` seconds and deliver completions
    ///
    /// Negative or non-finite deltas leave the clock untouched but still
    /// deliver completions that are already due. Returns the number of
    /// completions delivered.
    pub fn advance(&self, dt: f64) -> usize {
        let finished = {
            let mut inner = lock(&self.inner);
            if dt.is_finite() && dt > 0.0 {
                inner.media_time += dt;
            }
            inner.take_finished()
        };

        // Notify outside the lock
        for (delegate, id) in &finished {
            delegate.notify(*id, true);
        }
        finished.len()
    }

    /// Advance the media clock by the wall-clock time since the last tick
    ///
    /// Returns true if any animations are still active (need another tick).
    pub fn tick(&self) -> bool {
        let dt = {
            let mut inner = lock(&self.inner);
            let now = Instant::now();
            let dt = (now - inner.last_frame).as_secs_f64();
            inner.last_frame = now;
            dt
        };
        self.advance(dt);
        self.has_active_animations()
    }

    /// Check if any animations are still playing
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner).has_active_animations()
    }

    /// Number of installed animations, finished ones included
    pub fn animation_count(&self) -> usize {
        lock(&self.inner).animations.len()
    }
}

impl Default for AnimationCompositor {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation compositor
///
/// It won't keep the compositor alive; every operation is a no-op once the
/// compositor has been dropped.
#[derive(Clone)]
pub struct CompositorHandle {
    inner: Weak<Mutex<CompositorInner>>,
}

impl CompositorHandle {
    /// Current media time, if the compositor is alive
    pub fn now(&self) -> Option<f64> {
        self.inner.upgrade().map(|inner| lock(&inner).media_time)
    }

    /// Install an animation and return its ID
    pub fn add_animation(
        &self,
        animation: BasicAnimation,
        delegate: Option<Delegate>,
    ) -> Option<AnimationId> {
        self.inner.upgrade().map(|inner| {
            let mut guard = lock(&inner);
            // Prevent a huge dt on the next tick after an idle period
            guard.last_frame = Instant::now();
            guard.animations.insert(Entry {
                animation,
                delegate,
                notified: false,
            })
        })
    }

    /// Remove an animation
    ///
    /// A delegate that has not yet been told about completion is notified with
    /// `finished = false`.
    pub fn remove_animation(&self, id: AnimationId) -> Option<BasicAnimation> {
        let entry = self
            .inner
            .upgrade()
            .and_then(|inner| lock(&inner).animations.remove(id))?;

        if !entry.notified {
            if let Some(delegate) = &entry.delegate {
                delegate.notify(id, false);
            }
        }
        Some(entry.animation)
    }

    /// Copy of an installed animation
    pub fn animation(&self, id: AnimationId) -> Option<BasicAnimation> {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).animations.get(id).map(|e| e.animation))
    }

    /// Apply a function to modify an installed animation in place
    ///
    /// The animation keeps its ID and delegate. If the change moves its end
    /// into the future it becomes eligible for completion again.
    pub fn with_animation_mut<F, R>(&self, id: AnimationId, f: F) -> Option<R>
    where
        F: FnOnce(&mut BasicAnimation) -> R,
    {
        let inner = self.inner.upgrade()?;
        let mut guard = lock(&inner);
        let now = guard.media_time;
        let entry = guard.animations.get_mut(id)?;
        let result = f(&mut entry.animation);
        if !entry.animation.is_finished_at(now) {
            entry.notified = false;
        }
        Some(result)
    }

    /// Presentation value of an animation at the current media time
    pub fn sample(&self, id: AnimationId) -> Option<f32> {
        let inner = self.inner.upgrade()?;
        let guard = lock(&inner);
        let now = guard.media_time;
        guard
            .animations
            .get(id)
            .and_then(|e| e.animation.value_at(now))
    }

    /// Check if the compositor is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
