//! Animator scheduling for Horizon Lite.
//!
//! The scheduler does not own any animation state. Widgets register an
//! [`AnimatorId`], start and stop it, and the host drives the scheduler with a
//! millisecond clock. Every frame yields the ids of running animators, which the
//! host routes back to the widgets that own them.
//!
//! The clock is a free-running `u32` millisecond counter as found on embedded
//! targets; all interval arithmetic uses wrapping subtraction so the counter may
//! overflow without stalling animations.

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::{AnimatorError, Result};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a registered animator.
    pub struct AnimatorId;
}

/// Default frame period in milliseconds.
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 16;

/// Whether a registered animator receives frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// Registered and receiving frames.
    Running,
    /// Registered but inert.
    Stopped,
}

/// Internal animator data.
#[derive(Debug)]
struct AnimatorData {
    state: AnimatorState,
    /// Clock value when the animator was last started.
    started_at: u32,
}

/// Tracks registered animators and hands out frames.
#[derive(Debug)]
pub struct AnimatorScheduler {
    animators: SlotMap<AnimatorId, AnimatorData>,
    frame_interval: u32,
    last_frame: Option<u32>,
}

impl AnimatorScheduler {
    /// Create a scheduler with the default frame interval.
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL_MS)
    }

    /// Create a scheduler that delivers at most one frame per `interval_ms`.
    ///
    /// An interval of zero delivers a frame on every call to [`frame`](Self::frame).
    pub fn with_frame_interval(interval_ms: u32) -> Self {
        Self {
            animators: SlotMap::with_key(),
            frame_interval: interval_ms,
            last_frame: None,
        }
    }

    /// The configured frame interval in milliseconds.
    pub fn frame_interval(&self) -> u32 {
        self.frame_interval
    }

    /// Register a new animator in the stopped state.
    pub fn register(&mut self) -> AnimatorId {
        let id = self.animators.insert(AnimatorData {
            state: AnimatorState::Stopped,
            started_at: 0,
        });
        tracing::trace!(target: targets::ANIMATOR, ?id, "animator registered");
        id
    }

    /// Remove an animator. It receives no further frames.
    pub fn unregister(&mut self, id: AnimatorId) -> Result<()> {
        if self.animators.remove(id).is_some() {
            tracing::trace!(target: targets::ANIMATOR, ?id, "animator unregistered");
            Ok(())
        } else {
            Err(AnimatorError::InvalidAnimatorId.into())
        }
    }

    /// Start (or restart) an animator at clock value `now`.
    pub fn start(&mut self, id: AnimatorId, now: u32) -> Result<()> {
        let data = self
            .animators
            .get_mut(id)
            .ok_or(AnimatorError::InvalidAnimatorId)?;
        data.state = AnimatorState::Running;
        data.started_at = now;
        Ok(())
    }

    /// Stop an animator without unregistering it.
    pub fn stop(&mut self, id: AnimatorId) -> Result<()> {
        let data = self
            .animators
            .get_mut(id)
            .ok_or(AnimatorError::InvalidAnimatorId)?;
        data.state = AnimatorState::Stopped;
        Ok(())
    }

    /// Check whether an animator is registered.
    pub fn is_registered(&self, id: AnimatorId) -> bool {
        self.animators.contains_key(id)
    }

    /// Check whether an animator is registered and running.
    pub fn is_running(&self, id: AnimatorId) -> bool {
        self.animators
            .get(id)
            .is_some_and(|a| a.state == AnimatorState::Running)
    }

    /// Get the state of an animator.
    pub fn state(&self, id: AnimatorId) -> Option<AnimatorState> {
        self.animators.get(id).map(|a| a.state)
    }

    /// Milliseconds since the animator was started, tolerant of clock wrap.
    pub fn run_time(&self, id: AnimatorId, now: u32) -> Result<u32> {
        let data = self
            .animators
            .get(id)
            .ok_or(AnimatorError::InvalidAnimatorId)?;
        if data.state != AnimatorState::Running {
            return Err(AnimatorError::NotRunning.into());
        }
        Ok(now.wrapping_sub(data.started_at))
    }

    /// Milliseconds until the next frame is due, or `None` when nothing runs.
    pub fn time_until_next_frame(&self, now: u32) -> Option<u32> {
        if self.running_count() == 0 {
            return None;
        }
        match self.last_frame {
            Some(last) => Some(self.frame_interval.saturating_sub(now.wrapping_sub(last))),
            None => Some(0),
        }
    }

    /// Produce a frame at clock value `now`.
    ///
    /// Returns the running animators to dispatch, or an empty list if the
    /// frame interval has not elapsed since the previous frame.
    #[tracing::instrument(skip(self), target = "horizon_lite_core::animator", level = "trace")]
    pub fn frame(&mut self, now: u32) -> Vec<AnimatorId> {
        if let Some(last) = self.last_frame {
            if now.wrapping_sub(last) < self.frame_interval {
                return Vec::new();
            }
        }
        self.last_frame = Some(now);

        self.animators
            .iter()
            .filter(|(_, a)| a.state == AnimatorState::Running)
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of running animators.
    pub fn running_count(&self) -> usize {
        self.animators
            .values()
            .filter(|a| a.state == AnimatorState::Running)
            .count()
    }

    /// Number of registered animators, running or not.
    pub fn registered_count(&self) -> usize {
        self.animators.len()
    }
}

impl Default for AnimatorScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable, thread-safe handle to an [`AnimatorScheduler`].
///
/// Widgets keep a clone so they can register and unregister their animators
/// over their whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct SharedAnimatorScheduler {
    inner: Arc<Mutex<AnimatorScheduler>>,
}

impl SharedAnimatorScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame_interval(interval_ms: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AnimatorScheduler::with_frame_interval(interval_ms))),
        }
    }

    pub fn register(&self) -> AnimatorId {
        self.inner.lock().register()
    }

    pub fn unregister(&self, id: AnimatorId) -> Result<()> {
        self.inner.lock().unregister(id)
    }

    pub fn start(&self, id: AnimatorId, now: u32) -> Result<()> {
        self.inner.lock().start(id, now)
    }

    pub fn stop(&self, id: AnimatorId) -> Result<()> {
        self.inner.lock().stop(id)
    }

    pub fn is_registered(&self, id: AnimatorId) -> bool {
        self.inner.lock().is_registered(id)
    }

    pub fn is_running(&self, id: AnimatorId) -> bool {
        self.inner.lock().is_running(id)
    }

    pub fn run_time(&self, id: AnimatorId, now: u32) -> Result<u32> {
        self.inner.lock().run_time(id, now)
    }

    pub fn time_until_next_frame(&self, now: u32) -> Option<u32> {
        self.inner.lock().time_until_next_frame(now)
    }

    pub fn frame(&self, now: u32) -> Vec<AnimatorId> {
        self.inner.lock().frame(now)
    }

    pub fn running_count(&self) -> usize {
        self.inner.lock().running_count()
    }

    pub fn registered_count(&self) -> usize {
        self.inner.lock().registered_count()
    }
}

static_assertions::assert_impl_all!(SharedAnimatorScheduler: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LiteError;

    #[test]
    fn test_register_starts_stopped() {
        let mut scheduler = AnimatorScheduler::new();
        let id = scheduler.register();
        assert!(scheduler.is_registered(id));
        assert!(!scheduler.is_running(id));
        assert_eq!(scheduler.state(id), Some(AnimatorState::Stopped));
        assert!(scheduler.frame(0).is_empty());
    }

    #[test]
    fn test_frame_dispatches_running_only() {
        let mut scheduler = AnimatorScheduler::with_frame_interval(0);
        let a = scheduler.register();
        let b = scheduler.register();
        scheduler.start(a, 0).unwrap();

        assert_eq!(scheduler.frame(5), vec![a]);
        scheduler.start(b, 5).unwrap();
        scheduler.stop(a).unwrap();
        assert_eq!(scheduler.frame(10), vec![b]);
    }

    #[test]
    fn test_frame_interval_throttles() {
        let mut scheduler = AnimatorScheduler::with_frame_interval(16);
        let id = scheduler.register();
        scheduler.start(id, 0).unwrap();

        assert_eq!(scheduler.frame(100), vec![id]);
        assert!(scheduler.frame(110).is_empty());
        assert_eq!(scheduler.frame(116), vec![id]);
    }

    #[test]
    fn test_frame_interval_survives_clock_wrap() {
        let mut scheduler = AnimatorScheduler::with_frame_interval(16);
        let id = scheduler.register();
        scheduler.start(id, u32::MAX - 4).unwrap();

        assert_eq!(scheduler.frame(u32::MAX - 4), vec![id]);
        assert!(scheduler.frame(3).is_empty());
        assert_eq!(scheduler.frame(12), vec![id]);
        assert_eq!(scheduler.run_time(id, 12).unwrap(), 17);
    }

    #[test]
    fn test_unregister_invalid_id() {
        let mut scheduler = AnimatorScheduler::new();
        let id = scheduler.register();
        scheduler.unregister(id).unwrap();
        assert!(matches!(
            scheduler.unregister(id),
            Err(LiteError::Animator(AnimatorError::InvalidAnimatorId))
        ));
        assert!(scheduler.start(id, 0).is_err());
    }

    #[test]
    fn test_run_time_requires_running() {
        let mut scheduler = AnimatorScheduler::new();
        let id = scheduler.register();
        assert!(matches!(
            scheduler.run_time(id, 10),
            Err(LiteError::Animator(AnimatorError::NotRunning))
        ));
    }

    #[test]
    fn test_time_until_next_frame() {
        let mut scheduler = AnimatorScheduler::with_frame_interval(16);
        assert_eq!(scheduler.time_until_next_frame(0), None);

        let id = scheduler.register();
        scheduler.start(id, 0).unwrap();
        assert_eq!(scheduler.time_until_next_frame(0), Some(0));

        scheduler.frame(0);
        assert_eq!(scheduler.time_until_next_frame(10), Some(6));
        assert_eq!(scheduler.time_until_next_frame(40), Some(0));
    }

    #[test]
    fn test_shared_scheduler_clones_share_state() {
        let shared = SharedAnimatorScheduler::with_frame_interval(0);
        let other = shared.clone();
        let id = shared.register();
        other.start(id, 0).unwrap();
        assert!(shared.is_running(id));
        assert_eq!(shared.running_count(), 1);
        assert_eq!(other.registered_count(), 1);
    }
}
