//! Marquee scroll animation.
//!
//! A [`ScrollAnimator`] moves a horizontal text offset leftwards at a fixed
//! speed and wraps it so the text re-enters from the right edge. It holds no
//! reference to its label: [`tick`](ScrollAnimator::tick) returns the new
//! offset and the owner stores it.

use horizon_lite_core::logging::targets::SCROLL as TARGET;
use horizon_lite_render::saturate_i16;

/// Default scroll speed in pixels per second.
pub const DEFAULT_SCROLL_SPEED: u16 = 35;

/// Default number of ticks to wait before scrolling starts.
pub const DEFAULT_WAIT_TICKS: u16 = 50;

/// Scroll parameters, kept by a label until its animator exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollAnimatorConfig {
    /// Speed in pixels per second.
    pub speed: u16,
    /// Offset the text starts from after each (re)start.
    pub start_pos: i16,
    /// Ticks to wait before moving.
    pub wait_ticks: u16,
}

impl Default for ScrollAnimatorConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SCROLL_SPEED,
            start_pos: 0,
            wait_ticks: DEFAULT_WAIT_TICKS,
        }
    }
}

impl ScrollAnimatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speed(mut self, speed: u16) -> Self {
        self.speed = speed;
        self
    }

    pub fn start_pos(mut self, start_pos: i16) -> Self {
        self.start_pos = start_pos;
        self
    }

    pub fn wait_ticks(mut self, wait_ticks: u16) -> Self {
        self.wait_ticks = wait_ticks;
        self
    }
}

/// Animator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    /// Counting down ticks before scrolling.
    Waiting { remaining: u16 },
    /// Moving the offset on every tick.
    Running,
    /// Inert until restarted.
    #[default]
    Stopped,
}

/// Tick-driven horizontal offset with start delay and wrap-around.
///
/// # Example
///
/// ```
/// use horizon_lite::widget::animation::{ScrollAnimator, ScrollAnimatorConfig};
///
/// let config = ScrollAnimatorConfig::new().speed(50).start_pos(100).wait_ticks(1);
/// let mut animator = ScrollAnimator::new(config, 300, 100);
/// animator.start();
///
/// assert_eq!(animator.tick(0), None); // waiting
/// assert_eq!(animator.tick(1000), Some(450)); // 100 - 50, wrapped into [100, 500)
/// ```
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    config: ScrollAnimatorConfig,
    text_extent: i16,
    label_extent: i16,
    offset: i16,
    state: ScrollState,
    prev_time: Option<u32>,
    /// Sub-pixel progress, in pixel-milliseconds (units of 1/1000 px).
    carry: u64,
}

impl ScrollAnimator {
    /// Create a stopped animator for text `text_extent` wide in a label
    /// `label_extent` wide.
    pub fn new(config: ScrollAnimatorConfig, text_extent: i16, label_extent: i16) -> Self {
        Self {
            config,
            text_extent,
            label_extent,
            offset: config.start_pos,
            state: ScrollState::Stopped,
            prev_time: None,
            carry: 0,
        }
    }

    pub fn config(&self) -> ScrollAnimatorConfig {
        self.config
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Whether the animator is waiting or running.
    pub fn is_active(&self) -> bool {
        self.state != ScrollState::Stopped
    }

    pub fn offset(&self) -> i16 {
        self.offset
    }

    pub fn text_extent(&self) -> i16 {
        self.text_extent
    }

    pub fn label_extent(&self) -> i16 {
        self.label_extent
    }

    pub fn speed(&self) -> u16 {
        self.config.speed
    }

    /// Change the speed. Accumulated sub-pixel progress is discarded.
    pub fn set_speed(&mut self, speed: u16) {
        self.config.speed = speed;
        self.carry = 0;
    }

    /// Change the start position used by the next (re)start.
    pub fn set_start_pos(&mut self, start_pos: i16) {
        self.config.start_pos = start_pos;
    }

    /// Change the delay used by the next (re)start.
    pub fn set_wait_ticks(&mut self, wait_ticks: u16) {
        self.config.wait_ticks = wait_ticks;
    }

    /// Begin waiting, then scrolling, from the start position.
    pub fn start(&mut self) {
        self.restart();
        tracing::debug!(target: TARGET, state = ?self.state, offset = self.offset, "scroll started");
    }

    pub fn stop(&mut self) {
        if self.state != ScrollState::Stopped {
            tracing::debug!(target: TARGET, offset = self.offset, "scroll stopped");
        }
        self.state = ScrollState::Stopped;
        self.prev_time = None;
    }

    /// Re-seed the extents after a remeasure.
    ///
    /// The offset returns to the start position and the wait begins again; a
    /// stopped animator stays stopped.
    pub fn update_width(&mut self, text_extent: i16, label_extent: i16) {
        self.text_extent = text_extent;
        self.label_extent = label_extent;
        if self.is_active() {
            self.restart();
        } else {
            self.offset = self.config.start_pos;
            self.carry = 0;
        }
    }

    fn restart(&mut self) {
        self.offset = self.config.start_pos;
        self.carry = 0;
        self.prev_time = None;
        self.state = match self.config.wait_ticks {
            0 => ScrollState::Running,
            remaining => ScrollState::Waiting { remaining },
        };
    }

    /// Advance to clock value `now` (milliseconds, wrapping).
    ///
    /// Returns the new offset when it moved, `None` when nothing visible
    /// changed.
    pub fn tick(&mut self, now: u32) -> Option<i16> {
        match self.state {
            ScrollState::Stopped => None,
            ScrollState::Waiting { remaining } => {
                let remaining = remaining.saturating_sub(1);
                self.prev_time = Some(now);
                self.state = if remaining == 0 {
                    tracing::trace!(target: TARGET, "wait finished");
                    ScrollState::Running
                } else {
                    ScrollState::Waiting { remaining }
                };
                None
            }
            ScrollState::Running => {
                let Some(prev) = self.prev_time.replace(now) else {
                    return None;
                };
                let elapsed = now.wrapping_sub(prev);
                if elapsed == 0 {
                    return None;
                }

                let progress = elapsed as u64 * self.config.speed as u64 + self.carry;
                let step = progress / 1000;
                self.carry = progress % 1000;
                if step == 0 {
                    return None;
                }

                let moved = self.offset as i64 - step as i64;
                self.offset = self.normalize(moved);
                tracing::trace!(target: TARGET, elapsed, step, offset = self.offset, "scroll tick");
                Some(self.offset)
            }
        }
    }

    /// Wrap `offset` into `[label, label + text + label)`.
    fn normalize(&self, offset: i64) -> i16 {
        let label = self.label_extent as i64;
        let modulus = self.text_extent as i64 + label;
        if modulus <= 0 {
            return self.label_extent;
        }
        saturate_i16(((offset - label).rem_euclid(modulus) + label) as i32)
    }
}
