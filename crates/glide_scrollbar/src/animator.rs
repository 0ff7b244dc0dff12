//! Frame-driven scroll animator
//!
//! Turns discrete scroll requests (wheel deltas, arrow and track presses)
//! into a smoothly animated scroll position. The host owns the frame loop:
//! it calls [`ScrollbarAnimator::tick`] once per display refresh while
//! [`ScrollbarAnimator::is_animating`] is true and applies the position it
//! gets back.
//!
//! Requests that arrive while a session is running move the target of the
//! live curve instead of starting over, so momentum carries through.
//!
//! # Example
//!
//! ```rust
//! use glide_scrollbar::{ManualClock, ScrollbarAnimator};
//!
//! let clock = ManualClock::new(0.0);
//! let mut animator = ScrollbarAnimator::builder()
//!     .clock(clock.clone())
//!     .on_position_request(|| 0.0)
//!     .on_maximum_request(|| 1000.0)
//!     .build();
//!
//! animator.scroll(100.0);
//! assert_eq!(animator.target(), Some(100.0));
//!
//! clock.advance(1.0);
//! let frame = animator.tick().unwrap();
//! assert_eq!(frame.position, 100.0);
//! assert!(frame.done);
//! assert!(!animator.is_animating());
//! ```

use glide_animation::{AnimationCurve, DurationBehavior, ScrollOffset, TimingFunction};

use crate::clock::{Clock, SystemClock};

/// Callback returning a position or extent in pixels
pub type PositionRequest = Box<dyn FnMut() -> f64>;

/// Callback receiving each animated position
pub type FrameCallback = Box<dyn FnMut(f64)>;

/// The result of advancing the animator by one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTick {
    /// Scroll position for this frame
    pub position: f64,
    /// The session reached its target and has ended
    pub done: bool,
}

/// A running animation, from the first request until the target is reached
#[derive(Debug)]
struct ScrollSession {
    target: f64,
    start_time: f64,
    curve: AnimationCurve,
}

/// Builder for [`ScrollbarAnimator`]
pub struct ScrollbarAnimatorBuilder {
    clock: Box<dyn Clock>,
    timing_function: TimingFunction,
    duration_behavior: DurationBehavior,
    on_position_request: PositionRequest,
    on_maximum_request: PositionRequest,
    on_animation_frame: Option<FrameCallback>,
}

impl Default for ScrollbarAnimatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollbarAnimatorBuilder {
    pub fn new() -> Self {
        Self {
            clock: Box::new(SystemClock::new()),
            timing_function: TimingFunction::ease_in_out(),
            duration_behavior: DurationBehavior::InverseDelta,
            on_position_request: Box::new(|| 0.0),
            on_maximum_request: Box::new(|| f64::INFINITY),
            on_animation_frame: None,
        }
    }

    /// Time source used by [`ScrollbarAnimator::scroll`] and
    /// [`ScrollbarAnimator::tick`]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Curve used for the first segment of every session
    pub fn timing_function(mut self, timing_function: TimingFunction) -> Self {
        self.timing_function = timing_function;
        self
    }

    pub fn duration_behavior(mut self, behavior: DurationBehavior) -> Self {
        self.duration_behavior = behavior;
        self
    }

    /// Current scroll position, asked once when a session starts
    pub fn on_position_request<F: FnMut() -> f64 + 'static>(mut self, request: F) -> Self {
        self.on_position_request = Box::new(request);
        self
    }

    /// Maximum scroll position, asked on every scroll request
    pub fn on_maximum_request<F: FnMut() -> f64 + 'static>(mut self, request: F) -> Self {
        self.on_maximum_request = Box::new(request);
        self
    }

    /// Invoked with the new position on every tick
    pub fn on_animation_frame<F: FnMut(f64) + 'static>(mut self, callback: F) -> Self {
        self.on_animation_frame = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> ScrollbarAnimator {
        ScrollbarAnimator {
            clock: self.clock,
            timing_function: self.timing_function,
            duration_behavior: self.duration_behavior,
            on_position_request: self.on_position_request,
            on_maximum_request: self.on_maximum_request,
            on_animation_frame: self.on_animation_frame,
            session: None,
        }
    }
}

/// Animates the scroll position toward accumulated scroll requests
pub struct ScrollbarAnimator {
    clock: Box<dyn Clock>,
    timing_function: TimingFunction,
    duration_behavior: DurationBehavior,
    on_position_request: PositionRequest,
    on_maximum_request: PositionRequest,
    on_animation_frame: Option<FrameCallback>,
    session: Option<ScrollSession>,
}

impl ScrollbarAnimator {
    pub fn builder() -> ScrollbarAnimatorBuilder {
        ScrollbarAnimatorBuilder::new()
    }

    /// Request a scroll by `delta` pixels, timed by the animator's clock
    pub fn scroll(&mut self, delta: f64) {
        let now = self.clock.now();
        self.scroll_at(now, delta);
    }

    /// Request a scroll by `delta` pixels at time `now`
    pub fn scroll_at(&mut self, now: f64, delta: f64) {
        let maximum = (self.on_maximum_request)();

        if let Some(session) = self.session.as_mut() {
            let elapsed = now - session.start_time;
            session.target = clamp_target(session.target + delta, maximum);
            session
                .curve
                .update_target(elapsed, ScrollOffset::vertical(session.target));
            tracing::debug!(
                delta,
                elapsed,
                scroll_target = session.target,
                "scroll retargeted"
            );
            return;
        }

        let start = (self.on_position_request)();
        let target = clamp_target(start + delta, maximum);
        let mut curve = AnimationCurve::new(
            ScrollOffset::vertical(target),
            self.timing_function,
            self.duration_behavior,
        );
        curve.set_initial_value(ScrollOffset::vertical(start), 0.0);

        tracing::debug!(
            start,
            scroll_target = target,
            duration = curve.duration(),
            "scroll session started"
        );

        self.session = Some(ScrollSession {
            target,
            start_time: now,
            curve,
        });
    }

    /// Advance one frame using the animator's clock
    pub fn tick(&mut self) -> Option<FrameTick> {
        let now = self.clock.now();
        self.tick_at(now)
    }

    /// Sample the animation at `now`.
    ///
    /// Returns `None` when idle. The session ends on the frame whose
    /// position equals the target.
    pub fn tick_at(&mut self, now: f64) -> Option<FrameTick> {
        let session = self.session.as_ref()?;
        let elapsed = now - session.start_time;
        let position = session.curve.value(elapsed).y;
        let done = position == session.target;

        tracing::trace!(elapsed, position, done, "scroll frame");

        if let Some(on_frame) = self.on_animation_frame.as_mut() {
            on_frame(position);
        }

        if done {
            tracing::debug!(position, "scroll session finished");
            self.session = None;
        }

        Some(FrameTick { position, done })
    }

    /// Drop the running session, leaving the position where it last was
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("scroll session cancelled");
        }
    }

    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// Target of the running session
    pub fn target(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.target)
    }

    /// Curve of the running session, on a timeline starting at the
    /// session's first request
    pub fn curve(&self) -> Option<&AnimationCurve> {
        self.session.as_ref().map(|s| &s.curve)
    }

    /// Clock time the running session started at
    pub fn start_time(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.start_time)
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }
}

/// Keep a target inside `[0, maximum]`
fn clamp_target(target: f64, maximum: f64) -> f64 {
    target.min(maximum.max(0.0)).max(0.0)
}
