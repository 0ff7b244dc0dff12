//! Retargetable scroll offset animation curve
//!
//! An [`AnimationCurve`] eases a [`ScrollOffset`] from an initial value to a
//! target over a duration derived from the distance travelled. The target can
//! be moved while the curve is running: the new segment starts from wherever
//! the curve is at that instant and keeps the outgoing velocity, so repeated
//! wheel input never produces a jump in position or speed.
//!
//! Times are in seconds and measured on the caller's timeline (typically the
//! elapsed time since the animation session started).
//!
//! # Example
//!
//! ```rust
//! use glide_animation::{AnimationCurve, DurationBehavior, ScrollOffset, TimingFunction};
//!
//! let mut curve = AnimationCurve::new(
//!     ScrollOffset::vertical(100.0),
//!     TimingFunction::ease_in_out(),
//!     DurationBehavior::InverseDelta,
//! );
//! curve.set_initial_value(ScrollOffset::ZERO, 0.0);
//!
//! assert_eq!(curve.value(0.0).y, 0.0);
//! assert_eq!(curve.value(curve.duration()).y, 100.0);
//!
//! // More input arrives mid-flight
//! curve.update_target(0.05, ScrollOffset::vertical(200.0));
//! assert_eq!(curve.target_value().y, 200.0);
//! ```

use crate::easing::TimingFunction;
use crate::offset::ScrollOffset;

/// Distance and duration below which changes are ignored
pub const EPSILON: f64 = 0.01;

/// Frames per second that the frame-count constants below are expressed in
const DURATION_DIVISOR: f64 = 60.0;

/// Constant policy duration, in frames
const CONSTANT_DURATION: f64 = 9.0;

const INVERSE_DELTA_RAMP_START_PX: f64 = 120.0;
const INVERSE_DELTA_RAMP_END_PX: f64 = 480.0;
const INVERSE_DELTA_MIN_DURATION: f64 = 6.0;
const INVERSE_DELTA_MAX_DURATION: f64 = 12.0;
const INVERSE_DELTA_SLOPE: f64 = (INVERSE_DELTA_MIN_DURATION - INVERSE_DELTA_MAX_DURATION)
    / (INVERSE_DELTA_RAMP_END_PX - INVERSE_DELTA_RAMP_START_PX);
const INVERSE_DELTA_OFFSET: f64 =
    INVERSE_DELTA_MAX_DURATION - INVERSE_DELTA_RAMP_START_PX * INVERSE_DELTA_SLOPE;

/// How long a retargeted segment may run relative to the time the outgoing
/// velocity would need to cover the new distance
const VELOCITY_BOUND_FACTOR: f64 = 2.5;

/// Rule for deriving a segment's length from the distance it covers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum DurationBehavior {
    /// Always 9 frames
    Constant,
    /// sqrt(distance) frames
    #[default]
    DeltaBased,
    /// Shorter for longer distances: 12 frames at 120px down to 6 frames at 480px
    InverseDelta,
}

/// Duration in seconds of a segment covering `delta`, minus `delayed_by`,
/// never negative.
pub fn segment_duration(delta: ScrollOffset, behavior: DurationBehavior, delayed_by: f64) -> f64 {
    let frames = match behavior {
        DurationBehavior::Constant => CONSTANT_DURATION,
        DurationBehavior::DeltaBased => delta.max_dimension().abs().sqrt(),
        DurationBehavior::InverseDelta => (INVERSE_DELTA_OFFSET
            + delta.max_dimension().abs() * INVERSE_DELTA_SLOPE)
            .clamp(INVERSE_DELTA_MIN_DURATION, INVERSE_DELTA_MAX_DURATION),
    };

    (frames / DURATION_DIVISOR - delayed_by).max(0.0)
}

/// Upper bound on a retargeted segment's duration given the outgoing motion.
///
/// Returns 0 when there is nowhere left to go and infinity when the old
/// motion gives nothing to bound against or the direction reverses.
fn velocity_based_duration_bound(
    old_delta: ScrollOffset,
    old_normalized_velocity: f64,
    old_duration: f64,
    new_delta: ScrollOffset,
) -> f64 {
    let old_delta_max_dimension = old_delta.max_dimension();
    let new_delta_max_dimension = new_delta.max_dimension();

    if new_delta_max_dimension.abs() < EPSILON {
        return 0.0;
    }

    if old_delta_max_dimension.abs() < EPSILON || old_normalized_velocity.abs() < EPSILON {
        return f64::INFINITY;
    }

    let old_true_velocity = old_normalized_velocity * old_delta_max_dimension / old_duration;
    let bound = (new_delta_max_dimension / old_true_velocity) * VELOCITY_BOUND_FACTOR;

    if bound < 0.0 {
        f64::INFINITY
    } else {
        bound
    }
}

/// A scroll offset animation that can be retargeted while running
#[derive(Clone, Debug)]
pub struct AnimationCurve {
    initial_value: ScrollOffset,
    target_value: ScrollOffset,
    total_duration: f64,
    last_retarget: f64,
    timing_function: TimingFunction,
    duration_behavior: DurationBehavior,
    has_set_initial_value: bool,
}

impl AnimationCurve {
    pub fn new(
        target_value: ScrollOffset,
        timing_function: TimingFunction,
        duration_behavior: DurationBehavior,
    ) -> Self {
        Self {
            initial_value: ScrollOffset::ZERO,
            target_value,
            total_duration: 0.0,
            last_retarget: 0.0,
            timing_function,
            duration_behavior,
            has_set_initial_value: false,
        }
    }

    /// Set where the animation starts and size its first segment.
    ///
    /// `delayed_by` is time already lost before the first frame and is
    /// taken off the computed duration.
    pub fn set_initial_value(&mut self, initial_value: ScrollOffset, delayed_by: f64) {
        self.initial_value = initial_value;
        self.has_set_initial_value = true;
        self.total_duration = segment_duration(
            self.target_value.delta_from(self.initial_value),
            self.duration_behavior,
            delayed_by,
        );
    }

    pub fn has_set_initial_value(&self) -> bool {
        self.has_set_initial_value
    }

    /// Shift the whole animation by `adjustment` without changing its timing
    pub fn apply_adjustment(&mut self, adjustment: ScrollOffset) {
        self.initial_value = self.initial_value.with_delta(adjustment);
        self.target_value = self.target_value.with_delta(adjustment);
    }

    /// Position at time `t`
    pub fn value(&self, t: f64) -> ScrollOffset {
        let duration = self.total_duration - self.last_retarget;
        let t = t - self.last_retarget;

        if duration == 0.0 {
            return self.target_value;
        }
        if t <= 0.0 {
            return self.initial_value;
        }
        if t >= duration {
            return self.target_value;
        }

        let progress = self.timing_function.value(t / duration);
        ScrollOffset::tween(progress, self.initial_value, self.target_value)
    }

    /// Whether the curve has settled on its target at time `t`
    pub fn is_finished(&self, t: f64) -> bool {
        let duration = self.total_duration - self.last_retarget;
        duration <= 0.0 || t - self.last_retarget >= duration
    }

    /// End time of the current segment, on the same timeline as `value`
    pub fn duration(&self) -> f64 {
        self.total_duration
    }

    pub fn last_retarget(&self) -> f64 {
        self.last_retarget
    }

    pub fn initial_value(&self) -> ScrollOffset {
        self.initial_value
    }

    pub fn target_value(&self) -> ScrollOffset {
        self.target_value
    }

    pub fn timing_function(&self) -> &TimingFunction {
        &self.timing_function
    }

    pub fn duration_behavior(&self) -> DurationBehavior {
        self.duration_behavior
    }

    /// Move the target to `new_target` at time `t`.
    ///
    /// The new segment starts at the position the curve has at `t` and
    /// leaves it with the old segment's velocity. Calls must arrive in
    /// non-decreasing time order; a `t` before the last retarget is treated
    /// as the last retarget time.
    pub fn update_target(&mut self, t: f64, new_target: ScrollOffset) {
        if self
            .target_value
            .delta_from(new_target)
            .max_dimension()
            .abs()
            < EPSILON
        {
            self.target_value = new_target;
            return;
        }

        let delayed_by = (self.last_retarget - t).max(0.0);
        let t = t.max(self.last_retarget);

        let current_position = self.value(t);
        let old_delta = self.target_value.delta_from(self.initial_value);
        let new_delta = new_target.delta_from(current_position);

        let old_duration = self.total_duration - self.last_retarget;
        if old_duration == 0.0 {
            // Nothing was moving, start a fresh segment from here
            let new_duration = segment_duration(new_delta, self.duration_behavior, delayed_by);
            tracing::trace!(t, new_duration, "fresh segment after settled curve");
            self.initial_value = current_position;
            self.target_value = new_target;
            self.total_duration = t + new_duration;
            self.last_retarget = t;
            return;
        }

        let old_normalized_velocity = self
            .timing_function
            .velocity((t - self.last_retarget) / old_duration);

        // Cap the new segment so a large outgoing velocity over a short
        // remaining distance does not rubber-band.
        let new_duration = segment_duration(new_delta, self.duration_behavior, delayed_by).min(
            velocity_based_duration_bound(
                old_delta,
                old_normalized_velocity,
                old_duration,
                new_delta,
            ),
        );

        if new_duration < EPSILON {
            tracing::trace!(t, "retarget settles immediately");
            self.target_value = new_target;
            self.total_duration = t;
            return;
        }

        let new_normalized_velocity = old_normalized_velocity
            * (new_duration / old_duration)
            * (old_delta.max_dimension() / new_delta.max_dimension());

        tracing::trace!(
            t,
            new_duration,
            old_normalized_velocity,
            new_normalized_velocity,
            scroll_target = new_target.y,
            "retarget"
        );

        self.initial_value = current_position;
        self.target_value = new_target;
        self.total_duration = t + new_duration;
        self.last_retarget = t;
        self.timing_function = TimingFunction::with_initial_velocity(new_normalized_velocity);
    }
}
