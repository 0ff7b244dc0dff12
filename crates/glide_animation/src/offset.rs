//! Two-dimensional scroll offsets
//!
//! Only the `y` axis is ever driven by user scrolling; `x` is carried so that
//! curves can be expressed over a full offset and stays at 0 unless adjusted.

use std::ops::{Add, Sub};

/// A scroll position or scroll delta in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset on the vertical axis only
    pub const fn vertical(y: f64) -> Self {
        Self { x: 0.0, y }
    }

    /// This offset moved by `delta`
    pub fn with_delta(self, delta: ScrollOffset) -> Self {
        self + delta
    }

    /// The delta that takes `from` to `self`
    pub fn delta_from(self, from: ScrollOffset) -> Self {
        self - from
    }

    /// The component with the larger magnitude, sign preserved.
    ///
    /// Ties go to `y`.
    pub fn max_dimension(&self) -> f64 {
        if self.x.abs() > self.y.abs() {
            self.x
        } else {
            self.y
        }
    }

    /// Interpolate each axis between `start` and `target` by `progress`
    pub fn tween(progress: f64, start: ScrollOffset, target: ScrollOffset) -> Self {
        Self {
            x: tween(progress, start.x, target.x),
            y: tween(progress, start.y, target.y),
        }
    }
}

impl Add for ScrollOffset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for ScrollOffset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[inline]
fn tween(progress: f64, start: f64, target: f64) -> f64 {
    start + (target - start) * progress
}
