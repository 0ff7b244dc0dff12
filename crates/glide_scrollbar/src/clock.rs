//! Time sources for the scroll animator
//!
//! All times are monotonic seconds. The animator only ever subtracts two
//! readings, so the origin is arbitrary.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic time-in-seconds provider
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A logical clock that only moves when told to.
///
/// Clones share the same time, so a host (or a test) can keep one handle
/// and hand another to the animator.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::new(1.0);
        let handle = clock.clone();
        handle.advance(0.5);
        assert_eq!(clock.now(), 1.5);
        clock.set(3.0);
        assert_eq!(handle.now(), 3.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
