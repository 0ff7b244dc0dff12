//! Scroll scheduler
//!
//! Holds the animators of every scrollable region in a window and ticks the
//! active ones from a single frame callback.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::animator::{FrameTick, ScrollbarAnimator};

new_key_type! {
    pub struct ScrollerId;
}

/// Frames produced by one scheduler tick
pub type SchedulerFrames = SmallVec<[(ScrollerId, FrameTick); 4]>;

/// Ticks a set of scroll animators together
pub struct ScrollScheduler {
    animators: SlotMap<ScrollerId, ScrollbarAnimator>,
}

impl ScrollScheduler {
    pub fn new() -> Self {
        Self {
            animators: SlotMap::with_key(),
        }
    }

    pub fn add(&mut self, animator: ScrollbarAnimator) -> ScrollerId {
        self.animators.insert(animator)
    }

    pub fn get(&self, id: ScrollerId) -> Option<&ScrollbarAnimator> {
        self.animators.get(id)
    }

    pub fn get_mut(&mut self, id: ScrollerId) -> Option<&mut ScrollbarAnimator> {
        self.animators.get_mut(id)
    }

    pub fn remove(&mut self, id: ScrollerId) -> Option<ScrollbarAnimator> {
        self.animators.remove(id)
    }

    /// Forward a scroll request to one animator at time `now`.
    ///
    /// Returns false if the id is unknown.
    pub fn scroll_at(&mut self, id: ScrollerId, now: f64, delta: f64) -> bool {
        match self.animators.get_mut(id) {
            Some(animator) => {
                animator.scroll_at(now, delta);
                true
            }
            None => false,
        }
    }

    /// Tick every animating scroller at `now`
    pub fn tick_at(&mut self, now: f64) -> SchedulerFrames {
        self.animators
            .iter_mut()
            .filter_map(|(id, animator)| animator.tick_at(now).map(|tick| (id, tick)))
            .collect()
    }

    /// Check if any scroller still needs frames
    pub fn has_active_animations(&self) -> bool {
        self.animators.iter().any(|(_, a)| a.is_animating())
    }

    pub fn len(&self) -> usize {
        self.animators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }
}

impl Default for ScrollScheduler {
    fn default() -> Self {
        Self::new()
    }
}
