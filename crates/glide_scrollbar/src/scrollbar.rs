//! Interactive scrollbar controller
//!
//! Wires a [`ScrollbarState`] to a [`ScrollbarAnimator`] and implements the
//! classic desktop scrollbar interactions on top of them:
//!
//! - Wheel input animates by the wheel delta
//! - Dragging the thumb moves content directly, without animation
//! - Holding an arrow or the track scrolls once, then auto-repeats at double
//!   rate after a short delay until released
//!
//! The host reports pointer and geometry changes and calls
//! [`Scrollbar::tick`] every frame with the current time in seconds.

use std::cell::RefCell;
use std::rc::Rc;

use crate::animator::ScrollbarAnimator;
use crate::config::ScrollbarConfig;
use crate::error::Result;
use crate::state::ScrollbarState;

/// Shortest repeat interval honored, so a zero interval cannot spin
const MIN_REPEAT_INTERVAL: f64 = 1e-3;

/// Distance from the end within which content counts as fully scrolled
const END_TOLERANCE: f64 = 1.0;

/// Direction along the scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward the start of the content (up)
    Back,
    /// Toward the end of the content (down)
    Forward,
}

impl ScrollDirection {
    pub fn sign(&self) -> f64 {
        match self {
            ScrollDirection::Back => -1.0,
            ScrollDirection::Forward => 1.0,
        }
    }
}

/// What is being held down
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressTarget {
    Arrow(ScrollDirection),
    /// Track press at `pointer` pixels from the top of the scrollbar
    Track {
        direction: ScrollDirection,
        pointer: f64,
    },
}

#[derive(Debug, Clone, Copy)]
struct PressRepeat {
    target: PressTarget,
    step: f64,
    next_fire: f64,
}

/// Everything a renderer needs to draw the scrollbar for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub scroll_position: f64,
    pub thumb_position: f64,
    pub thumb_size: f64,
    pub animating: bool,
}

/// A single-axis scrollbar driven by host input and frame ticks
pub struct Scrollbar {
    state: Rc<RefCell<ScrollbarState>>,
    animator: ScrollbarAnimator,
    config: ScrollbarConfig,
    drag_start: Option<f64>,
    press: Option<PressRepeat>,
}

impl Scrollbar {
    /// Build a scrollbar from `config`, rejecting values `validate` refuses
    pub fn new(config: ScrollbarConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: ScrollbarConfig) -> Self {
        let mut state = ScrollbarState::with_min_thumb_size(config.min_thumb_size);
        state.set_button_size(config.button_size);
        let state = Rc::new(RefCell::new(state));

        let position = state.clone();
        let maximum = state.clone();
        let apply = state.clone();
        let animator = ScrollbarAnimator::builder()
            .duration_behavior(config.duration_behavior)
            .on_position_request(move || position.borrow().scroll_position())
            .on_maximum_request(move || maximum.borrow().max_scroll_position())
            .on_animation_frame(move |pos| apply.borrow_mut().set_scroll_position(pos))
            .build();

        Self {
            state,
            animator,
            config,
            drag_start: None,
            press: None,
        }
    }

    pub fn config(&self) -> &ScrollbarConfig {
        &self.config
    }

    /// Snapshot of the current geometry
    pub fn state(&self) -> ScrollbarState {
        self.state.borrow().clone()
    }

    pub fn frame(&self) -> ScrollFrame {
        let state = self.state.borrow();
        ScrollFrame {
            scroll_position: state.scroll_position(),
            thumb_position: state.thumb_position(),
            thumb_size: state.thumb_size(),
            animating: self.animator.is_animating(),
        }
    }

    /// Report new viewport and content sizes
    pub fn resize(&mut self, viewport_size: f64, scroll_size: f64) {
        let mut state = self.state.borrow_mut();
        state.set_viewport_size(viewport_size);
        state.set_scroll_size(scroll_size);
    }

    pub fn set_button_size(&mut self, size: f64) {
        self.state.borrow_mut().set_button_size(size);
    }

    /// Jump to `position` immediately, dropping any running animation
    pub fn scroll_to(&mut self, position: f64) {
        self.animator.cancel();
        self.state.borrow_mut().set_scroll_position(position);
    }

    /// Animated scroll by a wheel delta
    pub fn wheel(&mut self, now: f64, delta: f64) {
        self.animator.scroll_at(now, delta);
    }

    /// Start dragging the thumb from where it is now
    pub fn begin_thumb_drag(&mut self) {
        self.animator.cancel();
        self.press = None;
        let start = self.state.borrow().thumb_position();
        tracing::debug!(start, "thumb drag started");
        self.drag_start = Some(start);
    }

    /// Move the thumb to `delta` pixels from where the drag started.
    ///
    /// Returns false when no drag is in progress.
    pub fn drag_thumb(&mut self, delta: f64) -> bool {
        let Some(start) = self.drag_start else {
            return false;
        };
        self.state.borrow_mut().set_thumb_position(start + delta);
        true
    }

    pub fn end_thumb_drag(&mut self) {
        if self.drag_start.take().is_some() {
            tracing::debug!("thumb drag ended");
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Press an arrow button at time `now`
    pub fn press_arrow(&mut self, now: f64, direction: ScrollDirection) {
        let step = self.config.arrow_scroll_rate * direction.sign();
        self.start_press(now, PressTarget::Arrow(direction), step);
    }

    /// Press the track at `pointer` pixels from the top of the scrollbar.
    ///
    /// Pages toward the pointer: back if it is above the thumb, forward
    /// otherwise.
    pub fn press_track(&mut self, now: f64, pointer: f64) {
        let direction = {
            let state = self.state.borrow();
            if pointer - state.button_size() < state.thumb_position() {
                ScrollDirection::Back
            } else {
                ScrollDirection::Forward
            }
        };
        let step = self.config.track_scroll_rate * direction.sign();
        self.start_press(now, PressTarget::Track { direction, pointer }, step);
    }

    /// Track the pointer while a press is held
    pub fn move_pointer(&mut self, pointer: f64) {
        if let Some(PressRepeat {
            target: PressTarget::Track { pointer: held, .. },
            ..
        }) = self.press.as_mut()
        {
            *held = pointer;
        }
    }

    /// Release whatever is being pressed
    pub fn release(&mut self) {
        if let Some(press) = self.press.take() {
            tracing::debug!(press = ?press.target, "press released");
        }
    }

    pub fn pressed(&self) -> Option<PressTarget> {
        self.press.map(|p| p.target)
    }

    fn start_press(&mut self, now: f64, target: PressTarget, step: f64) {
        tracing::debug!(press = ?target, step, "press started");
        self.animator.scroll_at(now, step);
        self.press = Some(PressRepeat {
            target,
            step,
            next_fire: now + self.config.repeat_delay,
        });
    }

    /// Fire any press repeats due by `now`, then advance the animation.
    pub fn tick(&mut self, now: f64) -> ScrollFrame {
        self.fire_repeats(now);
        self.animator.tick_at(now);
        self.frame()
    }

    fn fire_repeats(&mut self, now: f64) {
        let interval = self.config.repeat_interval.max(MIN_REPEAT_INTERVAL);
        let multiplier = self.config.repeat_multiplier;

        while let Some(press) = self.press {
            if now < press.next_fire {
                break;
            }

            if let PressTarget::Track { direction, pointer } = press.target {
                // Stop once the thumb has reached the pointer
                if self.track_side(pointer) != Some(direction) {
                    tracing::debug!(pointer, "thumb reached pointer, press repeat stopped");
                    self.press = None;
                    break;
                }
            }

            self.animator.scroll_at(press.next_fire, press.step * multiplier);
            self.press = Some(PressRepeat {
                next_fire: press.next_fire + interval,
                ..press
            });
        }
    }

    /// Which side of the thumb the track pointer is on, `None` when over it.
    ///
    /// Uses the thumb at the animation target, since that is where repeated
    /// presses are heading.
    fn track_side(&self, pointer: f64) -> Option<ScrollDirection> {
        let state = self.state.borrow();
        let max_scroll = state.max_scroll_position();
        let scroll_target = self
            .animator
            .target()
            .unwrap_or_else(|| state.scroll_position());
        let thumb = if max_scroll > 0.0 {
            scroll_target / max_scroll * state.max_thumb_position().max(0.0)
        } else {
            0.0
        };

        let offset = pointer - state.button_size();
        if offset < thumb {
            Some(ScrollDirection::Back)
        } else if offset > thumb + state.thumb_size() {
            Some(ScrollDirection::Forward)
        } else {
            None
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Where the running animation is heading
    pub fn scroll_target(&self) -> Option<f64> {
        self.animator.target()
    }

    /// The back arrow has somewhere to go
    pub fn can_scroll_back(&self) -> bool {
        self.state.borrow().scroll_position() > 0.0
    }

    /// The forward arrow has somewhere to go
    pub fn can_scroll_forward(&self) -> bool {
        let state = self.state.borrow();
        state.max_scroll_position() - state.scroll_position() > END_TOLERANCE
    }
}

impl Default for Scrollbar {
    fn default() -> Self {
        Self::with_valid_config(ScrollbarConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn scrollbar() -> Scrollbar {
        let mut scrollbar = Scrollbar::default();
        scrollbar.resize(500.0, 2000.0);
        scrollbar
    }

    fn settle(scrollbar: &mut Scrollbar, mut now: f64) -> f64 {
        while scrollbar.is_animating() {
            now += 1.0 / 60.0;
            scrollbar.tick(now);
        }
        now
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ScrollbarConfig {
            repeat_multiplier: -2.0,
            ..Default::default()
        };
        assert!(matches!(
            Scrollbar::new(config),
            Err(ConfigError::Invalid {
                field: "repeat_multiplier",
                ..
            })
        ));

        let config = ScrollbarConfig {
            button_size: f64::NAN,
            ..Default::default()
        };
        assert!(Scrollbar::new(config).is_err());

        let scrollbar = Scrollbar::new(ScrollbarConfig::default()).unwrap();
        assert_eq!(scrollbar.config(), &ScrollbarConfig::default());
    }

    #[test]
    fn test_resize_sets_thumb() {
        let scrollbar = scrollbar();
        let frame = scrollbar.frame();
        assert_eq!(frame.thumb_size, 117.0);
        assert_eq!(frame.thumb_position, 0.0);
        assert!(!frame.animating);
    }

    #[test]
    fn test_wheel_animates_state() {
        let mut scrollbar = scrollbar();
        scrollbar.wheel(0.0, 120.0);
        let mid = scrollbar.tick(0.05);
        assert!(mid.animating);
        assert!(mid.scroll_position > 0.0 && mid.scroll_position < 120.0);

        settle(&mut scrollbar, 0.05);
        assert_eq!(scrollbar.frame().scroll_position, 120.0);
    }

    #[test]
    fn test_wheel_stops_at_end() {
        let mut scrollbar = scrollbar();
        scrollbar.scroll_to(1450.0);
        scrollbar.wheel(0.0, 200.0);
        settle(&mut scrollbar, 0.0);
        assert_eq!(scrollbar.frame().scroll_position, 1500.0);
        assert_eq!(scrollbar.frame().thumb_position, 349.0);
        assert!(!scrollbar.can_scroll_forward());
        assert!(scrollbar.can_scroll_back());
    }

    #[test]
    fn test_thumb_drag() {
        let mut scrollbar = scrollbar();
        assert!(!scrollbar.drag_thumb(10.0));

        scrollbar.begin_thumb_drag();
        assert!(scrollbar.is_dragging());
        assert!(scrollbar.drag_thumb(349.0 / 2.0));
        assert!((scrollbar.frame().scroll_position - 750.0).abs() < 1e-9);

        assert!(scrollbar.drag_thumb(10_000.0));
        assert_eq!(scrollbar.frame().scroll_position, 1500.0);

        scrollbar.end_thumb_drag();
        assert!(!scrollbar.is_dragging());
    }

    #[test]
    fn test_drag_cancels_animation() {
        let mut scrollbar = scrollbar();
        scrollbar.wheel(0.0, 300.0);
        scrollbar.tick(0.05);
        scrollbar.begin_thumb_drag();
        assert!(!scrollbar.is_animating());
    }

    #[test]
    fn test_track_press_direction() {
        let mut scrollbar = scrollbar();
        scrollbar.scroll_to(750.0);
        let thumb = scrollbar.frame().thumb_position;

        scrollbar.press_track(0.0, 17.0 + thumb - 10.0);
        assert_eq!(
            scrollbar.pressed(),
            Some(PressTarget::Track {
                direction: ScrollDirection::Back,
                pointer: 17.0 + thumb - 10.0,
            })
        );
        scrollbar.release();
        assert_eq!(scrollbar.pressed(), None);
    }

    #[test]
    fn test_arrow_availability() {
        let mut scrollbar = scrollbar();
        assert!(!scrollbar.can_scroll_back());
        assert!(scrollbar.can_scroll_forward());
        scrollbar.scroll_to(1499.5);
        assert!(!scrollbar.can_scroll_forward());
    }
}
