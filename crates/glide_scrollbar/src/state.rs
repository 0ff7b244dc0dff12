//! Scrollbar geometry model
//!
//! Maps between the thumb's pixel position inside the track and the content
//! scroll offset. Everything is synchronous; the model is recomputed whenever
//! the host reports new geometry.
//!
//! ```text
//! ┌─┐  button_size
//! ├─┤ ─┐
//! │ │  │
//! │█│  │ track_size = viewport_size - 2 * button_size
//! │█│  │   thumb travels 0..=max_thumb_position
//! │ │  │
//! ├─┤ ─┘
//! └─┘  button_size
//! ```

/// Smallest thumb the model will produce, in pixels
pub const MIN_THUMB_SIZE: f64 = 17.0;

/// Thumb and scroll positions for a single-axis scrollbar
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollbarState {
    thumb_position: f64,
    thumb_size: f64,
    scroll_position: f64,
    scroll_size: f64,
    viewport_size: f64,
    min_thumb_size: f64,
    button_size: f64,
}

impl Default for ScrollbarState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollbarState {
    pub fn new() -> Self {
        Self::with_min_thumb_size(MIN_THUMB_SIZE)
    }

    pub fn with_min_thumb_size(min_thumb_size: f64) -> Self {
        Self {
            thumb_position: 0.0,
            thumb_size: min_thumb_size,
            scroll_position: 0.0,
            scroll_size: 0.0,
            viewport_size: 0.0,
            min_thumb_size,
            button_size: 0.0,
        }
    }

    pub fn set_viewport_size(&mut self, size: f64) {
        self.viewport_size = size;
        self.geometry_changed();
    }

    pub fn set_button_size(&mut self, size: f64) {
        self.button_size = size;
        self.geometry_changed();
    }

    pub fn set_scroll_size(&mut self, size: f64) {
        self.scroll_size = size;
        self.geometry_changed();
    }

    /// Move the thumb, clamped to the track, and derive the scroll position
    pub fn set_thumb_position(&mut self, position: f64) {
        let max_thumb = self.max_thumb_position();
        self.thumb_position = position.min(max_thumb).max(0.0);
        self.scroll_position = if max_thumb > 0.0 {
            self.thumb_position / max_thumb * self.max_scroll_position().max(0.0)
        } else {
            0.0
        };
    }

    /// Move the content, clamped to the scrollable extent, and derive the
    /// thumb position
    pub fn set_scroll_position(&mut self, position: f64) {
        let max_scroll = self.max_scroll_position();
        self.scroll_position = position.min(max_scroll).max(0.0);
        self.thumb_position = if max_scroll > 0.0 {
            self.scroll_position / max_scroll * self.max_thumb_position().max(0.0)
        } else {
            0.0
        };
    }

    pub fn thumb_position(&self) -> f64 {
        self.thumb_position
    }

    pub fn thumb_size(&self) -> f64 {
        self.thumb_size
    }

    pub fn scroll_position(&self) -> f64 {
        self.scroll_position
    }

    pub fn scroll_size(&self) -> f64 {
        self.scroll_size
    }

    pub fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    pub fn button_size(&self) -> f64 {
        self.button_size
    }

    pub fn min_thumb_size(&self) -> f64 {
        self.min_thumb_size
    }

    /// Viewport minus both end buttons
    pub fn track_size(&self) -> f64 {
        self.viewport_size - self.button_size * 2.0
    }

    pub fn max_thumb_position(&self) -> f64 {
        self.track_size() - self.thumb_size
    }

    /// Largest valid scroll offset. Negative when the content fits.
    pub fn max_scroll_position(&self) -> f64 {
        self.scroll_size - self.viewport_size
    }

    fn geometry_changed(&mut self) {
        self.thumb_size = self.calculate_thumb_size();
        // Content or track may have shrunk under the current offset
        self.set_scroll_position(self.scroll_position);
    }

    /// Thumb covers the visible share of the track, never below the minimum
    fn calculate_thumb_size(&self) -> f64 {
        if self.scroll_size <= 0.0 {
            tracing::trace!("no scroll size, using minimum thumb");
            return self.min_thumb_size;
        }
        let proportional = (self.viewport_size / self.scroll_size * self.track_size()).round();
        self.min_thumb_size.max(proportional)
    }
}
