//! Glide Scrollbar
//!
//! A rendering-independent scrollbar: thumb geometry, an interruptible
//! scroll animator, and the interactions of a classic desktop scrollbar.
//!
//! - **Geometry**: [`ScrollbarState`] maps thumb pixels to content offsets
//! - **Animation**: [`ScrollbarAnimator`] eases toward accumulated scroll
//!   requests and retargets in flight
//! - **Scheduling**: [`ScrollScheduler`] ticks many scrollers per frame
//! - **Interaction**: [`Scrollbar`] handles wheel, thumb drag, and held
//!   arrow/track presses
//!
//! # Example
//!
//! ```rust
//! use glide_scrollbar::{Scrollbar, ScrollbarConfig};
//!
//! let mut scrollbar = Scrollbar::new(ScrollbarConfig::default()).unwrap();
//! scrollbar.resize(500.0, 2000.0);
//! assert_eq!(scrollbar.frame().thumb_size, 117.0);
//!
//! scrollbar.wheel(0.0, 100.0);
//! let mut now = 0.0;
//! while scrollbar.is_animating() {
//!     now += 1.0 / 60.0;
//!     scrollbar.tick(now);
//! }
//! assert_eq!(scrollbar.frame().scroll_position, 100.0);
//! ```

pub mod animator;
pub mod clock;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod scrollbar;
pub mod state;

pub use animator::{FrameTick, ScrollbarAnimator, ScrollbarAnimatorBuilder};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ScrollbarConfig;
pub use error::{ConfigError, Result};
pub use scheduler::{ScrollScheduler, ScrollerId};
pub use scrollbar::{PressTarget, ScrollDirection, ScrollFrame, Scrollbar};
pub use state::{ScrollbarState, MIN_THUMB_SIZE};
