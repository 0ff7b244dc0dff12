//! Glide Animation
//!
//! Scroll offset animation curves with the feel of a native scrollbar.
//!
//! # Features
//!
//! - **Cubic Bezier Solver**: Newton-Raphson with bisection fallback, linear
//!   extrapolation outside [0, 1]
//! - **Timing Functions**: CSS-style presets plus curves seeded with an
//!   initial velocity
//! - **Distance-Scaled Durations**: constant, delta-based and inverse-delta
//!   duration policies
//! - **Retargetable**: moving the target mid-flight keeps position and
//!   velocity continuous

pub mod bezier;
pub mod curve;
pub mod easing;
pub mod offset;

pub use bezier::{CubicBezier, BEZIER_EPSILON};
pub use curve::{segment_duration, AnimationCurve, DurationBehavior, EPSILON};
pub use easing::{EaseType, TimingFunction};
pub use offset::ScrollOffset;
