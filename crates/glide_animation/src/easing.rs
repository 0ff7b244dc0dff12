//! Timing functions for scroll animations

use crate::bezier::CubicBezier;

/// Largest initial velocity a retargeted timing function will honor
const MAX_INITIAL_VELOCITY: f64 = 1000.0;

/// Named cubic bezier easing presets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EaseType {
    Ease,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    /// Control points supplied by the caller
    Custom,
}

impl EaseType {
    /// Control points `(x1, y1, x2, y2)` of a preset, `None` for `Custom`
    pub fn control_points(&self) -> Option<(f64, f64, f64, f64)> {
        match self {
            EaseType::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            EaseType::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            EaseType::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            EaseType::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            EaseType::Custom => None,
        }
    }
}

/// A cubic bezier timing function mapping normalized time to progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingFunction {
    ease_type: EaseType,
    bezier: CubicBezier,
}

impl TimingFunction {
    /// Build one of the named presets. `Custom` falls back to the straight
    /// line through (0, 0) and (1, 1).
    pub fn preset(ease_type: EaseType) -> Self {
        let (x1, y1, x2, y2) = ease_type
            .control_points()
            .unwrap_or((0.0, 0.0, 1.0, 1.0));
        Self {
            ease_type,
            bezier: CubicBezier::new(x1, y1, x2, y2),
        }
    }

    pub fn ease_in_out() -> Self {
        Self::preset(EaseType::EaseInOut)
    }

    /// Build a curve from arbitrary control points
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            ease_type: EaseType::Custom,
            bezier: CubicBezier::new(x1, y1, x2, y2),
        }
    }

    /// An ease-in-out shaped curve that leaves t = 0 with slope `velocity`.
    ///
    /// Used when a running animation is retargeted so the new segment starts
    /// at the speed the old one had. `velocity` is clamped to +/-1000 and a
    /// non-finite velocity is treated as 0.
    pub fn with_initial_velocity(velocity: f64) -> Self {
        let velocity = if velocity.is_finite() {
            velocity.clamp(-MAX_INITIAL_VELOCITY, MAX_INITIAL_VELOCITY)
        } else {
            0.0
        };
        let x1 = 0.42;
        let y1 = velocity * x1;
        Self {
            ease_type: EaseType::Custom,
            bezier: CubicBezier::new(x1, y1, 0.58, 1.0),
        }
    }

    pub fn ease_type(&self) -> EaseType {
        self.ease_type
    }

    pub fn bezier(&self) -> &CubicBezier {
        &self.bezier
    }

    /// Eased progress at normalized time `x`
    pub fn value(&self, x: f64) -> f64 {
        self.bezier.solve(x)
    }

    /// d(progress)/d(time) at normalized time `x`
    pub fn velocity(&self, x: f64) -> f64 {
        self.bezier.slope(x)
    }
}

impl Default for TimingFunction {
    fn default() -> Self {
        Self::ease_in_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_carry_their_type() {
        for ease_type in [
            EaseType::Ease,
            EaseType::EaseIn,
            EaseType::EaseOut,
            EaseType::EaseInOut,
        ] {
            let timing = TimingFunction::preset(ease_type);
            assert_eq!(timing.ease_type(), ease_type);
            assert!(timing.value(0.0).abs() < 1e-6);
            assert!((timing.value(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let timing = TimingFunction::ease_in_out();
        assert!((timing.value(0.5) - 0.5).abs() < 1e-6);
        let a = timing.value(0.2);
        let b = timing.value(0.8);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_initial_velocity_sets_start_slope() {
        let timing = TimingFunction::with_initial_velocity(2.0);
        assert_eq!(timing.ease_type(), EaseType::Custom);
        assert!((timing.velocity(0.0) - 2.0).abs() < 1e-6);
        assert!((timing.bezier().y1() - 0.84).abs() < 1e-12);
    }

    #[test]
    fn test_initial_velocity_is_clamped() {
        let timing = TimingFunction::with_initial_velocity(1e9);
        assert!((timing.bezier().y1() - 420.0).abs() < 1e-9);

        let timing = TimingFunction::with_initial_velocity(-1e9);
        assert!((timing.bezier().y1() + 420.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_initial_velocity_starts_at_rest() {
        for velocity in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let timing = TimingFunction::with_initial_velocity(velocity);
            assert_eq!(timing.bezier().y1(), 0.0);
            assert!((timing.value(0.5) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_endpoint_velocities_are_finite() {
        let ease_out = TimingFunction::preset(EaseType::EaseOut);
        assert!((ease_out.velocity(0.0) - 1.0 / 0.58).abs() < 1e-9);
        assert!(ease_out.velocity(1.0).abs() < 1e-9);

        let linear = TimingFunction::preset(EaseType::Custom);
        assert_eq!(linear.velocity(0.0), 1.0);
        assert!((linear.velocity(0.5) - 1.0).abs() < 1e-9);
        assert_eq!(linear.velocity(1.0), 1.0);
    }

    #[test]
    fn test_zero_initial_velocity_matches_ease_in_out() {
        let retargeted = TimingFunction::with_initial_velocity(0.0);
        let preset = TimingFunction::ease_in_out();
        for i in 0..=10 {
            let x = i as f64 / 10.0;
            assert!((retargeted.value(x) - preset.value(x)).abs() < 1e-9);
        }
    }
}
