//! Cubic bezier solver
//!
//! Evaluates and inverts a unit cubic bezier whose end points are fixed at
//! (0, 0) and (1, 1). Inputs outside [0, 1] are extrapolated linearly along
//! the end-point tangents.

/// Default precision for solving `x -> t`
pub const BEZIER_EPSILON: f64 = 1e-7;

/// Newton-Raphson iterations tried before falling back to bisection
const NEWTON_ITERATIONS: usize = 8;

/// Derivative magnitude below which Newton-Raphson is abandoned
const NEWTON_MIN_SLOPE: f64 = 1e-6;

/// Upper bound on bisection steps. Halving [0, 1] this many times runs out of
/// f64 precision well before the bound is reached.
const BISECTION_ITERATIONS: usize = 64;

/// A unit cubic bezier in polynomial form
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
    start_gradient: f64,
    end_gradient: f64,
    range_min: f64,
    range_max: f64,
}

impl CubicBezier {
    /// Build a curve from its two interior control points
    pub fn new(p1x: f64, p1y: f64, p2x: f64, p2y: f64) -> Self {
        let cx = 3.0 * p1x;
        let bx = 3.0 * (p2x - p1x) - cx;
        let ax = 1.0 - cx - bx;

        let cy = 3.0 * p1y;
        let by = 3.0 * (p2y - p1y) - cy;
        let ay = 1.0 - cy - by;

        let mut bezier = Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
            start_gradient: 0.0,
            end_gradient: 0.0,
            range_min: 0.0,
            range_max: 1.0,
        };
        bezier.init_gradients(p1x, p1y, p2x, p2y);
        bezier.init_range(p1y, p2y);
        bezier
    }

    /// End-point gradients used for extrapolation outside [0, 1].
    ///
    /// The tangent at an end point runs toward the nearest control point that
    /// is horizontally distinct from it. A control point that is horizontally
    /// coincident but vertically distinct would give an infinite slope, so
    /// that case falls back to a flat gradient.
    fn init_gradients(&mut self, p1x: f64, p1y: f64, p2x: f64, p2y: f64) {
        self.start_gradient = if p1x > 0.0 {
            p1y / p1x
        } else if p1y == 0.0 && p2x > 0.0 {
            p2y / p2x
        } else {
            0.0
        };

        self.end_gradient = if p2x < 1.0 {
            (p2y - 1.0) / (p2x - 1.0)
        } else if p2x == 1.0 && p1x < 1.0 {
            (p1y - 1.0) / (p1x - 1.0)
        } else {
            0.0
        };
    }

    /// Widen the output range to cover any local extrema inside (0, 1)
    fn init_range(&mut self, p1y: f64, p2y: f64) {
        self.range_min = 0.0;
        self.range_max = 1.0;
        if (0.0..1.0).contains(&p1y) && (0.0..=1.0).contains(&p2y) {
            return;
        }

        // dy/dt scaled by 1/3, written as a*t^2 + b*t + c
        let a = 3.0 * self.ay;
        let b = 2.0 * self.by;
        let c = self.cy;

        if a.abs() < BEZIER_EPSILON && b.abs() < BEZIER_EPSILON {
            return;
        }

        let (t1, t2) = if a.abs() < BEZIER_EPSILON {
            (-c / b, 0.0)
        } else {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant < 0.0 {
                return;
            }
            let root = discriminant.sqrt();
            ((-b + root) / (2.0 * a), (-b - root) / (2.0 * a))
        };

        let mut sol1 = 0.0;
        let mut sol2 = 0.0;
        if 0.0 < t1 && t1 < 1.0 {
            sol1 = self.sample_curve_y(t1);
        }
        if 0.0 < t2 && t2 < 1.0 {
            sol2 = self.sample_curve_y(t2);
        }

        self.range_min = self.range_min.min(sol1).min(sol2);
        self.range_max = self.range_max.max(sol1).max(sol2);
    }

    #[inline]
    pub fn sample_curve_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    #[inline]
    pub fn sample_curve_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    #[inline]
    pub fn sample_curve_derivative_x(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    #[inline]
    pub fn sample_curve_derivative_y(&self, t: f64) -> f64 {
        (3.0 * self.ay * t + 2.0 * self.by) * t + self.cy
    }

    /// Find the curve parameter `t` whose x-coordinate is `x`.
    ///
    /// Tries Newton-Raphson first, then bisects [0, 1] if the derivative is
    /// too flat or the iterations did not converge within `epsilon`.
    pub fn solve_curve_x(&self, x: f64, epsilon: f64) -> f64 {
        let mut t2 = x;
        for _ in 0..NEWTON_ITERATIONS {
            let x2 = self.sample_curve_x(t2) - x;
            if x2.abs() < epsilon {
                return t2;
            }
            let d2 = self.sample_curve_derivative_x(t2);
            if d2.abs() < NEWTON_MIN_SLOPE {
                break;
            }
            t2 -= x2 / d2;
            // The polynomial can hit x again outside [0, 1]
            if !(0.0..=1.0).contains(&t2) {
                break;
            }
        }

        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t2 = x;
        for _ in 0..BISECTION_ITERATIONS {
            if t0 >= t1 {
                break;
            }
            let x2 = self.sample_curve_x(t2);
            if (x2 - x).abs() < epsilon {
                return t2;
            }
            if x > x2 {
                t0 = t2;
            } else {
                t1 = t2;
            }
            t2 = (t1 - t0) * 0.5 + t0;
        }

        t2
    }

    /// Eased output for `x` using the default precision
    pub fn solve(&self, x: f64) -> f64 {
        self.solve_with_epsilon(x, BEZIER_EPSILON)
    }

    pub fn solve_with_epsilon(&self, x: f64, epsilon: f64) -> f64 {
        if x < 0.0 {
            return self.start_gradient * x;
        }
        if x > 1.0 {
            return 1.0 + self.end_gradient * (x - 1.0);
        }
        self.sample_curve_y(self.solve_curve_x(x, epsilon))
    }

    /// dy/dx at `x`, with `x` clamped to [0, 1]
    pub fn slope(&self, x: f64) -> f64 {
        self.slope_with_epsilon(x, BEZIER_EPSILON)
    }

    /// dy/dx at `x`. Where x'(t) vanishes at an end point the end-point
    /// gradient is returned instead.
    pub fn slope_with_epsilon(&self, x: f64, epsilon: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        let t = self.solve_curve_x(x, epsilon);
        let dx = self.sample_curve_derivative_x(t);
        let dy = self.sample_curve_derivative_y(t);
        if dx.abs() < NEWTON_MIN_SLOPE {
            return if t < 0.5 {
                self.start_gradient
            } else {
                self.end_gradient
            };
        }
        dy / dx
    }

    pub fn x1(&self) -> f64 {
        self.cx / 3.0
    }

    pub fn y1(&self) -> f64 {
        self.cy / 3.0
    }

    pub fn x2(&self) -> f64 {
        (self.bx + self.cx) / 3.0 + self.x1()
    }

    pub fn y2(&self) -> f64 {
        (self.by + self.cy) / 3.0 + self.y1()
    }

    pub fn start_gradient(&self) -> f64 {
        self.start_gradient
    }

    pub fn end_gradient(&self) -> f64 {
        self.end_gradient
    }

    /// Smallest y the curve reaches on [0, 1]
    pub fn range_min(&self) -> f64 {
        self.range_min
    }

    /// Largest y the curve reaches on [0, 1]
    pub fn range_max(&self) -> f64 {
        self.range_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASE_CURVES: [(f64, f64, f64, f64); 5] = [
        (0.25, 0.1, 0.25, 1.0),
        (0.42, 0.0, 1.0, 1.0),
        (0.0, 0.0, 0.58, 1.0),
        (0.42, 0.0, 0.58, 1.0),
        (0.1, 0.9, 0.2, 0.3),
    ];

    #[test]
    fn test_end_points_are_fixed() {
        for (x1, y1, x2, y2) in EASE_CURVES {
            let bezier = CubicBezier::new(x1, y1, x2, y2);
            assert!(bezier.solve(0.0).abs() < 1e-6);
            assert!((bezier.solve(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_solve_curve_x_inverts_sample() {
        for (x1, y1, x2, y2) in EASE_CURVES {
            let bezier = CubicBezier::new(x1, y1, x2, y2);
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let x = bezier.sample_curve_x(t);
                let solved = bezier.solve_curve_x(x, BEZIER_EPSILON);
                assert!(
                    (bezier.sample_curve_x(solved) - x).abs() < 1e-6,
                    "curve ({x1}, {y1}, {x2}, {y2}) at t = {t}"
                );
                assert!((solved - t).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_solve_near_flat_derivative() {
        // x'(0) == 0 and x'(1) == 0 for this curve
        let bezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        let t = bezier.solve_curve_x(0.001, BEZIER_EPSILON);
        assert!((bezier.sample_curve_x(t) - 0.001).abs() < BEZIER_EPSILON);
    }

    #[test]
    fn test_control_point_getters() {
        let bezier = CubicBezier::new(0.42, 0.1, 0.58, 0.9);
        assert!((bezier.x1() - 0.42).abs() < 1e-12);
        assert!((bezier.y1() - 0.1).abs() < 1e-12);
        assert!((bezier.x2() - 0.58).abs() < 1e-12);
        assert!((bezier.y2() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_extrapolation_uses_end_gradients() {
        let bezier = CubicBezier::new(0.25, 0.5, 0.75, 0.5);
        assert_eq!(bezier.start_gradient(), 2.0);
        assert_eq!(bezier.end_gradient(), 2.0);
        assert_eq!(bezier.solve(-0.5), -1.0);
        assert_eq!(bezier.solve(1.5), 2.0);
    }

    #[test]
    fn test_coincident_control_points_give_flat_gradient() {
        // p1 sits on (0, 0) so the start tangent runs toward p2
        let bezier = CubicBezier::new(0.0, 0.0, 0.5, 1.0);
        assert_eq!(bezier.start_gradient(), 2.0);

        // p1 is vertically distinct but horizontally coincident with (0, 0)
        let bezier = CubicBezier::new(0.0, 0.5, 1.0, 1.0);
        assert_eq!(bezier.start_gradient(), 0.0);
        // p2 sits at x == 1, so the end tangent runs toward p1
        assert_eq!(bezier.end_gradient(), 0.5);
    }

    #[test]
    fn test_range_for_standard_curve_is_unit() {
        let bezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
        assert_eq!(bezier.range_min(), 0.0);
        assert_eq!(bezier.range_max(), 1.0);
    }

    #[test]
    fn test_range_widens_for_overshoot() {
        let bezier = CubicBezier::new(0.42, 1.6, 0.58, 1.0);
        assert!(bezier.range_max() > 1.0);
        assert_eq!(bezier.range_min(), 0.0);

        let mut peak: f64 = 0.0;
        for i in 0..=1000 {
            peak = peak.max(bezier.sample_curve_y(i as f64 / 1000.0));
        }
        assert!((bezier.range_max() - peak).abs() < 1e-3);
    }

    #[test]
    fn test_range_widens_for_undershoot() {
        let bezier = CubicBezier::new(0.3, -0.8, 0.7, 1.0);
        assert!(bezier.range_min() < 0.0);
        assert_eq!(bezier.range_max(), 1.0);
    }

    #[test]
    fn test_slope_at_vertical_end_tangent_is_finite() {
        // x'(0) == 0 with p1 on the origin
        let ease_out = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
        assert!((ease_out.slope(0.0) - 1.0 / 0.58).abs() < 1e-9);
        assert!(ease_out.slope(1.0).abs() < 1e-9);

        // x'(0) == 0 and x'(1) == 0
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(linear.slope(0.0), 1.0);
        assert_eq!(linear.slope(1.0), 1.0);
        assert!((linear.slope(0.5) - 1.0).abs() < 1e-9);

        // x'(1) == 0 with p2 on (1, 1)
        let ease_in = CubicBezier::new(0.42, 0.0, 1.0, 1.0);
        assert!(ease_in.slope(0.0).abs() < 1e-9);
        assert!((ease_in.slope(1.0) - 1.0 / 0.58).abs() < 1e-9);
    }

    #[test]
    fn test_slope_clamps_input() {
        let bezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
        assert_eq!(bezier.slope(-3.0), bezier.slope(0.0));
        assert_eq!(bezier.slope(7.0), bezier.slope(1.0));
        // Symmetric ease-in-out peaks at the midpoint
        assert!(bezier.slope(0.5) > bezier.slope(0.25));
        assert!(bezier.slope(0.5) > bezier.slope(0.75));
    }
}
