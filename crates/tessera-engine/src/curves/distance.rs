//! CPU mirror of the fragment-stage closest-point solver.
//!
//! The WGSL solver in `render/shaders/cubic_bezier_fragment.wgsl` runs the
//! same seeded Newton iteration per fragment. Keeping a host-side copy lets
//! the algorithm be exercised without a device.

use glam::Vec2;

use super::CubicCoefficients;

/// Initial parameter guesses, spread over `[0, 1]`.
pub const NEWTON_SEEDS: [f32; 7] = [0.0, 0.1, 0.3, 0.5, 0.7, 0.9, 1.0];

/// Fixed refinement steps per seed.
pub const NEWTON_ITERATIONS: usize = 7;

/// Below this second-derivative magnitude a step is skipped.
pub const MIN_SECOND_DERIVATIVE: f32 = 1e-6;

/// Result of a closest-point query.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CurveDistance {
    /// Curve parameter of the closest point found.
    pub t: f32,
    /// Squared distance from the query point to `point`.
    pub distance_sq: f32,
    /// Closest point on the curve.
    pub point: Vec2,
    /// Signed side of the query point: tangent × (query − closest).
    ///
    /// Positive on the left of the direction of travel in a y-up frame.
    pub side: f32,
}

impl CurveDistance {
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance_sq.sqrt()
    }
}

/// Squared distance `|f(t) - p|²`.
#[inline]
pub fn distance_sq(coeffs: &CubicCoefficients, t: f32, p: Vec2) -> f32 {
    coeffs.point_on_cubic(t).distance_squared(p)
}

/// `d/dt |f(t) - p|² = 2 (f - p)·f'`.
#[inline]
pub fn distance_sq_derivative(coeffs: &CubicCoefficients, t: f32, p: Vec2) -> f32 {
    2.0 * (coeffs.point_on_cubic(t) - p).dot(coeffs.derivative(t))
}

/// `d²/dt² |f(t) - p|² = 2 (f'·f' + (f - p)·f'')`.
#[inline]
pub fn distance_sq_second_derivative(coeffs: &CubicCoefficients, t: f32, p: Vec2) -> f32 {
    let d1 = coeffs.derivative(t);
    2.0 * (d1.dot(d1) + (coeffs.point_on_cubic(t) - p).dot(coeffs.second_derivative(t)))
}

/// Refines one seed toward a stationary point of the squared distance.
fn refine(coeffs: &CubicCoefficients, p: Vec2, seed: f32) -> f32 {
    let mut t = seed;
    for _ in 0..NEWTON_ITERATIONS {
        let dd = distance_sq_second_derivative(coeffs, t, p);
        if dd.abs() < MIN_SECOND_DERIVATIVE {
            continue;
        }
        t -= distance_sq_derivative(coeffs, t, p) / dd;
    }
    t
}

/// Approximate closest point on a cubic to `p`.
///
/// Both endpoints are always candidates. Refined roots that leave `[0, 1]`
/// or diverge are dropped. The minimum is heuristic: seven seeds can miss a
/// root on strongly curved segments.
pub fn closest_point_cubic(p: Vec2, coeffs: &CubicCoefficients) -> CurveDistance {
    let mut best_t = 0.0;
    let mut best_d = distance_sq(coeffs, 0.0, p);

    let end_d = distance_sq(coeffs, 1.0, p);
    if end_d < best_d {
        best_t = 1.0;
        best_d = end_d;
    }

    for seed in NEWTON_SEEDS {
        let t = refine(coeffs, p, seed);
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            continue;
        }
        let d = distance_sq(coeffs, t, p);
        if d < best_d {
            best_t = t;
            best_d = d;
        }
    }

    let point = coeffs.point_on_cubic(best_t);
    let side = coeffs.derivative(best_t).perp_dot(p - point);

    CurveDistance { t: best_t, distance_sq: best_d, point, side }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 { Vec2::new(x, y) }

    fn straight() -> CubicCoefficients {
        // Evenly spaced control points: f(t) = (300 t, 0).
        CubicCoefficients::compute(v(0.0, 0.0), v(100.0, 0.0), v(200.0, 0.0), v(300.0, 0.0))
    }

    fn arch() -> CubicCoefficients {
        CubicCoefficients::compute(v(0.0, 0.0), v(0.0, 100.0), v(100.0, 100.0), v(100.0, 0.0))
    }

    // ── derivatives ───────────────────────────────────────────────────────

    #[test]
    fn derivative_matches_finite_difference() {
        let c = arch();
        let p = v(30.0, 40.0);
        let h = 5e-3;
        for t in [0.2, 0.5, 0.8] {
            let fd = (distance_sq(&c, t + h, p) - distance_sq(&c, t - h, p)) / (2.0 * h);
            let exact = distance_sq_derivative(&c, t, p);
            let tol = 1e-2 * exact.abs().max(100.0);
            assert!((fd - exact).abs() < tol, "t={t}: {fd} vs {exact}");
        }
    }

    #[test]
    fn second_derivative_on_a_line_is_constant() {
        // f' = (300, 0), f'' = 0, so the second derivative is 2 * 300².
        let c = straight();
        for t in [0.0, 0.4, 1.0] {
            let dd = distance_sq_second_derivative(&c, t, v(17.0, -5.0));
            assert!((dd - 180_000.0).abs() < 1.0);
        }
    }

    // ── closest point ─────────────────────────────────────────────────────

    #[test]
    fn point_above_a_line_projects_onto_it() {
        let r = closest_point_cubic(v(150.0, 20.0), &straight());
        assert!((r.t - 0.5).abs() < 1e-4);
        assert!((r.distance() - 20.0).abs() < 1e-3);
        assert!(r.point.abs_diff_eq(v(150.0, 0.0), 1e-2));
    }

    #[test]
    fn points_past_the_ends_clamp_to_endpoints() {
        let c = straight();
        let before = closest_point_cubic(v(-50.0, 0.0), &c);
        assert_eq!(before.t, 0.0);
        assert!((before.distance() - 50.0).abs() < 1e-3);

        let after = closest_point_cubic(v(340.0, 30.0), &c);
        assert_eq!(after.t, 1.0);
        assert!((after.distance() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn point_on_the_curve_has_zero_distance() {
        let c = arch();
        let on = c.point_on_cubic(0.37);
        let r = closest_point_cubic(on, &c);
        assert!(r.distance() < 1e-2, "distance {}", r.distance());
    }

    #[test]
    fn apex_of_the_arch() {
        // The arch peaks at t = 0.5, (50, 75).
        let r = closest_point_cubic(v(50.0, 90.0), &arch());
        assert!((r.t - 0.5).abs() < 1e-3);
        assert!((r.distance() - 15.0).abs() < 1e-2);
    }

    #[test]
    fn side_flips_across_the_curve() {
        let c = straight();
        let left = closest_point_cubic(v(120.0, 10.0), &c);
        let right = closest_point_cubic(v(120.0, -10.0), &c);
        assert!(left.side > 0.0);
        assert!(right.side < 0.0);
    }

    #[test]
    fn degenerate_curve_reports_the_point() {
        let p = v(4.0, 4.0);
        let c = CubicCoefficients::compute(p, p, p, p);
        let r = closest_point_cubic(v(7.0, 8.0), &c);
        assert!((r.distance() - 5.0).abs() < 1e-5);
        assert_eq!(r.t, 0.0);
    }
}
