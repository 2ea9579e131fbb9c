use glam::Vec2;

/// Power-basis coefficients of a cubic Bézier curve.
///
/// Layout is `[x3, x2, x1, x0, y3, y2, y1, y0]` so that
/// `x(t) = x3·t³ + x2·t² + x1·t + x0` (same for `y`). This is the exact array
/// the fragment shader rebuilds from the per-vertex control points.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CubicCoefficients(pub [f32; 8]);

impl CubicCoefficients {
    /// Derives the coefficients from the four control points.
    pub fn compute(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Self {
        Self([
            d.x - 3.0 * c.x + 3.0 * b.x - a.x,
            3.0 * c.x - 6.0 * b.x + 3.0 * a.x,
            3.0 * b.x - 3.0 * a.x,
            a.x,
            d.y - 3.0 * c.y + 3.0 * b.y - a.y,
            3.0 * c.y - 6.0 * b.y + 3.0 * a.y,
            3.0 * b.y - 3.0 * a.y,
            a.y,
        ])
    }

    /// Point on the curve at parameter `t`.
    #[inline]
    pub fn point_on_cubic(&self, t: f32) -> Vec2 {
        let c = &self.0;
        let t2 = t * t;
        let t3 = t2 * t;
        Vec2::new(
            c[0] * t3 + c[1] * t2 + c[2] * t + c[3],
            c[4] * t3 + c[5] * t2 + c[6] * t + c[7],
        )
    }

    /// First derivative (tangent) at `t`.
    #[inline]
    pub fn derivative(&self, t: f32) -> Vec2 {
        let c = &self.0;
        let t2 = t * t;
        Vec2::new(
            3.0 * c[0] * t2 + 2.0 * c[1] * t + c[2],
            3.0 * c[4] * t2 + 2.0 * c[5] * t + c[6],
        )
    }

    /// Second derivative at `t`.
    #[inline]
    pub fn second_derivative(&self, t: f32) -> Vec2 {
        let c = &self.0;
        Vec2::new(6.0 * c[0] * t + 2.0 * c[1], 6.0 * c[4] * t + 2.0 * c[5])
    }

    /// Approximate curve length used to pick the tessellation density.
    ///
    /// Samples `t = i / subdivisions` for `i in 0..subdivisions` (the endpoint
    /// `t = 1` is not sampled), accumulates the *squared* lengths of the
    /// segments between consecutive samples and returns the square root of
    /// that sum. This is not the polyline length; the tessellation density
    /// formula is tuned against this value.
    pub fn approx_arc_length(&self, subdivisions: usize) -> f32 {
        if subdivisions < 2 {
            return 0.0;
        }

        let step = 1.0 / subdivisions as f32;
        let mut prev = self.point_on_cubic(0.0);
        let mut sum = 0.0;

        for i in 1..subdivisions {
            let p = self.point_on_cubic(i as f32 * step);
            sum += (p - prev).length_squared();
            prev = p;
        }

        sum.sqrt()
    }
}
