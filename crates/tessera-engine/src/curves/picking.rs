use glam::Vec2;

use crate::scene::Object;

/// Pointer radius, in pixels, within which a control point can be grabbed.
pub const EDIT_DISTANCE_THRESHOLD: f32 = 100.0;

/// Named control point of a Bézier curve.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ControlPoint {
    A,
    B,
    C,
    D,
}

impl ControlPoint {
    pub const ALL: [ControlPoint; 4] = [Self::A, Self::B, Self::C, Self::D];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// A curve whose control points can be dragged interactively.
pub trait EditableCurve {
    /// Control points in `a, b, c, d` order.
    fn control_points(&self) -> &[Vec2];

    /// Moves one control point and re-tessellates. Points the curve does not
    /// have are ignored.
    fn move_control_point(&mut self, point: ControlPoint, to: Vec2);

    /// The mesh this curve renders with.
    fn object(&self) -> &Object;
}

/// Nearest control point strictly within `threshold` of `pointer`.
///
/// Equal distances resolve to the earlier point in `a, b, c, d` order.
pub fn pick_control_point(points: &[Vec2], pointer: Vec2, threshold: f32) -> Option<ControlPoint> {
    let limit = threshold * threshold;

    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.iter().enumerate() {
        let d = p.distance_squared(pointer);
        if d >= limit {
            continue;
        }
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }

    best.and_then(|(i, _)| ControlPoint::from_index(i))
}

/// First curve (in list order) with a control point under the pointer.
pub fn pick_curve<C: EditableCurve>(curves: &[C], pointer: Vec2, threshold: f32) -> Option<(usize, ControlPoint)> {
    curves.iter().enumerate().find_map(|(i, curve)| {
        pick_control_point(curve.control_points(), pointer, threshold).map(|cp| (i, cp))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CubicBezier;
    use crate::math::ColorRgba;

    fn v(x: f32, y: f32) -> Vec2 { Vec2::new(x, y) }

    // ── single curve ──────────────────────────────────────────────────────

    #[test]
    fn picks_the_nearest_point() {
        let points = [v(0.0, 0.0), v(10.0, 10.0), v(500.0, 500.0), v(900.0, 0.0)];
        assert_eq!(pick_control_point(&points, v(10.0, 10.0), EDIT_DISTANCE_THRESHOLD), Some(ControlPoint::B));
        assert_eq!(pick_control_point(&points, v(1.0, 1.0), EDIT_DISTANCE_THRESHOLD), Some(ControlPoint::A));
    }

    #[test]
    fn threshold_is_exclusive() {
        let points = [v(0.0, 0.0)];
        assert_eq!(pick_control_point(&points, v(100.0, 0.0), 100.0), None);
        assert_eq!(pick_control_point(&points, v(99.0, 0.0), 100.0), Some(ControlPoint::A));
    }

    #[test]
    fn ties_go_to_the_earlier_point() {
        let points = [v(-10.0, 0.0), v(10.0, 0.0), v(0.0, 10.0)];
        assert_eq!(pick_control_point(&points, Vec2::ZERO, 50.0), Some(ControlPoint::A));
    }

    #[test]
    fn control_point_index_round_trip() {
        for cp in ControlPoint::ALL {
            assert_eq!(ControlPoint::from_index(cp.index()), Some(cp));
        }
        assert_eq!(ControlPoint::from_index(4), None);
    }

    // ── curve lists ───────────────────────────────────────────────────────

    #[test]
    fn first_matching_curve_wins() {
        let white = ColorRgba::white();
        let curves = [
            CubicBezier::new(v(1000.0, 1000.0), v(1100.0, 1000.0), v(1200.0, 1000.0), v(1300.0, 1000.0), white),
            CubicBezier::new(v(0.0, 0.0), v(90.0, 0.0), v(300.0, 0.0), v(400.0, 0.0), white),
            CubicBezier::new(v(5.0, 0.0), v(200.0, 0.0), v(300.0, 0.0), v(400.0, 0.0), white),
        ];
        assert_eq!(pick_curve(&curves, v(4.0, 0.0), EDIT_DISTANCE_THRESHOLD), Some((1, ControlPoint::A)));
        assert_eq!(pick_curve(&curves, v(5000.0, 0.0), EDIT_DISTANCE_THRESHOLD), None);
    }
}
