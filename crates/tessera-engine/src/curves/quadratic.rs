use glam::{Vec2, Vec3};

use crate::math::ColorRgba;
use crate::scene::{Object, Vertex, VertexExtra};

use super::picking::{ControlPoint, EditableCurve};

/// Distance the bounding quad extends past the control-point bounds.
pub const BOUNDS_PADDING: f32 = 50.0;

/// Partial control-point update for [`QuadraticBezier::resize`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct QuadraticResize {
    pub a: Option<Vec2>,
    pub b: Option<Vec2>,
    pub c: Option<Vec2>,
}

/// Quadratic Bézier curve drawn as one padded bounding quad.
///
/// The curve itself is resolved per fragment; the mesh only has to cover it.
/// Vertices are ordered top-left, top-right, bottom-left, bottom-right.
#[derive(Debug, Clone)]
pub struct QuadraticBezier {
    points: [Vec2; 3],
    object: Object,
}

impl QuadraticBezier {
    pub fn new(a: Vec2, b: Vec2, c: Vec2, colour: ColorRgba) -> Self {
        let template = Vertex::new(Vec3::ZERO, colour, Vec3::Z)
            .with_extra(VertexExtra::Quadratic { a, b, c });

        let mut curve = Self {
            points: [a, b, c],
            object: Object::new(vec![template; 4], vec![[0, 1, 2], [2, 3, 1]]),
        };
        curve.fit_bounds();
        curve
    }

    #[inline]
    pub fn a(&self) -> Vec2 { self.points[0] }
    #[inline]
    pub fn b(&self) -> Vec2 { self.points[1] }
    #[inline]
    pub fn c(&self) -> Vec2 { self.points[2] }

    #[inline]
    pub fn object(&self) -> &Object {
        &self.object
    }

    pub fn resize(&mut self, update: QuadraticResize) {
        let fields = [update.a, update.b, update.c];
        for (slot, value) in self.points.iter_mut().zip(fields) {
            if let Some(p) = value {
                *slot = p;
            }
        }

        let [a, b, c] = self.points;
        for v in &mut self.object.vertices {
            v.extra = VertexExtra::Quadratic { a, b, c };
        }

        self.fit_bounds();
    }

    fn fit_bounds(&mut self) {
        let min = self.points.iter().copied().fold(Vec2::INFINITY, Vec2::min) - BOUNDS_PADDING;
        let max = self.points.iter().copied().fold(Vec2::NEG_INFINITY, Vec2::max) + BOUNDS_PADDING;

        let corners = [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(min.x, max.y),
            Vec2::new(max.x, max.y),
        ];
        for (v, corner) in self.object.vertices.iter_mut().zip(corners) {
            v.position = corner.extend(0.0);
        }
    }
}

impl EditableCurve for QuadraticBezier {
    fn control_points(&self) -> &[Vec2] {
        &self.points
    }

    fn move_control_point(&mut self, point: ControlPoint, to: Vec2) {
        let update = match point {
            ControlPoint::A => QuadraticResize { a: Some(to), ..Default::default() },
            ControlPoint::B => QuadraticResize { b: Some(to), ..Default::default() },
            ControlPoint::C => QuadraticResize { c: Some(to), ..Default::default() },
            ControlPoint::D => return,
        };
        self.resize(update);
    }

    fn object(&self) -> &Object {
        &self.object
    }
}
