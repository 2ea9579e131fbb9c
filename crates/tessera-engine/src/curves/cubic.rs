use glam::{Vec2, Vec3};

use crate::math::ColorRgba;
use crate::scene::{Object, Triangle, Vertex, VertexExtra};

use super::picking::{ControlPoint, EditableCurve};
use super::CubicCoefficients;

/// Half the ribbon width, in pixels.
pub const RIBBON_HALF_THICKNESS: f32 = 3.0;

/// Sample count used for the arc-length estimate.
pub const ARC_LENGTH_SUBDIVISIONS: usize = 16;

/// Approximate length covered by one group of ribbon segments.
const LENGTH_PER_GROUP: f32 = 100.0;

/// Ribbon segments added per started length group.
const SEGMENTS_PER_GROUP: usize = 8;

/// Ribbon segment count for an approximate curve length:
/// `ceil(length / 100) * 8`.
#[inline]
pub fn step_count(length: f32) -> usize {
    (length / LENGTH_PER_GROUP).ceil() as usize * SEGMENTS_PER_GROUP
}

/// Partial control-point update for [`CubicBezier::resize`].
///
/// `None` fields keep their current value.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CubicResize {
    pub a: Option<Vec2>,
    pub b: Option<Vec2>,
    pub c: Option<Vec2>,
    pub d: Option<Vec2>,
}

impl CubicResize {
    /// Update touching a single control point.
    pub fn single(point: ControlPoint, to: Vec2) -> Self {
        let mut update = Self::default();
        match point {
            ControlPoint::A => update.a = Some(to),
            ControlPoint::B => update.b = Some(to),
            ControlPoint::C => update.c = Some(to),
            ControlPoint::D => update.d = Some(to),
        }
        update
    }
}

/// Cubic Bézier curve rendered as a ribbon of connected quads.
///
/// The ribbon segment count is recomputed from the approximate arc length on
/// every refresh. Vertex and triangle storage is only reallocated when that
/// count changes; otherwise vertex positions are rewritten in place.
#[derive(Debug, Clone)]
pub struct CubicBezier {
    points: [Vec2; 4],
    colour: ColorRgba,
    coeffs: CubicCoefficients,
    object: Object,
    cached_steps: usize,
}

impl CubicBezier {
    pub fn new(a: Vec2, b: Vec2, c: Vec2, d: Vec2, colour: ColorRgba) -> Self {
        let mut curve = Self {
            points: [a, b, c, d],
            colour,
            coeffs: CubicCoefficients::compute(a, b, c, d),
            object: Object::default(),
            cached_steps: 0,
        };
        curve.refresh_approximation();
        curve
    }

    #[inline]
    pub fn a(&self) -> Vec2 { self.points[0] }
    #[inline]
    pub fn b(&self) -> Vec2 { self.points[1] }
    #[inline]
    pub fn c(&self) -> Vec2 { self.points[2] }
    #[inline]
    pub fn d(&self) -> Vec2 { self.points[3] }

    #[inline]
    pub fn colour(&self) -> ColorRgba {
        self.colour
    }

    #[inline]
    pub fn coefficients(&self) -> &CubicCoefficients {
        &self.coeffs
    }

    /// Ribbon segment count of the current tessellation.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cached_steps
    }

    #[inline]
    pub fn object(&self) -> &Object {
        &self.object
    }

    /// Updates the supplied control points and re-tessellates.
    ///
    /// Points are written both to the curve and to every vertex's control-point
    /// data, since the fragment stage reads them per vertex.
    pub fn resize(&mut self, update: CubicResize) {
        let fields = [update.a, update.b, update.c, update.d];
        for (slot, value) in self.points.iter_mut().zip(fields) {
            if let Some(p) = value {
                *slot = p;
            }
        }

        let extra = self.extra();
        for v in &mut self.object.vertices {
            v.extra = extra;
        }

        self.refresh_approximation();
    }

    /// Recomputes the coefficients and rewrites the ribbon geometry.
    pub fn refresh_approximation(&mut self) {
        let [a, b, c, d] = self.points;
        self.coeffs = CubicCoefficients::compute(a, b, c, d);

        let steps = step_count(self.coeffs.approx_arc_length(ARC_LENGTH_SUBDIVISIONS));
        if steps != self.cached_steps {
            self.reallocate(steps);
        }

        let mut prev = self.coeffs.point_on_cubic(0.0);
        for quad in 0..steps {
            // The final quad ends exactly on `d` rather than on the evaluated
            // polynomial, so the ribbon closes on the control point.
            let current = if quad + 1 == steps {
                d
            } else {
                self.coeffs.point_on_cubic((quad + 1) as f32 / steps as f32)
            };

            let dir = current - prev;
            let normal = Vec2::new(-dir.y, dir.x).normalize_or_zero() * RIBBON_HALF_THICKNESS;

            let base = quad * 4;
            let verts = &mut self.object.vertices[base..base + 4];
            verts[0].position = (prev + normal).extend(0.0);
            verts[1].position = (prev - normal).extend(0.0);
            verts[2].position = (current + normal).extend(0.0);
            verts[3].position = (current - normal).extend(0.0);

            prev = current;
        }
    }

    fn reallocate(&mut self, steps: usize) {
        let template = Vertex::new(Vec3::ZERO, self.colour, Vec3::Z).with_extra(self.extra());
        self.object.vertices = vec![template; steps * 4];
        self.object.triangles = (0..steps as u32)
            .flat_map(|i| -> [Triangle; 2] {
                [[4 * i, 4 * i + 1, 4 * i + 2], [4 * i + 2, 4 * i + 3, 4 * i + 1]]
            })
            .collect();
        self.cached_steps = steps;
        log::trace!("cubic ribbon reallocated: {steps} segments");
    }

    fn extra(&self) -> VertexExtra {
        let [a, b, c, d] = self.points;
        VertexExtra::Cubic { a, b, c, d }
    }
}

impl EditableCurve for CubicBezier {
    fn control_points(&self) -> &[Vec2] {
        &self.points
    }

    fn move_control_point(&mut self, point: ControlPoint, to: Vec2) {
        if point.index() < self.points.len() {
            self.resize(CubicResize::single(point, to));
        }
    }

    fn object(&self) -> &Object {
        &self.object
    }
}
