use glam::{Vec2, Vec3};

use crate::math::ColorRgba;

/// Per-vertex auxiliary data carried to the GPU next to the fixed streams.
///
/// Curve objects ship their control points on every vertex so the fragment
/// stage can evaluate the curve analytically; all other objects carry `None`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum VertexExtra {
    #[default]
    None,
    Quadratic { a: Vec2, b: Vec2, c: Vec2 },
    Cubic { a: Vec2, b: Vec2, c: Vec2, d: Vec2 },
}

impl VertexExtra {
    /// Control points in `a, b, c, d` order, zero-filled past the curve degree.
    #[inline]
    pub fn control_points(&self) -> [Vec2; 4] {
        match *self {
            VertexExtra::None => [Vec2::ZERO; 4],
            VertexExtra::Quadratic { a, b, c } => [a, b, c, Vec2::ZERO],
            VertexExtra::Cubic { a, b, c, d } => [a, b, c, d],
        }
    }
}

/// A single mesh vertex.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub colour: ColorRgba,
    pub normal: Vec3,
    pub extra: VertexExtra,
}

impl Vertex {
    #[inline]
    pub const fn new(position: Vec3, colour: ColorRgba, normal: Vec3) -> Self {
        Self { position, colour, normal, extra: VertexExtra::None }
    }

    #[inline]
    pub fn with_extra(mut self, extra: VertexExtra) -> Self {
        self.extra = extra;
        self
    }
}
