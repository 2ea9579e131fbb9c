use crate::render::buffer::GpuBuffer;
use crate::render::RenderCtx;
use crate::scene::Object;

/// One extra vertex input an extension feeds, in its own vertex buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExtraAttribute {
    /// WGSL name of the vertex input, checked against the vertex module.
    pub name: &'static str,
    pub location: u32,
    pub format: wgpu::VertexFormat,
}

/// Extra per-vertex streams registered with the batch renderer.
///
/// Attributes are bound one buffer each, in slice order, after the four
/// built-in streams.
pub trait ShaderExtension {
    fn attributes(&self) -> &'static [ExtraAttribute];

    /// Called once from `start`, before the first geometry upload.
    fn init_buffers(&mut self, ctx: &RenderCtx<'_>);

    /// Rebuilds the streams from the object list. Runs at the end of every
    /// full geometry upload, so the vertex order matches the built-in streams.
    fn write_to_buffers(&mut self, ctx: &RenderCtx<'_>, objects: &[Object]);

    /// Binds the streams at consecutive slots starting from `first_slot`.
    /// Returns false when a stream has nothing to bind.
    fn bind(&self, pass: &mut wgpu::RenderPass<'_>, first_slot: u32) -> bool;
}

static CONTROL_POINT_ATTRIBUTES: [ExtraAttribute; 4] = [
    ExtraAttribute { name: "a_a", location: 4, format: wgpu::VertexFormat::Float32x2 },
    ExtraAttribute { name: "a_b", location: 5, format: wgpu::VertexFormat::Float32x2 },
    ExtraAttribute { name: "a_c", location: 6, format: wgpu::VertexFormat::Float32x2 },
    ExtraAttribute { name: "a_d", location: 7, format: wgpu::VertexFormat::Float32x2 },
];

/// Ships each vertex's curve control points as four `vec2<f32>` streams
/// (`a_a`, `a_b`, `a_c`, `a_d`). Vertices without curve data get zeros.
pub struct ControlPointStreams {
    streams: [GpuBuffer; 4],
}

impl Default for ControlPointStreams {
    fn default() -> Self {
        let v = wgpu::BufferUsages::VERTEX;
        Self {
            streams: [
                GpuBuffer::new("tessera control point a", v),
                GpuBuffer::new("tessera control point b", v),
                GpuBuffer::new("tessera control point c", v),
                GpuBuffer::new("tessera control point d", v),
            ],
        }
    }
}

impl ControlPointStreams {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Splits per-vertex control points into one stream per point.
pub fn control_point_streams(objects: &[Object]) -> [Vec<[f32; 2]>; 4] {
    let count: usize = objects.iter().map(|o| o.vertices.len()).sum();
    let mut out: [Vec<[f32; 2]>; 4] = std::array::from_fn(|_| Vec::with_capacity(count));

    for v in objects.iter().flat_map(|o| o.vertices.iter()) {
        for (stream, p) in out.iter_mut().zip(v.extra.control_points()) {
            stream.push(p.to_array());
        }
    }
    out
}

impl ShaderExtension for ControlPointStreams {
    fn attributes(&self) -> &'static [ExtraAttribute] {
        &CONTROL_POINT_ATTRIBUTES
    }

    fn init_buffers(&mut self, ctx: &RenderCtx<'_>) {
        for s in &mut self.streams {
            s.reserve(ctx, 0);
        }
    }

    fn write_to_buffers(&mut self, ctx: &RenderCtx<'_>, objects: &[Object]) {
        let data = control_point_streams(objects);
        for (buffer, stream) in self.streams.iter_mut().zip(&data) {
            buffer.write(ctx, bytemuck::cast_slice(stream));
        }
    }

    fn bind(&self, pass: &mut wgpu::RenderPass<'_>, first_slot: u32) -> bool {
        for (i, buffer) in self.streams.iter().enumerate() {
            let Some(slice) = buffer.slice() else { return false };
            pass.set_vertex_buffer(first_slot + i as u32, slice);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::math::ColorRgba;
    use crate::scene::{Vertex, VertexExtra};

    #[test]
    fn streams_cover_every_vertex_in_order() {
        let cubic = VertexExtra::Cubic {
            a: Vec2::new(1.0, 2.0),
            b: Vec2::new(3.0, 4.0),
            c: Vec2::new(5.0, 6.0),
            d: Vec2::new(7.0, 8.0),
        };
        let quad = VertexExtra::Quadratic {
            a: Vec2::new(-1.0, 0.0),
            b: Vec2::new(0.0, 1.0),
            c: Vec2::new(1.0, 0.0),
        };
        let v = Vertex::new(Vec3::ZERO, ColorRgba::white(), Vec3::Z);
        let objects = [
            Object::new(vec![v.with_extra(cubic); 2], vec![]),
            Object::new(vec![v], vec![]),
            Object::new(vec![v.with_extra(quad)], vec![]),
        ];

        let [a, b, c, d] = control_point_streams(&objects);
        assert_eq!(a, vec![[1.0, 2.0], [1.0, 2.0], [0.0, 0.0], [-1.0, 0.0]]);
        assert_eq!(b[3], [0.0, 1.0]);
        assert_eq!(c[0], [5.0, 6.0]);
        assert_eq!(d, vec![[7.0, 8.0], [7.0, 8.0], [0.0, 0.0], [0.0, 0.0]]);
    }

    #[test]
    fn attribute_locations_follow_builtin_streams() {
        let ext = ControlPointStreams::new();
        let locations: Vec<u32> = ext.attributes().iter().map(|a| a.location).collect();
        assert_eq!(locations, vec![4, 5, 6, 7]);
    }
}
