//! Batch renderer: every object in one indexed draw.
//!
//! All objects' vertices are merged into shared per-attribute buffers. Each
//! vertex carries the slot of its owning object, and the vertex stage fetches
//! that object's model matrix from a float texture. Moving objects therefore
//! only re-uploads the matrix texture; the vertex buffers are rebuilt only
//! when geometry changes.

mod extension;
mod geometry;
mod matrices;
mod pipeline;
mod settings;
mod state;

pub use extension::{control_point_streams, ControlPointStreams, ExtraAttribute, ShaderExtension};
pub use geometry::{merge_objects, MergedGeometry};
pub use matrices::{pack_model_matrices, texture_extent, PackedMatrices, MAX_TEXTURE_WIDTH};
pub use settings::{Projection, RendererSettings};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{Object, ObjectId};

use self::pipeline::BUILTIN_ATTRIBUTES;
use self::state::RenderingState;

/// Owns the object list and the GPU state that draws it.
pub struct BatchRenderer {
    settings: RendererSettings,
    objects: Vec<Object>,
    state: Option<RenderingState>,
}

impl BatchRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self {
            settings,
            objects: Vec::new(),
            state: None,
        }
    }

    /// One-time GPU setup: pipeline, buffers, then a full geometry and
    /// matrix upload. Later calls do nothing.
    pub fn start(&mut self, ctx: &RenderCtx<'_>) {
        if self.state.is_some() {
            return;
        }

        self.state = Some(RenderingState::new(ctx, &self.settings));

        if let Some(ext) = self.settings.additional_shader_data.as_mut() {
            ext.init_buffers(ctx);
        }

        self.write_objects_to_vertex_buffer(ctx);
        self.update_model_view_matrices(ctx);

        log::info!("batch renderer started with {} objects", self.objects.len());
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.state.is_some()
    }

    #[inline]
    pub fn settings(&self) -> &RendererSettings {
        &self.settings
    }

    /// Appends an object; its id is also its matrix slot.
    ///
    /// Not visible until the next [`write_objects_to_vertex_buffer`](Self::write_objects_to_vertex_buffer).
    pub fn push_object(&mut self, object: Object) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    #[inline]
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Mutable access to the list, for adding or removing objects.
    #[inline]
    pub fn objects_mut(&mut self) -> &mut Vec<Object> {
        &mut self.objects
    }

    #[inline]
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.index())
    }

    /// Number of indices drawn per frame.
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.state.as_ref().map_or(0, |s| s.index_count)
    }

    /// Full rebuild of every vertex and index stream.
    ///
    /// Required after any change to the object set or to an object's
    /// vertices/triangles. Transform changes only need
    /// [`update_model_view_matrices`](Self::update_model_view_matrices).
    pub fn write_objects_to_vertex_buffer(&mut self, ctx: &RenderCtx<'_>) {
        let Some(state) = self.state.as_mut() else {
            log::debug!("write_objects_to_vertex_buffer before start; skipped");
            return;
        };

        let merged = merge_objects(&self.objects);

        state.positions.write(ctx, bytemuck::cast_slice(&merged.positions));
        state.colours.write(ctx, bytemuck::cast_slice(&merged.colours));
        state.normals.write(ctx, bytemuck::cast_slice(&merged.normals));
        state.matrix_indices.write(ctx, bytemuck::cast_slice(&merged.matrix_indices));
        state.indices.write(ctx, bytemuck::cast_slice(&merged.indices));
        state.index_count = merged.index_count();

        if let Some(ext) = self.settings.additional_shader_data.as_mut() {
            ext.write_to_buffers(ctx, &self.objects);
        }

        log::trace!(
            "geometry upload: {} vertices, {} indices",
            merged.vertex_count(),
            merged.index_count()
        );
    }

    /// Packs every object's `T * R * S` matrix and uploads the texture.
    /// Does nothing for an empty object list.
    pub fn update_model_view_matrices(&mut self, ctx: &RenderCtx<'_>) {
        let Some(state) = self.state.as_mut() else { return };
        let Some(packed) = pack_model_matrices(&self.objects) else { return };
        state.upload_matrices(ctx, &packed);
    }

    /// Renders one frame.
    ///
    /// Starts the renderer if needed, runs `frame` (where objects are mutated
    /// and buffers resynchronised), then clears colour and depth and issues
    /// one indexed draw over all buffered indices.
    pub fn render_frame<F>(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: F)
    where
        F: FnOnce(&mut Self, &RenderCtx<'_>),
    {
        self.start(ctx);

        frame(self, ctx);

        let Some(state) = self.state.as_mut() else { return };

        if state.surface_format != ctx.surface_format {
            state.rebuild_pipeline(ctx, &self.settings);
        }

        let projection = self.settings.projection.matrix(ctx.viewport);
        ctx.queue.write_buffer(&state.projection_ubo, 0, bytemuck::cast_slice(&projection.to_cols_array()));

        state.ensure_depth(ctx, target.size_px);
        let Some(depth) = state.depth.as_ref() else { return };

        let bg = self.settings.background_colour;
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessera batch pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: bg.r as f64,
                        g: bg.g as f64,
                        b: bg.b as f64,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if state.index_count == 0 {
            return;
        }

        let Some(pipeline) = state.pipeline.as_ref() else { return };
        let Some(bind_group) = state.bind_group.as_ref() else { return };
        let streams = [
            state.positions.slice(),
            state.colours.slice(),
            state.normals.slice(),
            state.matrix_indices.slice(),
        ];
        let Some(index_slice) = state.indices.slice() else { return };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        for (slot, stream) in streams.into_iter().enumerate() {
            let Some(slice) = stream else { return };
            rpass.set_vertex_buffer(slot as u32, slice);
        }
        if let Some(ext) = self.settings.additional_shader_data.as_ref() {
            if !ext.bind(&mut rpass, BUILTIN_ATTRIBUTES.len() as u32) {
                return;
            }
        }
        rpass.set_index_buffer(index_slice, wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..state.index_count, 0, 0..1);
    }
}
