use crate::render::buffer::GpuBuffer;
use crate::render::RenderCtx;

use super::matrices::PackedMatrices;
use super::pipeline::{self, DEPTH_FORMAT, PROJECTION_UBO_SIZE};
use super::RendererSettings;

/// Float texture holding the packed model matrices.
pub(super) struct MatrixTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

pub(super) struct DepthTarget {
    pub view: wgpu::TextureView,
    pub size_px: [u32; 2],
}

/// GPU objects owned by a started renderer.
pub(super) struct RenderingState {
    pub surface_format: wgpu::TextureFormat,
    pub pipeline: Option<wgpu::RenderPipeline>,

    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: Option<wgpu::BindGroup>,
    pub projection_ubo: wgpu::Buffer,

    pub positions: GpuBuffer,
    pub colours: GpuBuffer,
    pub normals: GpuBuffer,
    pub matrix_indices: GpuBuffer,
    pub indices: GpuBuffer,
    pub index_count: u32,

    pub matrices: Option<MatrixTexture>,
    pub depth: Option<DepthTarget>,
}

impl RenderingState {
    pub fn new(ctx: &RenderCtx<'_>, settings: &RendererSettings) -> Self {
        let bind_group_layout = pipeline::create_bind_group_layout(ctx.device);

        let projection_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessera projection ubo"),
            size: PROJECTION_UBO_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut state = Self {
            surface_format: ctx.surface_format,
            pipeline: None,
            bind_group_layout,
            bind_group: None,
            projection_ubo,
            positions: GpuBuffer::new("tessera positions", wgpu::BufferUsages::VERTEX),
            colours: GpuBuffer::new("tessera colours", wgpu::BufferUsages::VERTEX),
            normals: GpuBuffer::new("tessera normals", wgpu::BufferUsages::VERTEX),
            matrix_indices: GpuBuffer::new("tessera matrix indices", wgpu::BufferUsages::VERTEX),
            indices: GpuBuffer::new("tessera indices", wgpu::BufferUsages::INDEX),
            index_count: 0,
            matrices: None,
            depth: None,
        };
        state.rebuild_pipeline(ctx, settings);
        state
    }

    pub fn rebuild_pipeline(&mut self, ctx: &RenderCtx<'_>, settings: &RendererSettings) {
        let extra = settings
            .additional_shader_data
            .as_ref()
            .map(|ext| ext.attributes())
            .unwrap_or(&[]);

        self.surface_format = ctx.surface_format;
        self.pipeline = pipeline::create_pipeline(
            ctx.device,
            ctx.surface_format,
            &self.bind_group_layout,
            &settings.vertex_shader_source,
            &settings.fragment_shader_source,
            extra,
        );
        if self.pipeline.is_none() {
            log::error!("batch renderer has no usable pipeline; frames will only be cleared");
        }
    }

    /// Uploads packed matrices, recreating the texture when its extent changes.
    pub fn upload_matrices(&mut self, ctx: &RenderCtx<'_>, packed: &PackedMatrices) {
        let reuse = self
            .matrices
            .as_ref()
            .is_some_and(|m| m.width == packed.width && m.height == packed.height);

        if !reuse {
            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("tessera model matrices"),
                size: wgpu::Extent3d {
                    width: packed.width,
                    height: packed.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba32Float,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

            log::debug!("matrix texture resized to {}x{}", packed.width, packed.height);
            self.matrices = Some(MatrixTexture {
                texture,
                view,
                width: packed.width,
                height: packed.height,
            });
            self.bind_group = None;
        }

        let Some(matrices) = self.matrices.as_ref() else { return };

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &matrices.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&packed.texels),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(packed.bytes_per_row()),
                rows_per_image: Some(packed.height),
            },
            wgpu::Extent3d {
                width: packed.width,
                height: packed.height,
                depth_or_array_layers: 1,
            },
        );

        self.ensure_bind_group(ctx);
    }

    fn ensure_bind_group(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }
        let Some(matrices) = self.matrices.as_ref() else { return };

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessera batch bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.projection_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&matrices.view),
                },
            ],
        }));
    }

    /// Keeps the depth target the same size as the colour target.
    pub fn ensure_depth(&mut self, ctx: &RenderCtx<'_>, size_px: [u32; 2]) {
        if self.depth.as_ref().is_some_and(|d| d.size_px == size_px) {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessera depth"),
            size: wgpu::Extent3d {
                width: size_px[0].max(1),
                height: size_px[1].max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.depth = Some(DepthTarget {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            size_px,
        });
    }
}
