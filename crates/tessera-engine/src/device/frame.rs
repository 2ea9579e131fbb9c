/// A single acquired swapchain frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Physical size of the acquired surface texture.
    #[inline]
    pub fn size_px(&self) -> [u32; 2] {
        let t = &self.surface_texture.texture;
        [t.width(), t.height()]
    }
}
