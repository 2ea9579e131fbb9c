use std::borrow::Cow;

use glam::Mat4;

use crate::math::{perspective, screen_2d, ColorRgba};
use crate::render::shaders;
use crate::render::Viewport;

use super::ShaderExtension;

/// How the projection uniform is produced each frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    /// Perspective frustum; aspect comes from the current viewport.
    Perspective { fov_deg: f32, near: f32, far: f32 },
    /// Pixel space: origin top-left, +y down, one unit per logical pixel.
    Screen2d,
    /// Caller-supplied matrix, used as-is.
    Fixed(Mat4),
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective { fov_deg: 70.0, near: 0.01, far: 100_000.0 }
    }
}

impl Projection {
    pub fn matrix(&self, viewport: Viewport) -> Mat4 {
        match *self {
            Projection::Perspective { fov_deg, near, far } => {
                perspective(fov_deg, viewport.aspect(), near, far)
            }
            Projection::Screen2d => screen_2d(viewport.width.max(1.0), viewport.height.max(1.0)),
            Projection::Fixed(m) => m,
        }
    }
}

/// Configuration for [`BatchRenderer`](super::BatchRenderer).
pub struct RendererSettings {
    /// Clear colour; alpha is ignored (the frame is cleared opaque).
    pub background_colour: ColorRgba,
    /// WGSL vertex module with a `vs_main` entry point.
    pub vertex_shader_source: Cow<'static, str>,
    /// WGSL fragment module with an `fs_main` entry point.
    pub fragment_shader_source: Cow<'static, str>,
    pub projection: Projection,
    /// Extra per-vertex streams beyond the four built-in ones.
    pub additional_shader_data: Option<Box<dyn ShaderExtension>>,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            background_colour: ColorRgba::black(),
            vertex_shader_source: Cow::Borrowed(shaders::MESH_VERTEX),
            fragment_shader_source: Cow::Borrowed(shaders::MESH_FRAGMENT),
            projection: Projection::default(),
            additional_shader_data: None,
        }
    }
}

impl RendererSettings {
    pub fn new(
        vertex_shader_source: impl Into<Cow<'static, str>>,
        fragment_shader_source: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            vertex_shader_source: vertex_shader_source.into(),
            fragment_shader_source: fragment_shader_source.into(),
            ..Self::default()
        }
    }

    pub fn with_background(mut self, colour: ColorRgba) -> Self {
        self.background_colour = colour;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_extension(mut self, extension: impl ShaderExtension + 'static) -> Self {
        self.additional_shader_data = Some(Box::new(extension));
        self
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    #[test]
    fn default_projection_is_wide_perspective() {
        assert_eq!(
            Projection::default(),
            Projection::Perspective { fov_deg: 70.0, near: 0.01, far: 100_000.0 }
        );
    }

    #[test]
    fn screen_projection_follows_viewport() {
        let m = Projection::Screen2d.matrix(Viewport::new(800.0, 600.0));
        let corner = m * Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert!((corner.x - 1.0).abs() < 1e-6);
        assert!((corner.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn fixed_projection_is_passed_through() {
        let m = Mat4::from_scale(glam::Vec3::splat(3.0));
        assert_eq!(Projection::Fixed(m).matrix(Viewport::new(10.0, 10.0)), m);
    }
}
