//! GPU rendering subsystem.
//!
//! [`BatchRenderer`] is the only renderer: every object is merged into one set
//! of vertex streams and drawn with a single indexed draw per frame.
//!
//! Convention:
//! - 3D demos use a perspective projection over world units.
//! - Curve demos use [`Projection::Screen2d`], where world units are pixels
//!   with a top-left origin and +Y down.

mod batch;
pub(crate) mod buffer;
mod ctx;
pub mod shaders;

pub use batch::{
    control_point_streams, merge_objects, pack_model_matrices, texture_extent, BatchRenderer,
    ControlPointStreams, ExtraAttribute, MergedGeometry, PackedMatrices, Projection,
    RendererSettings, ShaderExtension, MAX_TEXTURE_WIDTH,
};
pub use ctx::{RenderCtx, RenderTarget, Viewport};
