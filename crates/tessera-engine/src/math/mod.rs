//! Small math helpers shared by the scene, curve and render layers.
//!
//! Vector, matrix and quaternion types are `glam`'s; this module only adds the
//! conversions the renderer relies on (degrees, quaternion to matrix, colour
//! byte mapping, projection matrices) and a deterministic RNG for demo setup.

mod angle;
mod color;
mod projection;
mod quat;
mod rng;

pub use angle::to_rad;
pub use color::{rgb_to_screen_space, rgba_to_screen_space, ColorRgba};
pub use projection::{perspective, screen_2d, OPENGL_TO_WGPU_MATRIX};
pub use quat::{axis_angle_to_quat, quaternion_to_rotation_matrix};
pub use rng::Rng;
