use glam::{Mat4, Quat, Vec3};

use crate::math::quaternion_to_rotation_matrix;

use super::Vertex;

/// Three vertex indices, local to the owning object's vertex list.
pub type Triangle = [u32; 3];

/// Index of an object inside the renderer's object list.
///
/// Doubles as the per-vertex matrix index the GPU uses to fetch the object's
/// transform from the matrix texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct ObjectId(pub usize);

impl ObjectId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A renderable mesh with its own transform.
///
/// Invariant: every triangle index is `< vertices.len()`. The batch renderer
/// offsets them when merging objects into shared buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Object {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Object {
    /// Creates an object with an identity transform.
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<Triangle>) -> Self {
        let object = Self {
            vertices,
            triangles,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        };
        debug_assert!(object.indices_in_bounds(), "triangle index out of range");
        object
    }

    /// Returns true when every triangle references an existing vertex.
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.vertices.len() as u32;
        self.triangles.iter().all(|t| t.iter().all(|&i| i < n))
    }

    /// Model matrix `T * R * S`: scale first, then rotation, then translation.
    pub fn model_matrix(&self) -> Mat4 {
        let translation = Mat4::from_translation(self.position);
        let rotation = quaternion_to_rotation_matrix(self.rotation);
        let scale = Mat4::from_scale(self.scale);

        translation * rotation * scale
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::math::{axis_angle_to_quat, ColorRgba};

    fn tri_object() -> Object {
        let v = |x: f32, y: f32| Vertex::new(Vec3::new(x, y, 0.0), ColorRgba::white(), Vec3::Z);
        Object::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)], vec![[0, 1, 2]])
    }

    #[test]
    fn new_object_has_identity_transform() {
        assert_eq!(tri_object().model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn out_of_range_index_is_detected() {
        let mut o = tri_object();
        o.triangles.push([0, 1, 3]);
        assert!(!o.indices_in_bounds());
    }

    #[test]
    fn scale_then_rotate_then_translate() {
        let mut o = tri_object();
        o.scale = Vec3::new(2.0, 1.0, 1.0);
        o.rotation = axis_angle_to_quat(Vec3::Z, std::f32::consts::FRAC_PI_2);
        o.position = Vec3::new(10.0, 0.0, 0.0);

        // (1,0,0) -> scale (2,0,0) -> rotate (0,2,0) -> translate (10,2,0)
        let p = o.model_matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(10.0, 2.0, 0.0), 1e-5));
    }
}
