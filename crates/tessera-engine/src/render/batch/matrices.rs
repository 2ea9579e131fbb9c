use glam::Mat4;

use crate::scene::Object;

/// Texture width cap, in texels.
pub const MAX_TEXTURE_WIDTH: u32 = 4096;

/// Texels per 4x4 matrix (one RGBA32F texel per column).
pub const TEXELS_PER_MATRIX: u32 = 4;

/// Model matrices packed for an `Rgba32Float` lookup texture.
///
/// Matrix `i` occupies linear texels `4i..4i+4` (columns in order); linear
/// texel `k` sits at `(k % width, k / width)`. Trailing texels are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedMatrices {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<[f32; 4]>,
}

impl PackedMatrices {
    /// Reads matrix `index` back out of the packed texels.
    pub fn matrix(&self, index: usize) -> Option<Mat4> {
        let base = index * TEXELS_PER_MATRIX as usize;
        let cols = self.texels.get(base..base + TEXELS_PER_MATRIX as usize)?;
        Some(Mat4::from_cols(cols[0].into(), cols[1].into(), cols[2].into(), cols[3].into()))
    }

    /// Bytes per texture row.
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * std::mem::size_of::<[f32; 4]>() as u32
    }
}

/// Texture extent for `count` matrices: `width = min(count, 4096)`,
/// `height = ceil(4 * count / width)`.
pub fn texture_extent(count: usize) -> Option<(u32, u32)> {
    if count == 0 {
        return None;
    }
    let count = count as u32;
    let width = count.min(MAX_TEXTURE_WIDTH);
    let height = (count * TEXELS_PER_MATRIX).div_ceil(width);
    Some((width, height))
}

/// Packs every object's `T * R * S` model matrix. `None` when there are no objects.
pub fn pack_model_matrices(objects: &[Object]) -> Option<PackedMatrices> {
    let (width, height) = texture_extent(objects.len())?;

    let mut texels = Vec::with_capacity((width * height) as usize);
    for object in objects {
        let m = object.model_matrix();
        texels.extend([m.x_axis, m.y_axis, m.z_axis, m.w_axis].map(|c| c.to_array()));
    }
    texels.resize((width * height) as usize, [0.0; 4]);

    Some(PackedMatrices { width, height, texels })
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use super::*;
    use crate::math::axis_angle_to_quat;

    fn placed(i: usize) -> Object {
        let mut o = Object::default();
        o.position = Vec3::new(i as f32, -2.0 * i as f32, 0.25);
        o.rotation = axis_angle_to_quat(Vec3::new(1.0, 1.0, 0.0), 0.1 * i as f32);
        o.scale = Vec3::new(1.0, 2.0, 0.5 + i as f32);
        o
    }

    // ── extent ────────────────────────────────────────────────────────────

    #[test]
    fn extent_for_small_counts() {
        assert_eq!(texture_extent(0), None);
        assert_eq!(texture_extent(1), Some((1, 4)));
        assert_eq!(texture_extent(2000), Some((2000, 4)));
    }

    #[test]
    fn width_is_capped() {
        assert_eq!(texture_extent(4096), Some((4096, 4)));
        assert_eq!(texture_extent(10_000), Some((4096, 10)));
    }

    // ── packing ───────────────────────────────────────────────────────────

    #[test]
    fn empty_list_packs_nothing() {
        assert_eq!(pack_model_matrices(&[]), None);
    }

    #[test]
    fn matrices_round_trip_bit_exact() {
        let objects: Vec<Object> = (0..7).map(placed).collect();
        let packed = pack_model_matrices(&objects).expect("non-empty");

        for (i, o) in objects.iter().enumerate() {
            let m = packed.matrix(i).expect("in range");
            let expected = o.model_matrix();
            assert_eq!(m.to_cols_array().map(f32::to_bits), expected.to_cols_array().map(f32::to_bits));
        }
    }

    #[test]
    fn trailing_texels_are_zero() {
        let objects: Vec<Object> = (0..5000).map(|_| Object::default()).collect();
        let packed = pack_model_matrices(&objects).expect("non-empty");

        assert_eq!((packed.width, packed.height), (4096, 5));
        assert_eq!(packed.texels.len(), 4096 * 5);
        assert!(packed.texels[5000 * 4..].iter().all(|t| *t == [0.0; 4]));
        assert_eq!(packed.matrix(4999), Some(Mat4::IDENTITY));
        assert_eq!(packed.bytes_per_row(), 4096 * 16);
    }

    #[test]
    fn identity_object_packs_identity() {
        let mut o = Object::default();
        o.rotation = Quat::IDENTITY;
        let packed = pack_model_matrices(&[o]).expect("non-empty");
        assert_eq!(packed.matrix(0), Some(Mat4::IDENTITY));
        assert_eq!(packed.matrix(1), None);
    }
}
