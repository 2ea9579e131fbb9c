use glam::{Mat4, Quat, Vec3, Vec4};

/// Builds a rotation quaternion of `angle` radians about `axis`.
///
/// The axis is normalized here. A zero-length axis yields NaN components;
/// callers must pass a non-zero axis.
pub fn axis_angle_to_quat(axis: Vec3, angle: f32) -> Quat {
    let axis = axis / axis.length();
    let (s, c) = (angle * 0.5).sin_cos();
    Quat::from_xyzw(axis.x * s, axis.y * s, axis.z * s, c)
}

/// Converts a unit quaternion to a homogeneous 4x4 rotation matrix
/// (no scale, no translation).
pub fn quaternion_to_rotation_matrix(q: Quat) -> Mat4 {
    let (x, y, z, w) = (q.x, q.y, q.z, q.w);

    let xx = x * x;
    let yy = y * y;
    let zz = z * z;
    let xy = x * y;
    let xz = x * z;
    let yz = y * z;
    let wx = w * x;
    let wy = w * y;
    let wz = w * z;

    Mat4::from_cols(
        Vec4::new(1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy), 0.0),
        Vec4::new(2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx), 0.0),
        Vec4::new(2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy), 0.0),
        Vec4::W,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Mat4, b: Mat4) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn axis_is_normalized() {
        let q = axis_angle_to_quat(Vec3::new(0.0, 3.0, 0.0), 1.0);
        assert!((q.length() - 1.0).abs() < 1e-6);
        assert!(q.abs_diff_eq(Quat::from_rotation_y(1.0), 1e-6));
    }

    #[test]
    fn zero_axis_propagates_nan() {
        let q = axis_angle_to_quat(Vec3::ZERO, 1.0);
        assert!(q.x.is_nan());
    }

    #[test]
    fn identity_quat_gives_identity_matrix() {
        assert_eq!(quaternion_to_rotation_matrix(Quat::IDENTITY), Mat4::IDENTITY);
    }

    #[test]
    fn matches_glam_rotation() {
        let q = axis_angle_to_quat(Vec3::new(1.0, 2.0, -0.5), 0.73);
        assert!(close(quaternion_to_rotation_matrix(q), Mat4::from_quat(q)));
    }

    #[test]
    fn rotates_x_onto_y_about_z() {
        let m = quaternion_to_rotation_matrix(axis_angle_to_quat(Vec3::Z, std::f32::consts::FRAC_PI_2));
        let v = m.transform_point3(Vec3::X);
        assert!(v.abs_diff_eq(Vec3::Y, 1e-6));
    }
}
