use glam::{Mat4, Vec4};

use super::to_rad;

/// Remaps OpenGL clip depth `[-1, 1]` to wgpu clip depth `[0, 1]`.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// Perspective frustum for a vertical field of view `fov_deg`.
///
/// Built from the frustum bounds `t = tan(fov / 2) * near`, `r = aspect * t`
/// and remapped to wgpu depth, so `z = -near` lands on depth 0 and
/// `z = -far` on depth 1.
pub fn perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let t = (to_rad(fov_deg) / 2.0).tan() * near;
    let b = -t;
    let r = aspect * t;
    let l = -r;

    let gl = Mat4::from_cols(
        Vec4::new((2.0 * near) / (r - l), 0.0, 0.0, 0.0),
        Vec4::new(0.0, (2.0 * near) / (t - b), 0.0, 0.0),
        Vec4::new((r + l) / (r - l), (t + b) / (t - b), -(far + near) / (far - near), -1.0),
        Vec4::new(0.0, 0.0, -(2.0 * far * near) / (far - near), 0.0),
    );

    OPENGL_TO_WGPU_MATRIX * gl
}

/// Pixel-space projection: origin top-left, +X right, +Y down, `z` passed through.
pub fn screen_2d(width: f32, height: f32) -> Mat4 {
    let width = width.max(1.0);
    let height = height.max(1.0);
    Mat4::from_cols(
        Vec4::new(2.0 / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, -2.0 / height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(-1.0, 1.0, 0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn ndc(m: Mat4, p: Vec3) -> Vec3 {
        let c = m * p.extend(1.0);
        c.truncate() / c.w
    }

    #[test]
    fn screen_corners_map_to_ndc_corners() {
        let m = screen_2d(800.0, 600.0);
        assert!(ndc(m, Vec3::ZERO).abs_diff_eq(Vec3::new(-1.0, 1.0, 0.0), 1e-6));
        assert!(ndc(m, Vec3::new(800.0, 600.0, 0.0)).abs_diff_eq(Vec3::new(1.0, -1.0, 0.0), 1e-6));
    }

    #[test]
    fn perspective_depth_range_is_zero_to_one() {
        let m = perspective(70.0, 16.0 / 9.0, 0.5, 100.0);
        assert!(ndc(m, Vec3::new(0.0, 0.0, -0.5)).z.abs() < 1e-5);
        assert!((ndc(m, Vec3::new(0.0, 0.0, -100.0)).z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn perspective_centre_stays_centred() {
        let m = perspective(70.0, 1.5, 0.1, 50.0);
        let p = ndc(m, Vec3::new(0.0, 0.0, -10.0));
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
    }
}
