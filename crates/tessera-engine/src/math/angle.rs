/// Converts degrees to radians.
#[inline]
pub fn to_rad(deg: f32) -> f32 {
    deg * (std::f32::consts::PI / 180.0)
}
