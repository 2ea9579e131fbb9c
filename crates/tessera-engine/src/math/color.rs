/// Straight-alpha RGBA color with channels in `[0, 1]`.
///
/// This is the per-vertex color format uploaded to the GPU unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

/// Maps 0–255 channel values to `[0, 1]` with an opaque alpha.
#[inline]
pub fn rgb_to_screen_space(r: u8, g: u8, b: u8) -> ColorRgba {
    rgba_to_screen_space(r, g, b, 255)
}

/// Maps 0–255 channel values (alpha included) to `[0, 1]`.
#[inline]
pub fn rgba_to_screen_space(r: u8, g: u8, b: u8, a: u8) -> ColorRgba {
    ColorRgba::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_defaults_to_opaque() {
        let c = rgb_to_screen_space(17, 17, 17);
        assert_eq!(c.a, 1.0);
        assert!((c.r - 17.0 / 255.0).abs() < 1e-7);
    }

    #[test]
    fn full_range_maps_to_unit_interval() {
        assert_eq!(rgba_to_screen_space(255, 0, 255, 0), ColorRgba::new(1.0, 0.0, 1.0, 0.0));
    }
}
