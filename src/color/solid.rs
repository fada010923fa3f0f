use crate::foundation::math::float_equal;

/// A straight-alpha RGB color with a float opacity.
///
/// Alpha is normalized on construction: the absolute value is taken, values within a scaled
/// epsilon of 1 (or above 1) become exactly `1.0`, and values within epsilon of 0 become
/// exactly `0.0`, so [`SolidColor::is_opaque`] and [`SolidColor::is_transparent`] are exact
/// comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    alpha: f32,
}

impl Default for SolidColor {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl SolidColor {
    /// Fully transparent black.
    pub const TRANSPARENT: SolidColor = SolidColor {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 0.0,
    };

    pub fn new(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: normalize_alpha(alpha),
        }
    }

    pub fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub fn rgb(rgb: u32) -> Self {
        Self::rgba(rgb, 1.0)
    }

    /// Color from a packed `0xRRGGBB` value and an opacity.
    pub fn rgba(rgb: u32, alpha: f32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
            alpha,
        )
    }

    /// Packed `0xRRGGBB` value (alpha dropped).
    pub fn rgb24(&self) -> u32 {
        (u32::from(self.red) << 16) | (u32::from(self.green) << 8) | u32::from(self.blue)
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self::new(self.red, self.green, self.blue, alpha)
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha == 1.0
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha == 0.0
    }

    /// Per-channel linear blend, weighted `(1 - t, t)`. Color channels truncate.
    pub fn lerp(self, other: SolidColor, t: f32) -> SolidColor {
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        SolidColor::new(
            mix(f32::from(self.red), f32::from(other.red)) as u8,
            mix(f32::from(self.green), f32::from(other.green)) as u8,
            mix(f32::from(self.blue), f32::from(other.blue)) as u8,
            mix(self.alpha, other.alpha),
        )
    }
}

fn normalize_alpha(alpha: f32) -> f32 {
    let alpha = alpha.abs();
    if alpha.is_nan() {
        return 0.0;
    }
    if alpha >= 1.0 || float_equal(alpha, 1.0) {
        1.0
    } else if alpha <= f32::EPSILON {
        0.0
    } else {
        alpha
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/solid.rs"]
mod tests;
