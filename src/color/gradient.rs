use std::f32::consts::FRAC_PI_2;

use crate::color::solid::SolidColor;
use crate::foundation::math::{QUARTER_TURNS, float_equal, linear_mapping, radians_normalize};

/// Geometry of a two-stop gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientKind {
    /// Varies along `angle` (radians, `[0, 2π)`); `π/2` runs top to bottom.
    Linear { angle: f32 },
    /// Varies with distance from the center of the unit square.
    Radial,
}

/// Two-stop gradient sampled in normalized `[0, 1]²` coordinates.
///
/// The raw position percent is remapped through the `[start, end]` window before blending, so
/// everything before `start` takes the `from` color and everything after `end` the `to` color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
    pub kind: GradientKind,
    pub from: SolidColor,
    pub to: SolidColor,
    pub start: f32,
    pub end: f32,
}

impl Gradient {
    /// Vertical linear gradient (top = `from`, bottom = `to`).
    pub fn linear(from: SolidColor, to: SolidColor) -> Self {
        Self::linear_with_angle(from, to, FRAC_PI_2)
    }

    pub fn linear_with_angle(from: SolidColor, to: SolidColor, angle: f32) -> Self {
        Self {
            kind: GradientKind::Linear {
                angle: radians_normalize(angle),
            },
            from,
            to,
            start: 0.0,
            end: 1.0,
        }
    }

    pub fn radial(from: SolidColor, to: SolidColor) -> Self {
        Self {
            kind: GradientKind::Radial,
            from,
            to,
            start: 0.0,
            end: 1.0,
        }
    }

    pub fn with_window(mut self, start: f32, end: f32) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Raw position percent before the `[start, end]` remap.
    pub fn position_percent(&self, px: f32, py: f32) -> f32 {
        match self.kind {
            GradientKind::Linear { angle } => {
                if float_equal(angle, QUARTER_TURNS[0]) {
                    px
                } else if float_equal(angle, QUARTER_TURNS[1]) {
                    py
                } else if float_equal(angle, QUARTER_TURNS[2]) {
                    1.0 - px
                } else if float_equal(angle, QUARTER_TURNS[3]) {
                    1.0 - py
                } else {
                    let (sin, cos) = angle.sin_cos();
                    (px - 0.5) * cos + (py - 0.5) * sin + 0.5
                }
            }
            GradientKind::Radial => {
                let d = (px - 0.5).hypot(py - 0.5);
                linear_mapping(d, 0.0, 0.5f32.sqrt(), 0.0, 1.0)
            }
        }
    }

    pub fn sample(&self, px: f32, py: f32) -> SolidColor {
        let percent = self.position_percent(px, py);
        let percent = linear_mapping(percent, self.start, self.end, 0.0, 1.0);
        self.from.lerp(self.to, percent)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/gradient.rs"]
mod tests;
