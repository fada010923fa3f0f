//! Fill model: solid colors, two-stop gradients and procedural color functions.

pub mod gradient;
pub mod solid;

use std::sync::Arc;

use gradient::Gradient;
use solid::SolidColor;

/// Shared color function for [`Color::Procedural`], called with a normalized position.
#[derive(Clone)]
pub struct ColorFn(Arc<dyn Fn(f32, f32) -> SolidColor + Send + Sync>);

impl ColorFn {
    pub fn new(f: impl Fn(f32, f32) -> SolidColor + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, px: f32, py: f32) -> SolidColor {
        (self.0)(px, py)
    }
}

impl std::fmt::Debug for ColorFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ColorFn(..)")
    }
}

/// Fill of a shape or canvas background.
#[derive(Clone, Debug)]
pub enum Color {
    Solid(SolidColor),
    Gradient(Gradient),
    Procedural(ColorFn),
}

impl Default for Color {
    fn default() -> Self {
        Color::Solid(SolidColor::TRANSPARENT)
    }
}

impl Color {
    /// Opaque solid from a packed `0xRRGGBB` value.
    pub fn rgb(rgb: u32) -> Self {
        Color::Solid(SolidColor::rgb(rgb))
    }

    pub fn procedural(f: impl Fn(f32, f32) -> SolidColor + Send + Sync + 'static) -> Self {
        Color::Procedural(ColorFn::new(f))
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Color::Solid(_))
    }

    /// Position-independent color: the solid itself, a gradient's zero-percent stop, or
    /// transparent for procedural fills.
    pub fn representative(&self) -> SolidColor {
        match self {
            Color::Solid(c) => *c,
            Color::Gradient(g) => g.from,
            Color::Procedural(_) => SolidColor::TRANSPARENT,
        }
    }

    /// Sample at a normalized `[0, 1]²` position.
    pub fn sample(&self, px: f32, py: f32) -> SolidColor {
        match self {
            Color::Solid(c) => *c,
            Color::Gradient(g) => g.sample(px, py),
            Color::Procedural(f) => f.call(px, py),
        }
    }
}

impl From<SolidColor> for Color {
    fn from(c: SolidColor) -> Self {
        Color::Solid(c)
    }
}

impl From<Gradient> for Color {
    fn from(g: Gradient) -> Self {
        Color::Gradient(g)
    }
}

/// Opaque color from a packed `0xRRGGBB` value.
impl From<u32> for Color {
    fn from(rgb: u32) -> Self {
        Color::Solid(SolidColor::rgb(rgb))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/color.rs"]
mod tests;
