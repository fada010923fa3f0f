use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::shape::Sdf;

/// Exact Euclidean disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

impl Sdf for Circle {
    fn sdf(&self, p: Point) -> f64 {
        (p - self.center).hypot() - self.radius
    }

    fn bounds(&self) -> Rect {
        square_bounds(self.center, self.radius)
    }
}

/// Superellipse `|x|^k + |y|^k = r^k` with an even exponent `k = 2 * order`.
///
/// Order 1 is a circle; higher orders flatten the sides toward a square with the same
/// bounding box. The field has the correct sign and zero set but is not an exact distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Squircle {
    pub center: Point,
    pub radius: f64,
    exponent: f64,
}

impl Squircle {
    pub const DEFAULT_ORDER: u32 = 2;

    /// Squircle with the default exponent of 4.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            exponent: (2 * Self::DEFAULT_ORDER) as f64,
        }
    }

    pub fn with_order(center: Point, radius: f64, order: u32) -> CanvasResult<Self> {
        if order == 0 {
            return Err(CanvasError::validation("squircle order must be >= 1"));
        }
        Ok(Self {
            center,
            radius,
            exponent: 2.0 * order as f64,
        })
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}

impl Sdf for Squircle {
    fn sdf(&self, p: Point) -> f64 {
        let ax = (p.x - self.center.x).abs();
        let ay = (p.y - self.center.y).abs();
        let m = ax.max(ay);
        if m == 0.0 {
            return -self.radius;
        }
        // Factor out the larger offset so the powers stay within [0, 1].
        let k = self.exponent;
        let norm = ((ax / m).powf(k) + (ay / m).powf(k)).powf(1.0 / k);
        m * norm - self.radius
    }

    fn bounds(&self) -> Rect {
        square_bounds(self.center, self.radius)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn square(origin: Point, side: f64) -> Self {
        Self::new(origin, side, side)
    }

    fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Sdf for Rectangle {
    fn sdf(&self, p: Point) -> f64 {
        let half = self.half_extents();
        let center = self.origin + half;
        let dx = (p.x - center.x).abs() - half.x;
        let dy = (p.y - center.y).abs() - half.y;
        let outside = Vec2::new(dx.max(0.0), dy.max(0.0)).hypot();
        dx.max(dy).min(0.0) + outside
    }

    fn bounds(&self) -> Rect {
        Rect::enclosing(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.height,
        )
    }
}

/// Line segment `a..b` thickened by `radius`. Exact Euclidean field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub a: Point,
    pub b: Point,
    pub radius: f64,
}

impl Capsule {
    pub fn new(a: Point, b: Point, radius: f64) -> Self {
        Self { a, b, radius }
    }
}

impl Sdf for Capsule {
    fn sdf(&self, p: Point) -> f64 {
        let pa = p - self.a;
        let ba = self.b - self.a;
        let len2 = ba.hypot2();
        let h = if len2 > 0.0 {
            (pa.dot(ba) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (pa - ba * h).hypot() - self.radius
    }

    fn bounds(&self) -> Rect {
        Rect::enclosing(
            self.a.x.min(self.b.x) - self.radius,
            self.a.y.min(self.b.y) - self.radius,
            self.a.x.max(self.b.x) + self.radius,
            self.a.y.max(self.b.y) + self.radius,
        )
    }
}

fn square_bounds(center: Point, radius: f64) -> Rect {
    Rect::enclosing(
        center.x - radius,
        center.y - radius,
        center.x + radius,
        center.y + radius,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/shape/primitives.rs"]
mod tests;
