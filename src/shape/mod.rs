//! Signed-distance shape nodes.
//!
//! Leaf primitives live in [`primitives`]; [`operation`] combines already-built nodes into a
//! DAG. Children are shared through [`ShapeRef`], so a node can appear under any number of
//! parents, and a node can only reference nodes that exist before it (no cycles).

pub mod operation;
pub mod primitives;

use std::sync::Arc;

use crate::color::Color;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::CanvasResult;
use operation::{Opcode, Operation};
use primitives::{Capsule, Circle, Rectangle, Squircle};

/// Distance-field capability shared by every node.
pub trait Sdf {
    /// Signed distance at `p`: negative inside, positive outside, zero on the boundary.
    fn sdf(&self, p: Point) -> f64;

    /// Integer box containing every pixel the shape can cover. Always a superset, never
    /// required to be tight.
    fn bounds(&self) -> Rect;

    fn sdf_at(&self, x: f64, y: f64) -> f64 {
        self.sdf(Point::new(x, y))
    }
}

/// Shared handle to an immutable shape node.
pub type ShapeRef = Arc<Shape>;

#[derive(Clone, Debug)]
pub enum Geometry {
    Circle(Circle),
    Squircle(Squircle),
    Rectangle(Rectangle),
    Capsule(Capsule),
    Operation(Operation),
}

impl Sdf for Geometry {
    fn sdf(&self, p: Point) -> f64 {
        match self {
            Geometry::Circle(s) => s.sdf(p),
            Geometry::Squircle(s) => s.sdf(p),
            Geometry::Rectangle(s) => s.sdf(p),
            Geometry::Capsule(s) => s.sdf(p),
            Geometry::Operation(s) => s.sdf(p),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            Geometry::Circle(s) => s.bounds(),
            Geometry::Squircle(s) => s.bounds(),
            Geometry::Rectangle(s) => s.bounds(),
            Geometry::Capsule(s) => s.bounds(),
            Geometry::Operation(s) => s.bounds(),
        }
    }
}

macro_rules! geometry_from {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Geometry {
                fn from(v: $ty) -> Self {
                    Geometry::$ty(v)
                }
            }
        )*
    };
}

geometry_from!(Circle, Squircle, Rectangle, Capsule, Operation);

/// A geometry node plus the fill used when it is drawn as a top-level canvas shape.
///
/// The color of a node used only as a child is ignored by the compositor.
#[derive(Clone, Debug)]
pub struct Shape {
    geometry: Geometry,
    color: Color,
}

impl Shape {
    pub fn new(geometry: impl Into<Geometry>) -> Self {
        Self {
            geometry: geometry.into(),
            color: Color::default(),
        }
    }

    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new(Circle::new(Point::new(cx, cy), radius))
    }

    pub fn squircle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new(Squircle::new(Point::new(cx, cy), radius))
    }

    pub fn rectangle(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self::new(Rectangle::new(Point::new(x0, y0), width, height))
    }

    pub fn capsule(x0: f64, y0: f64, x1: f64, y1: f64, radius: f64) -> Self {
        Self::new(Capsule::new(Point::new(x0, y0), Point::new(x1, y1), radius))
    }

    pub fn union(a: &ShapeRef, b: &ShapeRef) -> Self {
        Self::new(Operation::Union(a.clone(), b.clone()))
    }

    pub fn intersection(a: &ShapeRef, b: &ShapeRef) -> Self {
        Self::new(Operation::Intersection(a.clone(), b.clone()))
    }

    pub fn difference(a: &ShapeRef, b: &ShapeRef) -> Self {
        Self::new(Operation::Difference(a.clone(), b.clone()))
    }

    pub fn rotate(child: &ShapeRef, radians: f64) -> CanvasResult<Self> {
        Operation::unary(Opcode::Rotate, child.clone(), radians).map(Self::new)
    }

    pub fn scale(child: &ShapeRef, factor: f64) -> CanvasResult<Self> {
        Operation::unary(Opcode::Scale, child.clone(), factor).map(Self::new)
    }

    pub fn round(child: &ShapeRef, radius: f64) -> CanvasResult<Self> {
        Operation::unary(Opcode::Round, child.clone(), radius).map(Self::new)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.color = color.into();
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.set_color(color);
        self
    }

    pub fn into_ref(self) -> ShapeRef {
        Arc::new(self)
    }
}

impl Sdf for Shape {
    fn sdf(&self, p: Point) -> f64 {
        self.geometry.sdf(p)
    }

    fn bounds(&self) -> Rect {
        self.geometry.bounds()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/shape.rs"]
mod tests;
