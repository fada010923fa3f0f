use std::str::FromStr;

use crate::foundation::core::{Affine, Point, Rect};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::shape::{Sdf, ShapeRef};

/// Operator names accepted by [`Operation::binary`] and [`Operation::unary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opcode {
    Union,
    Intersection,
    Difference,
    Rotate,
    Scale,
    Round,
    /// Reserved; rejected at construction.
    Blur,
    /// Reserved; rejected at construction.
    OffsetY,
}

impl Opcode {
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Union => "union",
            Opcode::Intersection => "intersection",
            Opcode::Difference => "difference",
            Opcode::Rotate => "rotate",
            Opcode::Scale => "scale",
            Opcode::Round => "round",
            Opcode::Blur => "blur",
            Opcode::OffsetY => "offset_y",
        }
    }

    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Opcode::Union | Opcode::Intersection | Opcode::Difference
        )
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, Opcode::Blur | Opcode::OffsetY)
    }

    pub fn ensure_supported(self) -> CanvasResult<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(CanvasError::unsupported(format!(
                "'{}' has no defined distance or bounds rule",
                self.name()
            )))
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Opcode {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "union" => Opcode::Union,
            "intersection" => Opcode::Intersection,
            "difference" => Opcode::Difference,
            "rotate" => Opcode::Rotate,
            "scale" => Opcode::Scale,
            "round" => Opcode::Round,
            "blur" => Opcode::Blur,
            "offset_y" | "offsety" => Opcode::OffsetY,
            other => {
                return Err(CanvasError::validation(format!(
                    "unknown operation '{other}'"
                )));
            }
        };
        Ok(op)
    }
}

/// Which way [`Operation::map_point`] maps coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapDirection {
    /// Processed space back into the child's frame (SDF evaluation).
    ToChild,
    /// Child frame forward into processed space (bounding-box estimation).
    FromChild,
}

/// A child shape rotated or scaled about a pivot frozen at construction.
///
/// `forward` maps child space into processed space; evaluation uses its inverse.
#[derive(Clone, Debug)]
pub struct Pivoted {
    child: ShapeRef,
    param: f64,
    pivot: Point,
    forward: Affine,
    inverse: Affine,
}

impl Pivoted {
    fn new(child: ShapeRef, param: f64, transform: impl FnOnce(f64, Point) -> Affine) -> Self {
        let pivot = child.bounds().center();
        let forward = transform(param, pivot);
        Self {
            child,
            param,
            pivot,
            forward,
            inverse: forward.inverse(),
        }
    }

    pub fn child(&self) -> &ShapeRef {
        &self.child
    }

    pub fn param(&self) -> f64 {
        self.param
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    pub fn affine(&self) -> Affine {
        self.forward
    }

    pub fn map_point(&self, p: Point, dir: MapDirection) -> Point {
        match dir {
            MapDirection::FromChild => self.forward * p,
            MapDirection::ToChild => self.inverse * p,
        }
    }
}

/// A child shape dilated (positive radius) or eroded (negative radius).
#[derive(Clone, Debug)]
pub struct Rounded {
    child: ShapeRef,
    radius: f64,
}

impl Rounded {
    pub fn child(&self) -> &ShapeRef {
        &self.child
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Composite node: boolean combination of two shapes or a transform of one.
///
/// Evaluation always re-walks the children; nothing is cached besides the transform pivot.
#[derive(Clone, Debug)]
pub enum Operation {
    Union(ShapeRef, ShapeRef),
    Intersection(ShapeRef, ShapeRef),
    Difference(ShapeRef, ShapeRef),
    Rotate(Pivoted),
    Scale(Pivoted),
    Round(Rounded),
}

impl Operation {
    /// Boolean combination of two already-built shapes.
    pub fn binary(opcode: Opcode, a: ShapeRef, b: ShapeRef) -> CanvasResult<Self> {
        opcode.ensure_supported()?;
        match opcode {
            Opcode::Union => Ok(Operation::Union(a, b)),
            Opcode::Intersection => Ok(Operation::Intersection(a, b)),
            Opcode::Difference => Ok(Operation::Difference(a, b)),
            other => Err(CanvasError::validation(format!(
                "'{other}' takes one shape and a parameter, not two shapes"
            ))),
        }
    }

    /// Transform of one shape by a scalar parameter (radians, factor or radius).
    pub fn unary(opcode: Opcode, child: ShapeRef, param: f64) -> CanvasResult<Self> {
        opcode.ensure_supported()?;
        match opcode {
            Opcode::Rotate => {
                if !param.is_finite() {
                    return Err(CanvasError::validation("rotate angle must be finite"));
                }
                Ok(Operation::Rotate(Pivoted::new(child, param, Affine::rotate_about)))
            }
            Opcode::Scale => {
                if !param.is_normal() {
                    return Err(CanvasError::validation(
                        "scale factor must be finite and non-zero",
                    ));
                }
                Ok(Operation::Scale(Pivoted::new(child, param, Affine::scale_about)))
            }
            Opcode::Round => {
                if !param.is_finite() {
                    return Err(CanvasError::validation("round radius must be finite"));
                }
                Ok(Operation::Round(Rounded {
                    child,
                    radius: param,
                }))
            }
            other => Err(CanvasError::validation(format!(
                "'{other}' takes two shapes, not a parameter"
            ))),
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Operation::Union(..) => Opcode::Union,
            Operation::Intersection(..) => Opcode::Intersection,
            Operation::Difference(..) => Opcode::Difference,
            Operation::Rotate(_) => Opcode::Rotate,
            Operation::Scale(_) => Opcode::Scale,
            Operation::Round(_) => Opcode::Round,
        }
    }

    /// Map a point through a rotate/scale node; identity for every other operator.
    pub fn map_point(&self, p: Point, dir: MapDirection) -> Point {
        match self {
            Operation::Rotate(t) | Operation::Scale(t) => t.map_point(p, dir),
            _ => p,
        }
    }
}

impl Sdf for Operation {
    fn sdf(&self, p: Point) -> f64 {
        match self {
            Operation::Union(a, b) => a.sdf(p).min(b.sdf(p)),
            Operation::Intersection(a, b) => a.sdf(p).max(b.sdf(p)),
            Operation::Difference(a, b) => a.sdf(p).max(-b.sdf(p)),
            Operation::Rotate(t) | Operation::Scale(t) => {
                t.child.sdf(self.map_point(p, MapDirection::ToChild))
            }
            Operation::Round(r) => r.child.sdf(p) - r.radius,
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            Operation::Union(a, b) => a.bounds().union(&b.bounds()),
            Operation::Intersection(a, b) => a.bounds().intersect(&b.bounds()),
            Operation::Difference(a, _) => a.bounds(),
            Operation::Rotate(t) => {
                let area = t.child.bounds();
                if area.is_empty() {
                    return area;
                }
                let (l, tp, r, b) = (
                    f64::from(area.left),
                    f64::from(area.top),
                    f64::from(area.right),
                    f64::from(area.bottom),
                );
                let corners = [
                    Point::new(l, tp),
                    Point::new(r, tp),
                    Point::new(r, b),
                    Point::new(l, b),
                ]
                .map(|c| self.map_point(c, MapDirection::FromChild));
                enclosing_points(&corners)
            }
            Operation::Scale(t) => {
                let area = t.child.bounds();
                if area.is_empty() {
                    return area;
                }
                let corners = [
                    Point::new(f64::from(area.left), f64::from(area.top)),
                    Point::new(f64::from(area.right), f64::from(area.bottom)),
                ]
                .map(|c| self.map_point(c, MapDirection::FromChild));
                enclosing_points(&corners)
            }
            Operation::Round(r) => {
                let area = r.child.bounds();
                if area.is_empty() {
                    return area;
                }
                Rect::enclosing(
                    f64::from(area.left) - r.radius,
                    f64::from(area.top) - r.radius,
                    f64::from(area.right) + r.radius,
                    f64::from(area.bottom) + r.radius,
                )
            }
        }
    }
}

fn enclosing_points(points: &[Point]) -> Rect {
    let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
    let (mut x1, mut y1) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        x0 = x0.min(p.x);
        y0 = y0.min(p.y);
        x1 = x1.max(p.x);
        y1 = y1.max(p.y);
    }
    Rect::enclosing(x0, y0, x1, y1)
}

#[cfg(test)]
#[path = "../../tests/unit/shape/operation.rs"]
mod tests;
