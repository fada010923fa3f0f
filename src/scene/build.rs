use std::collections::HashMap;

use crate::color::Color;
use crate::color::gradient::Gradient;
use crate::foundation::core::Point;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::radians;
use crate::render::canvas::Canvas;
use crate::scene::model::{ColorSpec, NodeKind, Scene};
use crate::shape::operation::{Opcode, Operation};
use crate::shape::primitives::{Capsule, Circle, Rectangle, Squircle};
use crate::shape::{Shape, ShapeRef};

fn point(v: [f64; 2]) -> Point {
    Point::new(v[0], v[1])
}

impl ColorSpec {
    pub fn resolve(&self) -> CanvasResult<Color> {
        self.validate()?;
        Ok(match self {
            ColorSpec::Solid(c) => Color::Solid(c.resolve()?),
            ColorSpec::Linear {
                from,
                to,
                angle_deg,
                start,
                end,
            } => Gradient::linear_with_angle(from.resolve()?, to.resolve()?, radians(*angle_deg))
                .with_window(*start, *end)
                .into(),
            ColorSpec::Radial {
                from,
                to,
                start,
                end,
            } => Gradient::radial(from.resolve()?, to.resolve()?)
                .with_window(*start, *end)
                .into(),
        })
    }
}

impl Scene {
    /// Validate, then build every node and a canvas drawing the draw list in order.
    ///
    /// The returned canvas has not been redrawn yet.
    #[tracing::instrument(skip(self), fields(width = self.width, height = self.height, nodes = self.nodes.len()))]
    pub fn build(&self) -> CanvasResult<Canvas> {
        self.validate()?;

        let mut built: HashMap<&str, ShapeRef> = HashMap::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let shape = build_node(&node.kind, &built)?;
            built.insert(node.id.as_str(), shape.into_ref());
        }

        let mut canvas = Canvas::new(self.width, self.height)?;
        canvas.set_background(self.background.resolve()?);
        canvas.set_settings(self.settings.clone());
        for item in &self.draw {
            let node = built.get(item.node.as_str()).ok_or_else(|| {
                CanvasError::validation(format!("unknown node '{}'", item.node))
            })?;
            let shape = Shape::clone(node).with_color(item.color.resolve()?);
            canvas.add_shape(shape.into_ref());
        }
        tracing::debug!(shapes = canvas.shapes().len(), "scene built");
        Ok(canvas)
    }
}

fn build_node(kind: &NodeKind, built: &HashMap<&str, ShapeRef>) -> CanvasResult<Shape> {
    let lookup = |id: &String| {
        built
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| CanvasError::validation(format!("unknown node '{id}'")))
    };
    Ok(match kind {
        NodeKind::Circle { center, radius } => Shape::new(Circle::new(point(*center), *radius)),
        NodeKind::Squircle {
            center,
            radius,
            order,
        } => Shape::new(Squircle::with_order(point(*center), *radius, *order)?),
        NodeKind::Rectangle {
            origin,
            width,
            height,
        } => Shape::new(Rectangle::new(point(*origin), *width, *height)),
        NodeKind::Capsule { a, b, radius } => {
            Shape::new(Capsule::new(point(*a), point(*b), *radius))
        }
        NodeKind::Op { op, inputs, param } => {
            let opcode: Opcode = op.parse()?;
            let children = inputs.iter().map(lookup).collect::<CanvasResult<Vec<_>>>()?;
            let operation = match (opcode.is_binary(), children.as_slice()) {
                (true, [a, b]) => Operation::binary(opcode, a.clone(), b.clone())?,
                (false, [child]) => {
                    let param = param.ok_or_else(|| {
                        CanvasError::validation(format!("'{opcode}' requires a param"))
                    })?;
                    Operation::unary(opcode, child.clone(), param)?
                }
                _ => {
                    return Err(CanvasError::validation(format!(
                        "'{opcode}' got {} input(s)",
                        children.len()
                    )));
                }
            };
            Shape::new(operation)
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/build.rs"]
mod tests;
