use std::collections::HashMap;
use std::path::Path;

use crate::color::solid::SolidColor;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::{FrameRgb, RenderSettings};
use crate::shape::operation::Opcode;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete scene: canvas, shape nodes and the ordered draw list.
pub struct Scene {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Background fill; opaque black when omitted.
    #[serde(default = "default_background")]
    pub background: ColorSpec,
    #[serde(default)]
    pub settings: RenderSettings,
    /// Shape nodes. Operations may only reference nodes declared before them.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Nodes drawn on the canvas, bottom to top.
    #[serde(default)]
    pub draw: Vec<DrawItem>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A named shape node.
pub struct Node {
    pub id: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Circle {
        center: [f64; 2],
        radius: f64,
    },
    Squircle {
        center: [f64; 2],
        radius: f64,
        /// Superellipse order `n`; the distance exponent is `2n`.
        #[serde(default = "default_squircle_order")]
        order: u32,
    },
    Rectangle {
        /// Top-left corner.
        origin: [f64; 2],
        width: f64,
        height: f64,
    },
    Capsule {
        a: [f64; 2],
        b: [f64; 2],
        radius: f64,
    },
    /// Combine earlier nodes. `op` is an operator name such as `union` or `rotate`.
    Op {
        op: String,
        inputs: Vec<String>,
        /// Angle in radians (`rotate`), factor (`scale`) or radius (`round`).
        #[serde(default)]
        param: Option<f64>,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One entry of the draw list.
pub struct DrawItem {
    /// Id of the node to draw.
    pub node: String,
    /// Fill; opaque white when omitted.
    #[serde(default = "default_draw_color")]
    pub color: ColorSpec,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A single RGB color with alpha.
pub struct SolidSpec {
    /// `#rrggbb` or `rrggbb`.
    pub rgb: String,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColorSpec {
    Solid(SolidSpec),
    Linear {
        from: SolidSpec,
        to: SolidSpec,
        /// Direction in degrees; 90 runs top to bottom.
        #[serde(default = "default_linear_angle_deg")]
        angle_deg: f32,
        #[serde(default)]
        start: f32,
        #[serde(default = "default_window_end")]
        end: f32,
    },
    Radial {
        from: SolidSpec,
        to: SolidSpec,
        #[serde(default)]
        start: f32,
        #[serde(default = "default_window_end")]
        end: f32,
    },
}

fn default_background() -> ColorSpec {
    ColorSpec::Solid(SolidSpec {
        rgb: "#000000".to_string(),
        alpha: 1.0,
    })
}

fn default_draw_color() -> ColorSpec {
    ColorSpec::Solid(SolidSpec {
        rgb: "#ffffff".to_string(),
        alpha: 1.0,
    })
}

fn default_squircle_order() -> u32 {
    2
}

fn default_alpha() -> f32 {
    1.0
}

fn default_linear_angle_deg() -> f32 {
    90.0
}

fn default_window_end() -> f32 {
    1.0
}

impl SolidSpec {
    pub fn resolve(&self) -> CanvasResult<SolidColor> {
        let hex = self.rgb.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(CanvasError::validation(format!(
                "color '{}' must be 6 hex digits",
                self.rgb
            )));
        }
        let rgb = u32::from_str_radix(hex, 16).map_err(|_| {
            CanvasError::validation(format!("color '{}' is not valid hex", self.rgb))
        })?;
        if !self.alpha.is_finite() {
            return Err(CanvasError::validation(format!(
                "color '{}' alpha must be finite",
                self.rgb
            )));
        }
        Ok(SolidColor::rgba(rgb, self.alpha))
    }
}

impl ColorSpec {
    pub fn validate(&self) -> CanvasResult<()> {
        match self {
            ColorSpec::Solid(c) => c.resolve().map(|_| ()),
            ColorSpec::Linear {
                from,
                to,
                angle_deg,
                start,
                end,
            } => {
                if !angle_deg.is_finite() {
                    return Err(CanvasError::validation("gradient angle_deg must be finite"));
                }
                validate_window(*start, *end)?;
                from.resolve()?;
                to.resolve().map(|_| ())
            }
            ColorSpec::Radial {
                from,
                to,
                start,
                end,
            } => {
                validate_window(*start, *end)?;
                from.resolve()?;
                to.resolve().map(|_| ())
            }
        }
    }
}

fn validate_window(start: f32, end: f32) -> CanvasResult<()> {
    if !start.is_finite() || !end.is_finite() {
        return Err(CanvasError::validation(
            "gradient start/end must be finite",
        ));
    }
    Ok(())
}

fn validate_finite(id: &str, values: &[f64]) -> CanvasResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(CanvasError::validation(format!(
            "node '{id}' has non-finite geometry"
        )))
    }
}

impl NodeKind {
    fn validate(&self, id: &str) -> CanvasResult<()> {
        match self {
            NodeKind::Circle { center, radius } => {
                validate_finite(id, &[center[0], center[1], *radius])
            }
            NodeKind::Squircle {
                center,
                radius,
                order,
            } => {
                if *order == 0 {
                    return Err(CanvasError::validation(format!(
                        "node '{id}' squircle order must be >= 1"
                    )));
                }
                validate_finite(id, &[center[0], center[1], *radius])
            }
            NodeKind::Rectangle {
                origin,
                width,
                height,
            } => validate_finite(id, &[origin[0], origin[1], *width, *height]),
            NodeKind::Capsule { a, b, radius } => {
                validate_finite(id, &[a[0], a[1], b[0], b[1], *radius])
            }
            NodeKind::Op { op, inputs, param } => {
                let opcode: Opcode = op.parse()?;
                opcode.ensure_supported()?;
                let want = if opcode.is_binary() { 2 } else { 1 };
                if inputs.len() != want {
                    return Err(CanvasError::validation(format!(
                        "node '{id}': '{opcode}' takes {want} input(s), got {}",
                        inputs.len()
                    )));
                }
                match (opcode, param) {
                    (op, _) if op.is_binary() => Ok(()),
                    (_, None) => Err(CanvasError::validation(format!(
                        "node '{id}': '{opcode}' requires a param"
                    ))),
                    (Opcode::Scale, Some(p)) if !p.is_normal() => {
                        Err(CanvasError::validation(format!(
                            "node '{id}': scale factor must be finite and non-zero"
                        )))
                    }
                    (_, Some(p)) if !p.is_finite() => Err(CanvasError::validation(format!(
                        "node '{id}': param must be finite"
                    ))),
                    _ => Ok(()),
                }
            }
        }
    }
}

impl Scene {
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        serde_json::from_str(json).map_err(|e| CanvasError::serde(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CanvasError::Other(anyhow::anyhow!("read scene '{}': {e}", path.display()))
        })?;
        Self::from_json(&text)
    }

    pub fn to_json_pretty(&self) -> CanvasResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CanvasError::serde(e.to_string()))
    }

    /// Check sizes, colors, node parameters and id references.
    ///
    /// Ids must be unique and non-empty; an operation may only reference nodes declared
    /// before it, and every draw entry must name an existing node.
    pub fn validate(&self) -> CanvasResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CanvasError::validation("canvas width/height must be > 0"));
        }
        FrameRgb::byte_len(self.width, self.height)?;
        self.background.validate()?;

        let declared: HashMap<&str, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let mut seen = HashMap::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            if node.id.trim().is_empty() {
                return Err(CanvasError::validation(format!(
                    "node #{index} has an empty id"
                )));
            }
            if seen.insert(node.id.as_str(), index).is_some() {
                return Err(CanvasError::validation(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
            node.kind.validate(&node.id)?;
            if let NodeKind::Op { inputs, .. } = &node.kind {
                for input in inputs {
                    if seen.contains_key(input.as_str()) && input != &node.id {
                        continue;
                    }
                    return Err(if declared.contains_key(input.as_str()) {
                        CanvasError::validation(format!(
                            "node '{}' references '{input}' before it is declared",
                            node.id
                        ))
                    } else {
                        CanvasError::validation(format!(
                            "node '{}' references unknown node '{input}'",
                            node.id
                        ))
                    });
                }
            }
        }

        for item in &self.draw {
            if !seen.contains_key(item.node.as_str()) {
                return Err(CanvasError::validation(format!(
                    "draw list references unknown node '{}'",
                    item.node
                )));
            }
            item.color.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
