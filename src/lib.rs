//! canvasflat renders procedural raster images from trees of signed-distance shapes.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: build [`Shape`] nodes from primitives (circle, squircle, rectangle,
//!    capsule) and combine them with CSG and transform operations into a shared DAG.
//! 2. **Place**: add top-level shapes to a [`Canvas`], each with a solid, gradient or
//!    procedural [`Color`], over a background fill.
//! 3. **Redraw**: [`Canvas::redraw`] composites every shape in order into an RGB8
//!    [`FrameRgb`], optionally anti-aliased and optionally reporting progress.
//! 4. **Export** (optional): write the frame as PNG, binary PPM or ASCII art.
//!
//! Scenes can also be loaded from JSON ([`Scene`]) and rendered with the `canvasflat` binary.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same shapes and settings always produce the same bytes; progress
//!   reporting never affects pixels.
#![forbid(unsafe_code)]

mod color;
mod export;
mod foundation;
mod render;
mod scene;
mod shape;

pub use color::gradient::{Gradient, GradientKind};
pub use color::solid::SolidColor;
pub use color::{Color, ColorFn};
pub use export::{
    ASCII_RAMP, ExportFormat, ascii_char, export_to_path, write_ascii, write_frame, write_pbm,
    write_pgm, write_png, write_ppm, write_ppm_plain,
};
pub use foundation::core::{Affine, Point, Rect, Vec2};
pub use foundation::error::{CanvasError, CanvasResult};
pub use foundation::math::{float_equal, linear_mapping, radians, radians_normalize};
pub use render::canvas::Canvas;
pub use render::cpu::{CpuBackend, blend_channel, coverage};
pub use render::progress::{
    BACKGROUND_STAGE, ProgressSink, ProgressSnapshot, ProgressState, TextProgressBar, run_display,
};
pub use render::{BackendKind, FrameRgb, RenderBackend, RenderSettings, create_backend};
pub use scene::{ColorSpec, DrawItem, Node, NodeKind, Scene, SolidSpec};
pub use shape::operation::{MapDirection, Opcode, Operation, Pivoted, Rounded};
pub use shape::primitives::{Capsule, Circle, Rectangle, Squircle};
pub use shape::{Geometry, Sdf, Shape, ShapeRef};
