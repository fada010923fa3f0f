//! JSON scene descriptions.
//!
//! A [`Scene`] is plain data: canvas size, background, render settings, a list of named shape
//! nodes and a draw list. [`Scene::validate`] checks it without building anything;
//! [`Scene::build`] turns it into a ready-to-redraw [`crate::render::canvas::Canvas`].

mod build;
mod model;

pub use model::{ColorSpec, DrawItem, Node, NodeKind, Scene, SolidSpec};
