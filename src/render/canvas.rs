use std::sync::Arc;
use std::time::Duration;

use crate::color::Color;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::progress::{ProgressSink, ProgressState, run_display};
use crate::render::{BackendKind, FrameRgb, RenderBackend, RenderSettings, create_backend};
use crate::shape::ShapeRef;

/// Drawing surface: a background, an ordered shape list and the framebuffer they produce.
///
/// Shapes are painted in insertion order, later shapes on top. [`Canvas::redraw`] always
/// rebuilds the whole frame from the background; there are no incremental updates.
pub struct Canvas {
    frame: FrameRgb,
    background: Color,
    shapes: Vec<ShapeRef>,
    settings: RenderSettings,
    backend: Box<dyn RenderBackend>,
    progress: Option<Arc<dyn ProgressSink>>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.frame.width)
            .field("height", &self.frame.height)
            .field("background", &self.background)
            .field("shapes", &self.shapes.len())
            .field("settings", &self.settings)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl Canvas {
    /// Canvas with an opaque black background and the CPU backend.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        Ok(Self {
            frame: FrameRgb::new(width, height)?,
            background: Color::rgb(0x000000),
            shapes: Vec::new(),
            settings: RenderSettings::default(),
            backend: create_backend(BackendKind::Cpu),
            progress: None,
        })
    }

    pub fn with_backend(mut self, backend: Box<dyn RenderBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn width(&self) -> u32 {
        self.frame.width
    }

    pub fn height(&self) -> u32 {
        self.frame.height
    }

    /// Reallocate the framebuffer; previous pixels are discarded (zeroed) until the next
    /// redraw.
    pub fn set_size(&mut self, width: u32, height: u32) -> CanvasResult<()> {
        self.frame = FrameRgb::new(width, height)?;
        Ok(())
    }

    pub fn background(&self) -> &Color {
        &self.background
    }

    pub fn set_background(&mut self, color: impl Into<Color>) {
        self.background = color.into();
    }

    pub fn anti_aliasing(&self) -> bool {
        self.settings.anti_aliasing
    }

    pub fn set_anti_aliasing(&mut self, anti_aliasing: bool) {
        self.settings.anti_aliasing = anti_aliasing;
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    /// Enable (`Some`) or disable (`None`) the progress display for subsequent redraws.
    pub fn set_progress_sink(&mut self, sink: Option<Arc<dyn ProgressSink>>) {
        self.progress = sink;
    }

    /// Append a shape; returns its paint-order index.
    pub fn add_shape(&mut self, shape: ShapeRef) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
    }

    pub fn shapes(&self) -> &[ShapeRef] {
        &self.shapes
    }

    /// Recolor the shape at `index`.
    ///
    /// If the node is shared with other parents it is copied first, so only this canvas entry
    /// changes.
    pub fn set_shape_color(&mut self, index: usize, color: impl Into<Color>) -> CanvasResult<()> {
        let len = self.shapes.len();
        let shape = self.shapes.get_mut(index).ok_or_else(|| {
            CanvasError::validation(format!("shape index {index} out of range (len {len})"))
        })?;
        Arc::make_mut(shape).set_color(color);
        Ok(())
    }

    pub fn frame(&self) -> &FrameRgb {
        &self.frame
    }

    pub fn pixels(&self) -> &[u8] {
        &self.frame.data
    }

    /// Recompute the whole framebuffer. Blocks until every shape is composited.
    ///
    /// With a progress sink installed, a display thread reports progress while the render
    /// runs on the calling thread; both are joined before returning.
    #[tracing::instrument(skip(self), fields(width = self.frame.width, height = self.frame.height, shapes = self.shapes.len()))]
    pub fn redraw(&mut self) -> CanvasResult<()> {
        let Some(sink) = self.progress.clone() else {
            return self.backend.redraw(
                &mut self.frame,
                &self.background,
                &self.shapes,
                &self.settings,
                None,
            );
        };

        let state = ProgressState::new(self.shapes.len());
        let interval = Duration::from_millis(self.settings.progress_interval_ms.max(1));
        let Self {
            frame,
            background,
            shapes,
            settings,
            backend,
            ..
        } = self;

        std::thread::scope(|scope| -> CanvasResult<()> {
            let display = std::thread::Builder::new()
                .name("canvasflat-progress".to_string())
                .spawn_scoped(scope, || run_display(&state, sink.as_ref(), interval))
                .map_err(|e| CanvasError::render(format!("spawn progress thread: {e}")))?;

            let result = backend.redraw(frame, background, shapes, settings, Some(&state));
            state.finish();
            display.thread().unpark();
            display
                .join()
                .map_err(|_| CanvasError::render("progress thread panicked"))?;
            result
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
